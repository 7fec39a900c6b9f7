//! Command handler for the interactive loop

use std::fmt;

use keycache::{CacheStats, KeyCache, Touch};
use tracing::info;

use crate::command::Command;

/// Output produced for one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Rendered cache contents after a touch
    Contents(String),
    /// Counter snapshot
    Stats(CacheStats),
    /// Cache was emptied
    Cleared,
    /// Loop should stop
    Exit,
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Contents(view) => f.write_str(view),
            Reply::Stats(stats) => write!(f, "Cache Stats - {}", stats),
            Reply::Cleared => f.write_str("Cache cleared."),
            Reply::Exit => Ok(()),
        }
    }
}

pub struct CommandHandler {
    cache: KeyCache,
}

impl CommandHandler {
    pub fn new(cache: KeyCache) -> Self {
        Self { cache }
    }

    pub fn handle(&mut self, cmd: Command) -> Reply {
        match cmd {
            Command::Touch(key) => self.handle_touch(&key),
            Command::Stats => Reply::Stats(self.cache.stats()),
            Command::Clear => {
                self.cache.clear();
                Reply::Cleared
            }
            Command::Exit => Reply::Exit,
        }
    }

    #[cfg(test)]
    pub fn cache(&self) -> &KeyCache {
        &self.cache
    }

    fn handle_touch(&mut self, key: &str) -> Reply {
        match self.cache.touch(key) {
            Touch::Hit => info!("The value promoted is {}", key),
            Touch::Miss { evicted } => {
                info!("The value added is {}", key);
                if let Some(old) = evicted {
                    info!("The value evicted is {}", old);
                }
            }
        }

        Reply::Contents(self.cache.render().to_string())
    }
}
