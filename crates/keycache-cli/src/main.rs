//! KeyCache CLI - interactive LRU cache driven from stdin

mod command;
mod handler;

use std::io::{self, BufRead, Write};
use std::num::NonZeroUsize;

use anyhow::{Context, Result};
use clap::Parser;
use keycache::KeyCache;
use tracing::{info, warn};

use crate::handler::{CommandHandler, Reply};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cache capacity (number of keys)
    #[arg(short, long, default_value = "5")]
    capacity: NonZeroUsize,

    /// Skip the command banner
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    info!("Starting KeyCache v{}", env!("CARGO_PKG_VERSION"));
    info!("Cache capacity: {}", args.capacity);

    let cache = KeyCache::new(args.capacity.get());
    let mut handler = CommandHandler::new(cache);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !args.quiet {
        print_banner(&mut out)?;
    }

    run(io::stdin().lock(), &mut out, &mut handler)
}

fn print_banner<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  add <value>   - Add a value to the cache")?;
    writeln!(out, "  <value>       - Same as add")?;
    writeln!(out, "  stats         - Show cache statistics")?;
    writeln!(out, "  clear         - Clear the cache")?;
    writeln!(out, "  exit          - Exit the program")?;
    out.flush()?;
    Ok(())
}

/// Read commands line by line until `exit` or end of input
///
/// Lines that are not valid UTF-8 are decoded lossily rather than ending the session.
fn run<R: BufRead, W: Write>(
    mut input: R,
    out: &mut W,
    handler: &mut CommandHandler,
) -> Result<()> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let n = input
            .read_until(b'\n', &mut buf)
            .context("Error reading input")?;
        if n == 0 {
            break;
        }

        let line = String::from_utf8_lossy(&buf);
        let cmd = match command::parse_line(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                warn!("Rejected command {:?}: {}", line, e);
                writeln!(out, "ERR {}", e)?;
                continue;
            }
        };

        match handler.handle(cmd) {
            Reply::Exit => break,
            reply => writeln!(out, "{}", reply)?,
        }
        out.flush()?;
    }

    info!("Exiting");
    Ok(())
}
