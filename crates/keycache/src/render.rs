//! Human-readable view of cache contents

use std::fmt;

use crate::queue::{Iter, RecencyQueue};

/// Borrowed view of a cache, most recently used key first
///
/// Displays as `N - [{k1}<-->{k2}<-->...]`.
#[derive(Clone, Copy)]
pub struct Rendered<'a> {
    queue: &'a RecencyQueue,
}

impl<'a> Rendered<'a> {
    pub(crate) fn new(queue: &'a RecencyQueue) -> Self {
        Self { queue }
    }

    /// Number of keys shown
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Check if there is nothing to show
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl<'a> IntoIterator for Rendered<'a> {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.queue.iter()
    }
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - [", self.queue.len())?;
        for (i, value) in self.queue.iter().enumerate() {
            if i > 0 {
                f.write_str("<-->")?;
            }
            write!(f, "{{{}}}", value)?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty() {
        let queue = RecencyQueue::new();
        let view = Rendered::new(&queue);

        assert!(view.is_empty());
        assert_eq!(view.to_string(), "0 - []");
    }

    #[test]
    fn test_render_order() {
        let mut queue = RecencyQueue::new();
        for value in ["tree", "parrot"] {
            let id = queue.alloc(value.to_string());
            queue.insert_front(id);
        }

        let view = Rendered::new(&queue);
        assert_eq!(view.len(), 2);
        assert_eq!(view.to_string(), "2 - [{parrot}<-->{tree}]");
        assert_eq!(view.into_iter().collect::<Vec<_>>(), vec!["parrot", "tree"]);
    }

    #[test]
    fn test_render_empty_key() {
        let mut queue = RecencyQueue::new();
        let id = queue.alloc(String::new());
        queue.insert_front(id);

        assert_eq!(Rendered::new(&queue).to_string(), "1 - [{}]");
    }
}
