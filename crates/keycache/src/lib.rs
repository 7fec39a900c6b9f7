//! # keycache
//!
//! Fixed-capacity LRU cache of string keys.
//!
//! ## Architecture
//! - **Index**: AHash map from key to entry handle (O(1) membership)
//! - **Recency queue**: arena-backed doubly-linked list, most recent first (O(1) promote/evict)
//! - **Stats**: lifetime hit/miss/eviction counters, kept across `clear()`
//!
//! ```
//! use keycache::{KeyCache, Touch};
//!
//! let mut cache = KeyCache::new(2);
//! cache.touch("a");
//! cache.touch("b");
//! assert_eq!(cache.touch("a"), Touch::Hit);
//! assert_eq!(cache.touch("c").evicted(), Some("b"));
//! assert_eq!(cache.render().to_string(), "2 - [{c}<-->{a}]");
//! ```

#![warn(missing_docs)]

mod cache;
mod queue;
mod render;
mod shared;
mod stats;

pub use cache::{KeyCache, Touch, DEFAULT_CAPACITY};
pub use queue::{EntryId, Iter, RecencyQueue};
pub use render::Rendered;
pub use shared::SharedKeyCache;
pub use stats::CacheStats;
