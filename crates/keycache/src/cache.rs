//! KeyCache: LRU cache of string keys

use std::collections::HashMap;

use ahash::RandomState;
use tracing::{debug, trace};

use crate::queue::{EntryId, Iter, RecencyQueue};
use crate::render::Rendered;
use crate::stats::CacheStats;

/// Capacity used by [`KeyCache::default`]
pub const DEFAULT_CAPACITY: usize = 5;

/// Upper bound on slots reserved up front; larger caches grow on demand
const MAX_PREALLOC: usize = 1024;

/// Outcome of a [`KeyCache::touch`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Touch {
    /// Key was present and has been promoted
    Hit,
    /// Key was absent and has been inserted
    Miss {
        /// Least recently used key dropped to stay within capacity
        evicted: Option<String>,
    },
}

impl Touch {
    /// Check if the key was already cached
    pub fn is_hit(&self) -> bool {
        matches!(self, Touch::Hit)
    }

    /// Key evicted by this touch, if any
    pub fn evicted(&self) -> Option<&str> {
        match self {
            Touch::Miss { evicted } => evicted.as_deref(),
            Touch::Hit => None,
        }
    }
}

/// Fixed-capacity LRU cache where each key is its own value
pub struct KeyCache {
    /// Key -> entry handle in `queue`
    index: HashMap<String, EntryId, RandomState>,

    /// Recency ordering, most recent first
    queue: RecencyQueue,

    /// Lifetime counters
    stats: CacheStats,

    /// Maximum number of keys
    capacity: usize,
}

impl KeyCache {
    /// Create a new cache holding at most `capacity` keys
    ///
    /// # Panics
    /// If `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than 0");

        let reserve = capacity.min(MAX_PREALLOC);
        Self {
            index: HashMap::with_capacity_and_hasher(reserve, RandomState::new()),
            queue: RecencyQueue::with_capacity(reserve),
            stats: CacheStats::new(),
            capacity,
        }
    }

    /// Check `key`, promoting it on a hit or inserting it on a miss
    ///
    /// A miss that pushes the cache over capacity evicts the least
    /// recently used key. A hit never evicts.
    pub fn touch(&mut self, key: &str) -> Touch {
        if let Some(&id) = self.index.get(key) {
            self.queue.remove(id);
            self.queue.insert_front(id);
            self.stats.record_hit();
            trace!(key, "promoted");
            return Touch::Hit;
        }

        self.stats.record_miss();
        let id = self.queue.alloc(key.to_owned());
        self.queue.insert_front(id);
        self.index.insert(key.to_owned(), id);
        debug!(key, len = self.queue.len(), "inserted");

        let evicted = if self.queue.len() > self.capacity {
            Some(self.evict())
        } else {
            None
        };

        Touch::Miss { evicted }
    }

    /// Check membership without promoting
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Drop every key (statistics are kept)
    pub fn clear(&mut self) {
        let reserve = self.capacity.min(MAX_PREALLOC);
        self.index = HashMap::with_capacity_and_hasher(reserve, RandomState::new());
        self.queue = RecencyQueue::with_capacity(reserve);
        debug!("cleared");
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Reset hit/miss/eviction counters to zero
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// Get current cache size
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate keys from most to least recently used
    pub fn iter(&self) -> Iter<'_> {
        self.queue.iter()
    }

    /// Displayable view of the contents, most recent first
    pub fn render(&self) -> Rendered<'_> {
        Rendered::new(&self.queue)
    }

    fn evict(&mut self) -> String {
        let Some(id) = self.queue.least_recent() else {
            panic!("eviction from an empty recency queue");
        };

        self.queue.remove(id);
        let key = self.queue.release(id);
        if self.index.remove(&key).is_none() {
            panic!("evicted key {:?} missing from index", key);
        }
        self.stats.record_eviction();
        debug!(key = %key, "evicted");

        key
    }

    /// Assert that index and queue hold the same keys and the queue is well formed.
    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.queue.debug_validate_invariants();
        assert!(self.queue.len() <= self.capacity);
        assert_eq!(self.index.len(), self.queue.len());

        for (key, &id) in &self.index {
            assert_eq!(self.queue.value(id), key);
        }
        for key in self.queue.iter() {
            assert!(self.index.contains_key(key));
        }
    }
}

impl Default for KeyCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<'a> IntoIterator for &'a KeyCache {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn key_strategy() -> impl Strategy<Value = String> {
        prop::string::string_regex("[a-f]{0,2}").expect("valid regex")
    }

    proptest! {
        /// Property: len() never exceeds capacity and index/queue stay in bijection
        #[test]
        fn prop_capacity_and_bijection(
            capacity in 1usize..8,
            keys in prop::collection::vec(key_strategy(), 0..200)
        ) {
            let mut cache = KeyCache::new(capacity);

            for key in &keys {
                cache.touch(key);
                prop_assert!(cache.len() <= capacity);
                cache.debug_validate_invariants();
            }
        }

        /// Property: the touched key is always most recent
        #[test]
        fn prop_touched_key_is_most_recent(
            capacity in 1usize..8,
            keys in prop::collection::vec(key_strategy(), 1..100)
        ) {
            let mut cache = KeyCache::new(capacity);

            for key in &keys {
                cache.touch(key);
                prop_assert_eq!(cache.iter().next(), Some(key.as_str()));
            }
        }

        /// Property: touching twice changes nothing but the hit count
        #[test]
        fn prop_retouch_is_idempotent(
            capacity in 1usize..8,
            keys in prop::collection::vec(key_strategy(), 0..50),
            key in key_strategy()
        ) {
            let mut cache = KeyCache::new(capacity);
            for k in &keys {
                cache.touch(k);
            }

            cache.touch(&key);
            let contents: Vec<String> = cache.iter().map(str::to_owned).collect();
            let stats = cache.stats();

            prop_assert!(cache.touch(&key).is_hit());
            prop_assert_eq!(cache.iter().map(str::to_owned).collect::<Vec<_>>(), contents);
            prop_assert_eq!(cache.stats().hits(), stats.hits() + 1);
            prop_assert_eq!(cache.stats().misses(), stats.misses());
            prop_assert_eq!(cache.stats().evictions(), stats.evictions());
        }

        /// Property: counters never decrease, including across clear()
        #[test]
        fn prop_counters_monotonic(
            capacity in 1usize..8,
            ops in prop::collection::vec(prop::option::weighted(0.9, key_strategy()), 0..200)
        ) {
            let mut cache = KeyCache::new(capacity);
            let mut prev = cache.stats();

            for op in &ops {
                match op {
                    Some(key) => {
                        cache.touch(key);
                    }
                    None => cache.clear(),
                }

                let now = cache.stats();
                prop_assert!(now.hits() >= prev.hits());
                prop_assert!(now.misses() >= prev.misses());
                prop_assert!(now.evictions() >= prev.evictions());
                prop_assert_eq!(now.hits() + now.misses(), (prev.hits() + prev.misses()) + u64::from(op.is_some()));
                prev = now;
            }
        }
    }

    proptest! {
        /// Property: C+1 distinct keys evict exactly the first
        #[test]
        fn prop_first_of_overflow_is_evicted(capacity in 1usize..16) {
            let mut cache = KeyCache::new(capacity);
            let keys: Vec<String> = (0..=capacity).map(|i| format!("k{}", i)).collect();

            for key in &keys {
                cache.touch(key);
            }

            prop_assert!(!cache.contains(&keys[0]));
            for key in &keys[1..] {
                prop_assert!(cache.contains(key));
            }
            prop_assert_eq!(cache.iter().next(), Some(keys[capacity].as_str()));
            prop_assert_eq!(cache.stats().evictions(), 1);
        }
    }
}
