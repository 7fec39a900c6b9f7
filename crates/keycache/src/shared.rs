//! Thread-safe handle around a single [`KeyCache`]

use std::sync::Arc;

use parking_lot::Mutex;

use crate::cache::{KeyCache, Touch};
use crate::stats::CacheStats;

/// Cloneable handle sharing one cache between threads
///
/// Each call holds the lock for the whole operation, so lookup, relinking
/// and counter updates of one `touch` never interleave with another.
#[derive(Clone)]
pub struct SharedKeyCache {
    inner: Arc<Mutex<KeyCache>>,
}

impl SharedKeyCache {
    /// Create a shared cache holding at most `capacity` keys
    pub fn new(capacity: usize) -> Self {
        Self::from(KeyCache::new(capacity))
    }

    /// See [`KeyCache::touch`]
    pub fn touch(&self, key: &str) -> Touch {
        self.inner.lock().touch(key)
    }

    /// See [`KeyCache::clear`]
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    /// Copy of the keys, most recent first
    pub fn snapshot(&self) -> Vec<String> {
        self.inner.lock().iter().map(str::to_owned).collect()
    }

    /// Get current cache size
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Run `f` with the cache locked
    pub fn with<R>(&self, f: impl FnOnce(&KeyCache) -> R) -> R {
        f(&self.inner.lock())
    }
}

impl From<KeyCache> for SharedKeyCache {
    fn from(cache: KeyCache) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }
}

impl Default for SharedKeyCache {
    fn default() -> Self {
        Self::from(KeyCache::default())
    }
}
