//! Cache Store Module
//!
//! Thread-safe wrapper serializing access to one LRU cache.

use parking_lot::Mutex;
use tracing::debug;

use crate::cache::{ByteView, CacheStats, LruCache};

/// State guarded by the store's lock.
#[derive(Debug)]
struct Inner {
    /// Built on first write
    lru: Option<LruCache<ByteView>>,
    stats: CacheStats,
}

// == Cache Store ==
/// Mutex-guarded LRU cache of [`ByteView`] values.
///
/// Reads take the same exclusive lock as writes because a hit promotes the
/// entry and so mutates the recency order.
#[derive(Debug)]
pub struct CacheStore {
    /// Byte budget handed to the LRU cache, 0 = unbounded
    cache_bytes: usize,
    inner: Mutex<Inner>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a store with the given byte budget.
    ///
    /// No LRU cache is allocated until the first [`CacheStore::add`].
    pub fn new(cache_bytes: usize) -> Self {
        Self {
            cache_bytes,
            inner: Mutex::new(Inner {
                lru: None,
                stats: CacheStats::new(cache_bytes),
            }),
        }
    }

    // == Add ==
    /// Stores a value, evicting older entries if the budget is exceeded.
    pub fn add(&self, key: &str, value: ByteView) {
        let mut inner = self.inner.lock();
        let cache_bytes = self.cache_bytes;
        let lru = inner
            .lru
            .get_or_insert_with(|| LruCache::new(cache_bytes, None));

        let evicted = lru.add(key, value);
        let (entries, bytes_used) = (lru.len(), lru.bytes_used());

        if evicted > 0 {
            debug!(key, evicted, bytes_used, "add evicted entries");
        }
        inner.stats.record_evictions(evicted);
        inner.stats.set_occupancy(entries, bytes_used);
    }

    // == Get ==
    /// Retrieves a value and marks it as most recently used.
    ///
    /// Returns None without allocating if nothing was ever stored.
    pub fn get(&self, key: &str) -> Option<ByteView> {
        let mut inner = self.inner.lock();
        let found = inner.lru.as_mut().and_then(|lru| lru.get(key).cloned());

        match found {
            Some(_) => inner.stats.record_hit(),
            None => inner.stats.record_miss(),
        }
        found
    }

    // == Load Accounting ==
    pub fn record_load(&self) {
        self.inner.lock().stats.record_load();
    }

    pub fn record_load_failure(&self) {
        self.inner.lock().stats.record_load_failure();
    }

    // == Stats ==
    /// Returns a snapshot of the current statistics.
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats.clone()
    }

    // == Length ==
    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        self.inner.lock().lru.as_ref().map_or(0, LruCache::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the configured byte budget.
    pub fn cache_bytes(&self) -> usize {
        self.cache_bytes
    }

    /// Returns true once the underlying LRU cache has been built.
    pub fn is_initialized(&self) -> bool {
        self.inner.lock().lru.is_some()
    }
}
