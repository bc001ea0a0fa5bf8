//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, loads and evictions.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics for one group.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of lookups served from the cache
    pub hits: u64,
    /// Number of lookups that fell through to the loader
    pub misses: u64,
    /// Number of successful loader calls
    pub loads: u64,
    /// Number of loader calls that returned an error
    pub load_failures: u64,
    /// Number of entries evicted due to the byte budget
    pub evictions: u64,
    /// Current number of entries in the cache
    pub entries: usize,
    /// Accounted bytes currently held
    pub bytes_used: usize,
    /// Configured byte budget (0 = unbounded)
    pub max_bytes: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new(max_bytes: usize) -> Self {
        Self {
            max_bytes,
            ..Self::default()
        }
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_load(&mut self) {
        self.loads += 1;
    }

    pub fn record_load_failure(&mut self) {
        self.load_failures += 1;
    }

    // == Record Evictions ==
    /// Adds `count` evictions to the counter.
    pub fn record_evictions(&mut self, count: usize) {
        self.evictions += count as u64;
    }

    // == Update Occupancy ==
    /// Updates the entry count and accounted bytes.
    pub fn set_occupancy(&mut self, entries: usize, bytes_used: usize) {
        self.entries = entries;
        self.bytes_used = bytes_used;
    }
}
