//! Core type definitions for the cache system

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cache key type - an opaque record identifier such as an event id
pub type CacheKey = String;

/// Minimal capability a serving layer needs from a recency cache
///
/// Callers depend on this trait rather than on [`RecencyCache`], so a test
/// can swap in a tiny cache (or a different structure) without touching the
/// serving code. Implementations are not expected to synchronize
/// internally; shared use goes through an external lock.
///
/// [`RecencyCache`]: crate::cache::RecencyCache
pub trait RecencyStore<V> {
    /// Look up `key`, marking it most recently used on a hit
    fn get(&mut self, key: &str) -> Option<&V>;

    /// Insert or overwrite `key`, evicting the least recently used entry
    /// when a new key arrives at capacity
    fn put(&mut self, key: CacheKey, value: V);

    /// Counters for monitoring, if the implementation keeps any
    fn stats(&self) -> Option<CacheStats> {
        None
    }
}

/// Statistics for cache performance monitoring
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Total number of cache hits
    pub hits: u64,

    /// Total number of cache misses
    pub misses: u64,

    /// Number of new keys inserted
    pub insertions: u64,

    /// Number of overwrites of an existing key
    pub updates: u64,

    /// Number of entries evicted to make room
    pub evictions: u64,

    /// Number of entries currently in cache
    pub entries: usize,
}

impl CacheStats {
    /// Calculate cache hit rate as a percentage
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }

    /// Calculate miss rate as a percentage
    pub fn miss_rate(&self) -> f64 {
        100.0 - self.hit_rate()
    }

    /// Total number of lookups served
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CacheStats {{ hits: {}, misses: {}, hit_rate: {:.2}%, entries: {}, evictions: {} }}",
            self.hits,
            self.misses,
            self.hit_rate(),
            self.entries,
            self.evictions
        )
    }
}
