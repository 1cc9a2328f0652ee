//! Bounded recency cache with O(1) lookup, update and eviction

use std::collections::HashMap;

use tracing::{debug, info};

use crate::cache::{
    config::CacheConfig,
    types::{CacheKey, CacheStats, RecencyStore},
};
use crate::error::Result;

/// Null link in the recency list.
const NIL: usize = usize::MAX;

#[derive(Debug)]
struct Node<V> {
    key: CacheKey,
    value: V,
    /// Toward the most recently used end.
    prev: usize,
    /// Toward the least recently used end.
    next: usize,
}

/// Fixed-capacity key/value cache with least-recently-used eviction
///
/// Entries live in a slot arena linked into a doubly linked list by index;
/// a hash map points each key at its slot. `head` is the most recently used
/// entry and `tail` the least. Slots are never freed individually: once the
/// cache is full, the tail slot is reused in place for the incoming key, so
/// `get` and `put` are both O(1).
///
/// The list is a strict total order by last touch. Two entries never share
/// a position, so "equally old" entries cannot occur; among keys that were
/// never touched after insertion, the earliest inserted sits nearest the
/// tail and goes first.
///
/// The cache does no locking. Share it across threads behind a mutex held
/// for the whole `get` or `put` call.
///
/// # Invalidation
///
/// There is no delete operation. To invalidate a record, overwrite its key
/// with the caller's empty value (for `RecencyCache<Option<T>>`, `None`).
/// The entry keeps its slot, so capacity accounting is unchanged.
#[derive(Debug)]
pub struct RecencyCache<V> {
    config: CacheConfig,
    map: HashMap<CacheKey, usize>,
    nodes: Vec<Node<V>>,
    head: usize,
    tail: usize,
    stats: CacheStats,
}

impl<V> RecencyCache<V> {
    /// Create a cache holding at most `capacity` entries
    ///
    /// Fails with [`KeepsakeError::InvalidCapacity`] when `capacity` is zero.
    ///
    /// [`KeepsakeError::InvalidCapacity`]: crate::error::KeepsakeError::InvalidCapacity
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_config(CacheConfig::with_capacity(capacity))
    }

    /// Create a cache from a validated configuration
    pub fn with_config(config: CacheConfig) -> Result<Self> {
        config.validate()?;
        info!("Initializing recency cache with config: {:?}", config);

        // Slots are allocated lazily; don't reserve a huge capacity up front.
        let reserve = config.capacity.min(1024);

        Ok(Self {
            map: HashMap::with_capacity(reserve),
            nodes: Vec::with_capacity(reserve),
            head: NIL,
            tail: NIL,
            stats: CacheStats::default(),
            config,
        })
    }

    /// Look up `key`, making it the most recently used entry on a hit
    ///
    /// A miss leaves the recency order untouched.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        match self.map.get(key).copied() {
            Some(idx) => {
                self.touch(idx);
                if self.config.enable_metrics {
                    self.stats.hits += 1;
                }
                debug!("Cache hit: {}", key);
                Some(&self.nodes[idx].value)
            }
            None => {
                if self.config.enable_metrics {
                    self.stats.misses += 1;
                }
                debug!("Cache miss: {}", key);
                None
            }
        }
    }

    /// Look up `key` without changing its recency
    pub fn peek(&self, key: &str) -> Option<&V> {
        self.map.get(key).map(|&idx| &self.nodes[idx].value)
    }

    /// Insert or overwrite `key`, making it the most recently used entry
    ///
    /// Overwriting an existing key never evicts. Inserting a new key into a
    /// full cache first evicts the least recently used entry, which is
    /// returned.
    pub fn put(&mut self, key: CacheKey, value: V) -> Option<(CacheKey, V)> {
        if let Some(&idx) = self.map.get(key.as_str()) {
            debug!("Updating existing cache entry: {}", key);
            self.nodes[idx].value = value;
            self.touch(idx);
            if self.config.enable_metrics {
                self.stats.updates += 1;
            }
            return None;
        }

        if self.config.enable_metrics {
            self.stats.insertions += 1;
        }

        if self.nodes.len() < self.config.capacity {
            debug!("Inserting new cache entry: {}", key);
            let idx = self.nodes.len();
            self.nodes.push(Node {
                key: key.clone(),
                value,
                prev: NIL,
                next: NIL,
            });
            self.map.insert(key, idx);
            self.push_front(idx);
            return None;
        }

        // Full: recycle the least recently used slot for the new key.
        let idx = self.tail;
        self.unlink(idx);
        let node = &mut self.nodes[idx];
        let evicted_key = std::mem::replace(&mut node.key, key.clone());
        let evicted_value = std::mem::replace(&mut node.value, value);
        self.map.remove(&evicted_key);
        self.map.insert(key, idx);
        self.push_front(idx);

        if self.config.enable_metrics {
            self.stats.evictions += 1;
        }
        debug!("Evicted least recently used entry: {}", evicted_key);

        Some((evicted_key, evicted_value))
    }

    /// The entry that the next eviction would remove
    pub fn peek_lru(&self) -> Option<(&str, &V)> {
        if self.tail == NIL {
            None
        } else {
            let node = &self.nodes[self.tail];
            Some((node.key.as_str(), &node.value))
        }
    }

    /// Check if a key exists in the cache (without updating recency)
    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Keys from most to least recently used
    pub fn keys(&self) -> Keys<'_, V> {
        Keys {
            nodes: &self.nodes,
            cursor: self.head,
            remaining: self.nodes.len(),
        }
    }

    /// Number of entries in cache
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if cache is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Snapshot of the cache counters
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.nodes.len(),
            ..self.stats.clone()
        }
    }

    /// Drop every entry, keeping the counters
    pub fn clear(&mut self) {
        let count = self.nodes.len();
        self.nodes.clear();
        self.map.clear();
        self.head = NIL;
        self.tail = NIL;
        info!("Cleared {} entries from cache", count);
    }

    fn touch(&mut self, idx: usize) {
        if self.head != idx {
            self.unlink(idx);
            self.push_front(idx);
        }
    }

    fn unlink(&mut self, idx: usize) {
        let prev = self.nodes[idx].prev;
        let next = self.nodes[idx].next;

        if prev == NIL {
            self.head = next;
        } else {
            self.nodes[prev].next = next;
        }

        if next == NIL {
            self.tail = prev;
        } else {
            self.nodes[next].prev = prev;
        }

        self.nodes[idx].prev = NIL;
        self.nodes[idx].next = NIL;
    }

    fn push_front(&mut self, idx: usize) {
        self.nodes[idx].prev = NIL;
        self.nodes[idx].next = self.head;

        if self.head == NIL {
            self.tail = idx;
        } else {
            self.nodes[self.head].prev = idx;
        }

        self.head = idx;
    }
}

impl<V> RecencyStore<V> for RecencyCache<V> {
    fn get(&mut self, key: &str) -> Option<&V> {
        RecencyCache::get(self, key)
    }

    fn put(&mut self, key: CacheKey, value: V) {
        RecencyCache::put(self, key, value);
    }

    fn stats(&self) -> Option<CacheStats> {
        Some(RecencyCache::stats(self))
    }
}

/// Iterator over cache keys in recency order, newest first
pub struct Keys<'a, V> {
    nodes: &'a [Node<V>],
    cursor: usize,
    remaining: usize,
}

impl<'a, V> Iterator for Keys<'a, V> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == NIL {
            return None;
        }
        let node = &self.nodes[self.cursor];
        self.cursor = node.next;
        self.remaining -= 1;
        Some(node.key.as_str())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Keys<'_, V> {}
