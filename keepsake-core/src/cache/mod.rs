//! # Bounded Recency Cache
//!
//! A fixed-capacity key/value store with least-recently-used eviction,
//! used by the serving layer to avoid re-reading hot event records from the
//! backing store.
//!
//! ## Features
//!
//! - **O(1) get/put**: hash lookup plus an index-linked recency list
//! - **Deterministic eviction**: the least recently touched key always goes first
//! - **Deletion by overwrite**: invalidate a key by storing the empty value
//! - **Metrics**: hit/miss/insert/update/eviction counters
//!
//! There is no TTL and no background eviction. The cache is not
//! synchronized; callers sharing it across threads wrap it in a mutex.
//!
//! ## Example
//!
//! ```rust
//! use keepsake_core::cache::{CacheConfig, RecencyCache};
//!
//! # fn example() -> keepsake_core::Result<()> {
//! let config = CacheConfig::builder().capacity(2).build();
//! let mut cache = RecencyCache::with_config(config)?;
//!
//! cache.put("a".to_string(), 1);
//! cache.put("b".to_string(), 2);
//! cache.get("a"); // "a" is now the most recently used
//! cache.put("c".to_string(), 3); // evicts "b"
//!
//! assert!(cache.get("b").is_none());
//! assert_eq!(cache.get("a"), Some(&1));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod config;
pub mod store;
pub mod types;

pub use config::{CacheConfig, CacheConfigBuilder, DEFAULT_CAPACITY};
pub use store::{Keys, RecencyCache};
pub use types::{CacheKey, CacheStats, RecencyStore};
