//! # Keepsake core (keepsake-core)
//!
//! The ranking and layout core of the Keepsake memory-sharing site.
//!
//! ## Features
//!
//! - Bounded recency cache with O(1) get/put and LRU eviction
//! - Engagement-weighted search ranking with a deterministic total order
//! - Dynamic-programming photo row layout (justified gallery rows)
//! - Photo record normalization so layout always sees positive aspect ratios
//! - A read-through serving layer composing the three over an event store
//!
//! Every component is synchronous and does no I/O. The ranker and the
//! planner are pure; the cache is the only stateful piece and is not
//! internally synchronized.
//!
//! ## Recency Cache
//!
//! ```rust
//! use keepsake_core::RecencyCache;
//!
//! let mut cache = RecencyCache::new(2).unwrap();
//! cache.put("a".to_string(), 1);
//! cache.put("b".to_string(), 2);
//! cache.get("a");
//! cache.put("c".to_string(), 3);
//!
//! assert!(cache.get("b").is_none());
//! ```
//!
//! ## Engagement Ranking
//!
//! Score is `views * 1 + likes * 2`; ties go to the newer event, then to the
//! smaller id.
//!
//! ```rust
//! use keepsake_core::{rank_events, Event};
//!
//! let events = vec![
//!     Event::new("a", "Beach day", "Sam", "Birthday").with_engagement(10, 0),
//!     Event::new("b", "Beach party", "Kim", "Birthday").with_engagement(0, 6),
//! ];
//!
//! let ranked = rank_events(&events, "beach");
//! assert_eq!(ranked[0].event.id, "b");
//! assert_eq!(ranked[0].score, 12);
//! ```
//!
//! ## Row Layout
//!
//! ```rust
//! use keepsake_core::{Photo, RowLayoutPlanner};
//!
//! let photos = vec![
//!     Photo::with_aspect_ratio("wide", 1.5),
//!     Photo::with_aspect_ratio("square", 1.0),
//!     Photo::with_aspect_ratio("tall", 0.75),
//! ];
//!
//! let rows = RowLayoutPlanner::default().plan(&photos, 900.0);
//! let placed: usize = rows.iter().map(|r| r.photos.len()).sum();
//! assert_eq!(placed, 3);
//! ```
//!
//! ## Serving Layer
//!
//! ```rust
//! use keepsake_core::service::{GalleryService, MemoryEventStore};
//! use keepsake_core::{Event, RecencyCache};
//!
//! # fn main() -> keepsake_core::Result<()> {
//! let store = MemoryEventStore::with_events(vec![
//!     Event::new("evt-1", "Graduation", "Ana", "Graduation"),
//! ]);
//! let service = GalleryService::new(store, RecencyCache::new(50)?);
//!
//! service.get_event("evt-1")?; // miss, read from the store
//! service.get_event("evt-1")?; // hit
//! assert_eq!(service.store().fetch_count(), 1);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod error;
pub mod layout;
pub mod ranking;
pub mod schema;
pub mod service;

// Re-export main types for convenience
pub use cache::{CacheConfig, CacheConfigBuilder, CacheKey, CacheStats, RecencyCache, RecencyStore};
pub use error::{KeepsakeError, Result};
pub use layout::{plan_rows, LayoutRow, RowLayoutPlanner, DEFAULT_TARGET_ROW_HEIGHT};
pub use ranking::{engagement_score, rank_events, EngagementRanker, RankOptions, ScoredEvent};
pub use schema::{normalize_photos, Event, EventRecord, Photo, PhotoRecord, DEFAULT_ASPECT_RATIO};
pub use service::{EventStore, GalleryService, MemoryEventStore};
