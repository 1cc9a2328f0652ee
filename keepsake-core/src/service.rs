//! Read-through serving layer over an event store
//!
//! [`GalleryService`] wires the three core components together the way the
//! web tier uses them: event lookups go through a recency cache backed by an
//! [`EventStore`], searches run the engagement ranker over the store's
//! events, and gallery pages ask the row planner for photo geometry.
//!
//! The cache is passed in by the caller rather than created here, so a test
//! can hand over a two-entry cache and watch evictions happen.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, RwLock};

use tracing::{debug, info};

use crate::cache::{CacheStats, RecencyCache, RecencyStore};
use crate::error::{KeepsakeError, Result};
use crate::layout::{LayoutRow, RowLayoutPlanner};
use crate::ranking::{EngagementRanker, RankOptions, ScoredEvent};
use crate::schema::Event;

/// Persistent storage for events
///
/// Implemented by the document store in production and by
/// [`MemoryEventStore`] in tests and the CLI.
pub trait EventStore: Send + Sync {
    /// Load one event
    fn fetch(&self, id: &str) -> Result<Option<Event>>;

    /// Load every event
    fn list(&self) -> Result<Vec<Event>>;

    /// Insert or replace an event
    fn save(&self, event: Event) -> Result<()>;

    /// Delete an event, reporting whether it existed
    fn delete(&self, id: &str) -> Result<bool>;

    /// Add one view, reporting whether the event exists
    fn increment_views(&self, id: &str) -> Result<bool>;

    /// Add one like, reporting whether the event exists
    fn increment_likes(&self, id: &str) -> Result<bool>;
}

/// In-memory [`EventStore`] that counts how often it is read
#[derive(Debug, Default)]
pub struct MemoryEventStore {
    events: RwLock<HashMap<String, Event>>,
    fetches: AtomicU64,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with events
    pub fn with_events(events: impl IntoIterator<Item = Event>) -> Self {
        let events = events.into_iter().map(|e| (e.id.clone(), e)).collect();
        Self {
            events: RwLock::new(events),
            fetches: AtomicU64::new(0),
        }
    }

    /// Number of single-event reads served so far
    pub fn fetch_count(&self) -> u64 {
        self.fetches.load(Ordering::Relaxed)
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, Event>>> {
        self.events
            .read()
            .map_err(|e| KeepsakeError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, Event>>> {
        self.events
            .write()
            .map_err(|e| KeepsakeError::LockPoisoned(e.to_string()))
    }

    fn bump(&self, id: &str, apply: impl FnOnce(&mut Event)) -> Result<bool> {
        let mut events = self.write()?;
        match events.get_mut(id) {
            Some(event) => {
                apply(event);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl EventStore for MemoryEventStore {
    fn fetch(&self, id: &str) -> Result<Option<Event>> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        Ok(self.read()?.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Event>> {
        Ok(self.read()?.values().cloned().collect())
    }

    fn save(&self, event: Event) -> Result<()> {
        self.write()?.insert(event.id.clone(), event);
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.write()?.remove(id).is_some())
    }

    fn increment_views(&self, id: &str) -> Result<bool> {
        self.bump(id, |e| e.views = e.views.saturating_add(1))
    }

    fn increment_likes(&self, id: &str) -> Result<bool> {
        self.bump(id, |e| e.likes = e.likes.saturating_add(1))
    }
}

/// Event lookups, search and layout for the web tier
///
/// Cached values are `Option<Event>`: `None` marks a tombstoned record and
/// is treated as a miss. The cache sits behind a mutex held for each single
/// `get` or `put`; the store is never called with the lock held.
pub struct GalleryService<S, C = RecencyCache<Option<Event>>> {
    store: S,
    cache: Mutex<C>,
}

impl<S, C> GalleryService<S, C>
where
    S: EventStore,
    C: RecencyStore<Option<Event>>,
{
    /// Create a service over `store`, caching through `cache`
    pub fn new(store: S, cache: C) -> Self {
        info!("Initializing gallery service");
        Self {
            store,
            cache: Mutex::new(cache),
        }
    }

    /// The backing store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetch an event, serving it from the cache when possible
    ///
    /// On a miss (or a tombstone) the event is read from the store and the
    /// cache repopulated. Unknown ids are not cached.
    pub fn get_event(&self, id: &str) -> Result<Option<Event>> {
        if let Some(Some(event)) = self.lock_cache()?.get(id) {
            debug!("Cache HIT for {}", id);
            return Ok(Some(event.clone()));
        }

        debug!("Cache MISS for {} - fetching from store", id);
        let event = self.store.fetch(id)?;
        if let Some(event) = &event {
            self.lock_cache()?.put(id.to_string(), Some(event.clone()));
        }
        Ok(event)
    }

    /// Persist an event and warm the cache with it
    pub fn save_event(&self, event: Event) -> Result<()> {
        let id = event.id.clone();
        self.store.save(event.clone())?;
        self.lock_cache()?.put(id, Some(event));
        Ok(())
    }

    /// Delete an event and tombstone its cache entry
    pub fn delete_event(&self, id: &str) -> Result<bool> {
        let deleted = self.store.delete(id)?;
        if deleted {
            self.lock_cache()?.put(id.to_string(), None);
            debug!("Deleted event {} and invalidated cache", id);
        }
        Ok(deleted)
    }

    /// Count a page view and refresh the cached copy
    pub fn record_view(&self, id: &str) -> Result<bool> {
        let found = self.store.increment_views(id)?;
        if found {
            self.refresh(id)?;
        }
        Ok(found)
    }

    /// Count a like and refresh the cached copy
    pub fn record_like(&self, id: &str) -> Result<bool> {
        let found = self.store.increment_likes(id)?;
        if found {
            self.refresh(id)?;
        }
        Ok(found)
    }

    /// Rank the store's events for a query
    pub fn search(&self, query: &str, options: &RankOptions) -> Result<Vec<ScoredEvent>> {
        let events = self.store.list()?;
        Ok(EngagementRanker::with_options(options.clone()).rank(&events, query))
    }

    /// Plan the photo rows of an event's gallery
    pub fn layout_for(
        &self,
        id: &str,
        container_width: f64,
        planner: &RowLayoutPlanner,
    ) -> Result<Vec<LayoutRow>> {
        let event = self
            .get_event(id)?
            .ok_or_else(|| KeepsakeError::NotFound(id.to_string()))?;
        Ok(planner.plan(&event.photos, container_width))
    }

    /// Cache counters, if the cache keeps any
    pub fn cache_stats(&self) -> Result<Option<CacheStats>> {
        Ok(self.lock_cache()?.stats())
    }

    fn refresh(&self, id: &str) -> Result<()> {
        if let Some(event) = self.store.fetch(id)? {
            self.lock_cache()?.put(id.to_string(), Some(event));
        }
        Ok(())
    }

    fn lock_cache(&self) -> Result<MutexGuard<'_, C>> {
        self.cache
            .lock()
            .map_err(|e| KeepsakeError::LockPoisoned(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(capacity: usize) -> GalleryService<MemoryEventStore> {
        let store = MemoryEventStore::with_events(vec![
            Event::new("e1", "Birthday Bash", "Mia", "Birthday").with_engagement(3, 1),
            Event::new("e2", "Wedding Album", "Leo", "Wedding").with_engagement(1, 0),
        ]);
        GalleryService::new(store, RecencyCache::new(capacity).unwrap())
    }

    #[test]
    fn test_read_through() {
        let svc = service(4);

        assert_eq!(svc.get_event("e1").unwrap().unwrap().id, "e1");
        assert_eq!(svc.store().fetch_count(), 1);

        // Second read is served from the cache.
        assert!(svc.get_event("e1").unwrap().is_some());
        assert_eq!(svc.store().fetch_count(), 1);

        let stats = svc.cache_stats().unwrap().unwrap();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_unknown_event_not_cached() {
        let svc = service(4);
        assert!(svc.get_event("nope").unwrap().is_none());
        assert!(svc.get_event("nope").unwrap().is_none());
        assert_eq!(svc.store().fetch_count(), 2);
        assert_eq!(svc.cache_stats().unwrap().unwrap().entries, 0);
    }

    #[test]
    fn test_delete_tombstones() {
        let svc = service(4);
        svc.get_event("e1").unwrap();

        assert!(svc.delete_event("e1").unwrap());
        assert!(svc.get_event("e1").unwrap().is_none());
        assert!(!svc.delete_event("e1").unwrap());
    }

    #[test]
    fn test_record_like_refreshes_cache() {
        let svc = service(4);
        svc.get_event("e2").unwrap();

        assert!(svc.record_like("e2").unwrap());
        let fetched_before = svc.store().fetch_count();
        let event = svc.get_event("e2").unwrap().unwrap();
        assert_eq!(event.likes, 1);
        assert_eq!(svc.store().fetch_count(), fetched_before);

        assert!(!svc.record_view("missing").unwrap());
    }

    #[test]
    fn test_layout_for_unknown_event() {
        let svc = service(4);
        let err = svc
            .layout_for("missing", 800.0, &RowLayoutPlanner::default())
            .unwrap_err();
        assert!(matches!(err, KeepsakeError::NotFound(_)));
    }
}
