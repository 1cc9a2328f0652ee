//! Integration tests for the read-through gallery service
//!
//! The service is built with small injected caches so that eviction and
//! invalidation paths run deterministically.

use anyhow::Result;
use keepsake_core::layout::RowLayoutPlanner;
use keepsake_core::ranking::RankOptions;
use keepsake_core::schema::Photo;
use keepsake_core::service::{EventStore, GalleryService, MemoryEventStore};
use keepsake_core::{Event, RecencyCache};
use std::sync::Arc;

fn seeded_store() -> MemoryEventStore {
    MemoryEventStore::with_events(vec![
        Event::new("e1", "First Steps", "Baby Lu", "Milestone")
            .with_engagement(5, 5)
            .with_photos((0..4).map(|i| Photo::with_aspect_ratio(format!("e1-{}", i), 1.0)).collect()),
        Event::new("e2", "Retirement", "Dad", "Retirement").with_engagement(40, 0),
        Event::new("e3", "Housewarming", "Priya", "Housewarming").with_engagement(1, 1),
    ])
}

#[test]
fn test_small_cache_evicts_and_refetches() -> Result<()> {
    let service = GalleryService::new(seeded_store(), RecencyCache::new(2)?);

    service.get_event("e1")?;
    service.get_event("e2")?;
    service.get_event("e1")?; // hit, refreshes e1
    service.get_event("e3")?; // evicts e2
    assert_eq!(service.store().fetch_count(), 3);

    service.get_event("e1")?; // still cached
    assert_eq!(service.store().fetch_count(), 3);

    service.get_event("e2")?; // evicted, goes back to the store
    assert_eq!(service.store().fetch_count(), 4);

    let stats = service.cache_stats()?.unwrap();
    assert_eq!(stats.evictions, 2);
    assert_eq!(stats.entries, 2);
    Ok(())
}

#[test]
fn test_save_warms_cache() -> Result<()> {
    let service = GalleryService::new(MemoryEventStore::new(), RecencyCache::new(4)?);
    service.save_event(Event::new("new", "Baby Shower", "Jo", "Shower"))?;

    let event = service.get_event("new")?.unwrap();
    assert_eq!(event.title, "Baby Shower");
    assert_eq!(service.store().fetch_count(), 0);
    Ok(())
}

#[test]
fn test_updates_overwrite_cached_copy() -> Result<()> {
    let service = GalleryService::new(seeded_store(), RecencyCache::new(4)?);
    assert_eq!(service.get_event("e3")?.unwrap().views, 1);

    service.record_view("e3")?;
    service.record_view("e3")?;
    service.record_like("e3")?;

    let event = service.get_event("e3")?.unwrap();
    assert_eq!(event.views, 3);
    assert_eq!(event.likes, 2);

    let mut edited = event.clone();
    edited.title = "New Home".to_string();
    service.save_event(edited)?;
    assert_eq!(service.get_event("e3")?.unwrap().title, "New Home");
    Ok(())
}

#[test]
fn test_deleted_event_is_not_served_from_cache() -> Result<()> {
    let service = GalleryService::new(seeded_store(), RecencyCache::new(4)?);
    service.get_event("e2")?;

    assert!(service.delete_event("e2")?);
    assert!(service.get_event("e2")?.is_none());
    assert!(service.store().fetch("e2")?.is_none());
    Ok(())
}

#[test]
fn test_search_through_service() -> Result<()> {
    let service = GalleryService::new(seeded_store(), RecencyCache::new(4)?);

    let all = service.search("", &RankOptions::new())?;
    let ids: Vec<&str> = all.iter().map(|r| r.event.id.as_str()).collect();
    assert_eq!(ids, vec!["e2", "e1", "e3"]);
    assert_eq!(all[1].score, 15);

    let found = service.search("dad", &RankOptions::new())?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].score, 40);
    Ok(())
}

#[test]
fn test_layout_through_service() -> Result<()> {
    let service = GalleryService::new(seeded_store(), RecencyCache::new(4)?);
    let planner = RowLayoutPlanner::default();

    let rows = service.layout_for("e1", 800.0, &planner)?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].photos.len(), 4);

    // No photos: nothing to lay out.
    assert!(service.layout_for("e2", 800.0, &planner)?.is_empty());
    Ok(())
}

#[test]
fn test_concurrent_lookups() -> Result<()> {
    let service = Arc::new(GalleryService::new(seeded_store(), RecencyCache::new(2)?));

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let service = Arc::clone(&service);
            std::thread::spawn(move || {
                for i in 0..50 {
                    let id = ["e1", "e2", "e3"][(t + i) % 3];
                    let event = service.get_event(id).unwrap().unwrap();
                    assert_eq!(event.id, id);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let stats = service.cache_stats()?.unwrap();
    assert_eq!(stats.hits + stats.misses, 200);
    assert!(stats.entries <= 2);
    Ok(())
}
