//! JSON input files for the CLI

use std::path::Path;

use anyhow::{Context, Result};
use keepsake_core::{normalize_photos, Event, EventRecord, Photo, PhotoRecord};
use tracing::debug;

/// Load a JSON array of events, normalizing their photos
pub fn load_events(path: &Path) -> Result<Vec<Event>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read events file {}", path.display()))?;
    parse_events(&content).with_context(|| format!("Invalid events file {}", path.display()))
}

pub fn parse_events(content: &str) -> Result<Vec<Event>> {
    let records: Vec<EventRecord> = serde_json::from_str(content)?;
    let events: Vec<Event> = records.into_iter().map(Event::from).collect();
    debug!("Parsed {} events", events.len());
    Ok(events)
}

/// Load a JSON array of raw photo records
///
/// Records without a URL are dropped; the rest get default dimensions and
/// aspect ratios where theirs are missing.
pub fn load_photos(path: &Path) -> Result<Vec<Photo>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read photos file {}", path.display()))?;
    parse_photos(&content).with_context(|| format!("Invalid photos file {}", path.display()))
}

pub fn parse_photos(content: &str) -> Result<Vec<Photo>> {
    let records: Vec<PhotoRecord> = serde_json::from_str(content)?;
    let total = records.len();
    let photos = normalize_photos(records);
    debug!("Parsed {} of {} photo records", photos.len(), total);
    Ok(photos)
}
