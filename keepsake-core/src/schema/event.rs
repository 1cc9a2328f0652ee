//! Memory event records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::photo::{normalize_photos, Photo, PhotoRecord};

/// A shared memory page: an occasion, its recipient and the photos on it
///
/// The core only reads events. Counters are changed by the backing store
/// and the updated record is written back through the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique event identifier
    #[serde(alias = "_id")]
    pub id: String,
    /// Owner of the event
    #[serde(default)]
    pub user_id: String,
    /// Page title
    pub title: String,
    /// Who the page is for
    pub recipient_name: String,
    /// Occasion label, e.g. "Birthday"
    pub occasion: String,
    /// Free-form message shown on the page
    #[serde(default)]
    pub message: String,
    /// Normalized photos in display order
    #[serde(default)]
    pub photos: Vec<Photo>,
    /// Number of page views
    #[serde(default)]
    pub views: u64,
    /// Number of likes
    #[serde(default)]
    pub likes: u64,
    /// Creation time, stored as epoch milliseconds
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Create an event with zeroed counters, created now
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        recipient_name: impl Into<String>,
        occasion: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: String::new(),
            title: title.into(),
            recipient_name: recipient_name.into(),
            occasion: occasion.into(),
            message: String::new(),
            photos: Vec::new(),
            views: 0,
            likes: 0,
            created_at: Utc::now(),
        }
    }

    /// Set the owner
    pub fn with_owner(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Set the engagement counters
    pub fn with_engagement(mut self, views: u64, likes: u64) -> Self {
        self.views = views;
        self.likes = likes;
        self
    }

    /// Set the creation time
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Set the photos
    pub fn with_photos(mut self, photos: Vec<Photo>) -> Self {
        self.photos = photos;
        self
    }

    /// Set the message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

/// An event as submitted by a client or read from storage, photos unchecked
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub title: String,
    pub recipient_name: String,
    pub occasion: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub photos: Vec<PhotoRecord>,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl EventRecord {
    /// Normalize the photo list and produce an [`Event`]
    pub fn into_event(self) -> Event {
        Event {
            id: self.id,
            user_id: self.user_id,
            title: self.title,
            recipient_name: self.recipient_name,
            occasion: self.occasion,
            message: self.message,
            photos: normalize_photos(self.photos),
            views: self.views,
            likes: self.likes,
            created_at: self.created_at,
        }
    }
}

impl From<EventRecord> for Event {
    fn from(record: EventRecord) -> Self {
        record.into_event()
    }
}
