//! Record types shared by the cache, the ranker and the layout planner
//!
//! Raw records coming from upload or storage ([`EventRecord`], [`PhotoRecord`])
//! are normalized here so that every [`Photo`] reaching the layout planner has
//! a positive aspect ratio.

pub mod event;
pub mod photo;

pub use event::{Event, EventRecord};
pub use photo::{
    normalize_photos, usable_aspect_ratio, Photo, PhotoRecord, DEFAULT_ASPECT_RATIO,
    DEFAULT_PHOTO_HEIGHT, DEFAULT_PHOTO_WIDTH,
};
