//! Photo metadata and normalization of raw upload records

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Aspect ratio assumed when a photo carries no usable dimensions
pub const DEFAULT_ASPECT_RATIO: f64 = 4.0 / 3.0;

/// Width assigned to a photo record that does not report one
pub const DEFAULT_PHOTO_WIDTH: u32 = 1000;

/// Height assigned to a photo record that does not report one
pub const DEFAULT_PHOTO_HEIGHT: u32 = 750;

/// A photo ready for layout
///
/// `aspect_ratio` is the only field the layout planner reads; the rest is
/// carried through to the rendering layer untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    /// Unique photo identifier
    pub id: String,
    /// Location of the image
    pub url: String,
    /// Pixel width
    pub width: u32,
    /// Pixel height
    pub height: u32,
    /// Width divided by height
    pub aspect_ratio: f64,
    /// Optional caption shown under the image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl Photo {
    /// Create a photo from its pixel dimensions, deriving the aspect ratio
    pub fn new(url: impl Into<String>, width: u32, height: u32) -> Self {
        let aspect_ratio = ratio_of(Some(width), Some(height)).unwrap_or(DEFAULT_ASPECT_RATIO);
        Self {
            id: Uuid::new_v4().to_string(),
            url: url.into(),
            width,
            height,
            aspect_ratio,
            caption: None,
        }
    }

    /// Create a photo that only knows its aspect ratio
    ///
    /// Pixel dimensions are filled with the upload defaults.
    pub fn with_aspect_ratio(id: impl Into<String>, aspect_ratio: f64) -> Self {
        Self {
            id: id.into(),
            url: String::new(),
            width: DEFAULT_PHOTO_WIDTH,
            height: DEFAULT_PHOTO_HEIGHT,
            aspect_ratio,
            caption: None,
        }
    }

    /// Attach a caption
    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Check whether the aspect ratio can be fed to the layout planner
    pub fn has_valid_aspect_ratio(&self) -> bool {
        is_usable_ratio(self.aspect_ratio)
    }

    /// Aspect ratio with the 4:3 fallback applied to unusable values
    pub fn effective_aspect_ratio(&self) -> f64 {
        usable_aspect_ratio(self.aspect_ratio)
    }
}

/// A photo record as it arrives from upload or storage
///
/// Every field may be missing. [`PhotoRecord::normalize`] turns it into a
/// [`Photo`] whose aspect ratio is always positive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub aspect_ratio: Option<f64>,
    #[serde(default)]
    pub caption: Option<String>,
}

impl PhotoRecord {
    /// Normalize into a [`Photo`]
    ///
    /// Returns `None` for records without a URL, which cannot be displayed.
    /// Zero or missing dimensions fall back to 1000x750. A missing or
    /// unusable aspect ratio is derived from the supplied dimensions when
    /// both are present, otherwise it falls back to 4:3.
    pub fn normalize(self) -> Option<Photo> {
        let url = match self.url {
            Some(url) if !url.trim().is_empty() => url,
            _ => {
                debug!("Dropping photo record without url: {:?}", self.id);
                return None;
            }
        };

        let aspect_ratio = self
            .aspect_ratio
            .filter(|r| is_usable_ratio(*r))
            .or_else(|| ratio_of(self.width, self.height))
            .unwrap_or(DEFAULT_ASPECT_RATIO);

        Some(Photo {
            id: self
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            url,
            width: self.width.filter(|w| *w > 0).unwrap_or(DEFAULT_PHOTO_WIDTH),
            height: self.height.filter(|h| *h > 0).unwrap_or(DEFAULT_PHOTO_HEIGHT),
            aspect_ratio,
            caption: self.caption.filter(|c| !c.is_empty()),
        })
    }
}

impl From<Photo> for PhotoRecord {
    fn from(photo: Photo) -> Self {
        Self {
            id: Some(photo.id),
            url: Some(photo.url),
            width: Some(photo.width),
            height: Some(photo.height),
            aspect_ratio: Some(photo.aspect_ratio),
            caption: photo.caption,
        }
    }
}

/// Normalize a batch of raw records, dropping the ones that cannot be shown
pub fn normalize_photos(records: impl IntoIterator<Item = PhotoRecord>) -> Vec<Photo> {
    records
        .into_iter()
        .filter_map(PhotoRecord::normalize)
        .collect()
}

/// `ratio` if it is positive and finite, otherwise 4:3
pub fn usable_aspect_ratio(ratio: f64) -> f64 {
    if is_usable_ratio(ratio) {
        ratio
    } else {
        DEFAULT_ASPECT_RATIO
    }
}

fn is_usable_ratio(ratio: f64) -> bool {
    ratio.is_finite() && ratio > 0.0
}

fn ratio_of(width: Option<u32>, height: Option<u32>) -> Option<f64> {
    match (width, height) {
        (Some(w), Some(h)) if w > 0 && h > 0 => Some(w as f64 / h as f64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_new_derives_ratio() {
        let photo = Photo::new("https://img/1.jpg", 1600, 900);
        assert!((photo.aspect_ratio - 16.0 / 9.0).abs() < 1e-12);
        assert!(!photo.id.is_empty());
    }

    #[test]
    fn test_photo_new_zero_height_uses_default_ratio() {
        let photo = Photo::new("https://img/1.jpg", 1600, 0);
        assert_eq!(photo.aspect_ratio, DEFAULT_ASPECT_RATIO);
    }

    #[test]
    fn test_effective_aspect_ratio() {
        assert_eq!(Photo::with_aspect_ratio("a", 1.5).effective_aspect_ratio(), 1.5);
        assert_eq!(
            Photo::with_aspect_ratio("b", 0.0).effective_aspect_ratio(),
            DEFAULT_ASPECT_RATIO
        );
        assert_eq!(
            Photo::with_aspect_ratio("c", f64::NAN).effective_aspect_ratio(),
            DEFAULT_ASPECT_RATIO
        );
        assert_eq!(
            Photo::with_aspect_ratio("d", -2.0).effective_aspect_ratio(),
            DEFAULT_ASPECT_RATIO
        );
    }

    #[test]
    fn test_normalize_defaults() {
        let record = PhotoRecord {
            url: Some("https://img/2.jpg".to_string()),
            ..Default::default()
        };

        let photo = record.normalize().unwrap();
        assert_eq!(photo.width, DEFAULT_PHOTO_WIDTH);
        assert_eq!(photo.height, DEFAULT_PHOTO_HEIGHT);
        assert_eq!(photo.aspect_ratio, DEFAULT_ASPECT_RATIO);
        assert!(!photo.id.is_empty());
        assert!(photo.caption.is_none());
    }

    #[test]
    fn test_normalize_derives_ratio_from_dimensions() {
        let record = PhotoRecord {
            url: Some("https://img/3.jpg".to_string()),
            width: Some(600),
            height: Some(900),
            ..Default::default()
        };

        let photo = record.normalize().unwrap();
        assert!((photo.aspect_ratio - 600.0 / 900.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_only_one_dimension() {
        let record = PhotoRecord {
            url: Some("https://img/4.jpg".to_string()),
            width: Some(600),
            ..Default::default()
        };

        let photo = record.normalize().unwrap();
        assert_eq!(photo.width, 600);
        assert_eq!(photo.height, DEFAULT_PHOTO_HEIGHT);
        assert_eq!(photo.aspect_ratio, DEFAULT_ASPECT_RATIO);
    }

    #[test]
    fn test_normalize_keeps_explicit_ratio() {
        let record = PhotoRecord {
            id: Some("p-1".to_string()),
            url: Some("https://img/5.jpg".to_string()),
            width: Some(100),
            height: Some(100),
            aspect_ratio: Some(2.0),
            caption: Some("Beach".to_string()),
        };

        let photo = record.normalize().unwrap();
        assert_eq!(photo.id, "p-1");
        assert_eq!(photo.aspect_ratio, 2.0);
        assert_eq!(photo.caption.as_deref(), Some("Beach"));
    }

    #[test]
    fn test_normalize_replaces_invalid_ratio() {
        let record = PhotoRecord {
            url: Some("https://img/6.jpg".to_string()),
            aspect_ratio: Some(0.0),
            width: Some(300),
            height: Some(200),
            ..Default::default()
        };

        let photo = record.normalize().unwrap();
        assert!((photo.aspect_ratio - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_drops_missing_url() {
        assert!(PhotoRecord::default().normalize().is_none());

        let blank = PhotoRecord {
            url: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(blank.normalize().is_none());
    }

    #[test]
    fn test_normalize_photos_batch() {
        let records = vec![
            PhotoRecord {
                url: Some("a".to_string()),
                ..Default::default()
            },
            PhotoRecord::default(),
            PhotoRecord {
                url: Some("c".to_string()),
                ..Default::default()
            },
        ];

        let photos = normalize_photos(records);
        assert_eq!(photos.len(), 2);
        assert_eq!(photos[0].url, "a");
        assert_eq!(photos[1].url, "c");
    }

    #[test]
    fn test_photo_record_json_camel_case() {
        let json = r#"{"url":"x.jpg","width":400,"height":300,"aspectRatio":1.25}"#;
        let record: PhotoRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.aspect_ratio, Some(1.25));
        assert!(record.id.is_none());
    }

    #[test]
    fn test_usable_aspect_ratio() {
        assert_eq!(usable_aspect_ratio(1.5), 1.5);
        assert_eq!(usable_aspect_ratio(0.0), DEFAULT_ASPECT_RATIO);
        assert_eq!(usable_aspect_ratio(-2.0), DEFAULT_ASPECT_RATIO);
        assert_eq!(usable_aspect_ratio(f64::NAN), DEFAULT_ASPECT_RATIO);
        assert_eq!(usable_aspect_ratio(f64::INFINITY), DEFAULT_ASPECT_RATIO);
    }

    #[test]
    fn test_photo_survives_record_round_trip() {
        let photo = Photo::new("https://img/2.jpg", 800, 1200).caption("Cake time");
        assert_eq!(photo.caption.as_deref(), Some("Cake time"));

        let record = PhotoRecord::from(photo.clone());
        assert_eq!(record.url.as_deref(), Some("https://img/2.jpg"));
        assert_eq!(record.normalize(), Some(photo));
    }
}
