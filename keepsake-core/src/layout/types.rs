//! Layout output types

use serde::{Deserialize, Serialize};

use crate::schema::Photo;

/// One row of a justified photo grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutRow {
    /// Photos in the row, in gallery order
    pub photos: Vec<Photo>,
    /// Rendered row height; each photo is `height * aspect_ratio` wide
    pub height: f64,
}

impl LayoutRow {
    /// Sum of the row's aspect ratios
    pub fn aspect_sum(&self) -> f64 {
        self.photos.iter().map(Photo::effective_aspect_ratio).sum()
    }

    /// Rendered width of the whole row
    pub fn width(&self) -> f64 {
        self.height * self.aspect_sum()
    }

    /// Rendered width of each photo
    pub fn photo_widths(&self) -> Vec<f64> {
        self.photos
            .iter()
            .map(|p| self.height * p.effective_aspect_ratio())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }
}
