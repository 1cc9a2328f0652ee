//! Minimum-cost row partitioning for justified photo grids
//!
//! Photos are split into contiguous rows whose heights are chosen so every
//! row exactly fills the container width. The split minimizes the summed
//! squared deviation of row heights from a target, in the same way
//! paragraph line breaking minimizes badness: `dp[i]` holds the cheapest
//! layout of the first `i` photos and `break_at[i]` where its last row
//! starts.

use std::ops::Range;

use tracing::{debug, warn};

use super::types::LayoutRow;
use crate::error::{KeepsakeError, Result};
use crate::schema::{usable_aspect_ratio, Photo, DEFAULT_ASPECT_RATIO};

/// Row height aimed for when none is configured
pub const DEFAULT_TARGET_ROW_HEIGHT: f64 = 250.0;

/// Flat cost added to a row that is pathologically tall or short
pub const ROW_PENALTY: f64 = 100_000.0;

/// Rows taller than `target * TALL_ROW_FACTOR` are penalized
pub const TALL_ROW_FACTOR: f64 = 2.5;

/// Rows shorter than `target * SHORT_ROW_FACTOR` are penalized
pub const SHORT_ROW_FACTOR: f64 = 0.5;

/// Rendered rows taller than `target * CLAMP_FACTOR` are drawn at the target
pub const CLAMP_FACTOR: f64 = 1.5;

/// Plans justified photo rows by dynamic programming
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowLayoutPlanner {
    target_row_height: f64,
}

impl Default for RowLayoutPlanner {
    fn default() -> Self {
        Self {
            target_row_height: DEFAULT_TARGET_ROW_HEIGHT,
        }
    }
}

impl RowLayoutPlanner {
    /// Create a planner aiming for `target_row_height`
    ///
    /// Fails when the target is not a positive finite number.
    pub fn new(target_row_height: f64) -> Result<Self> {
        if !target_row_height.is_finite() || target_row_height <= 0.0 {
            return Err(KeepsakeError::ConfigError(format!(
                "target_row_height must be a positive number, got {}",
                target_row_height
            )));
        }

        Ok(Self { target_row_height })
    }

    pub fn target_row_height(&self) -> f64 {
        self.target_row_height
    }

    /// Cost of one row whose aspect ratios sum to `aspect_sum`
    ///
    /// `(height - target)^2`, plus [`ROW_PENALTY`] when the row is taller
    /// than 2.5x the target and again when it is shorter than half of it.
    pub fn row_cost(&self, aspect_sum: f64, container_width: f64) -> f64 {
        let row_height = container_width / aspect_sum;
        let deviation = row_height - self.target_row_height;
        let mut cost = deviation * deviation;

        if row_height > self.target_row_height * TALL_ROW_FACTOR {
            cost += ROW_PENALTY;
        }
        if row_height < self.target_row_height * SHORT_ROW_FACTOR {
            cost += ROW_PENALTY;
        }

        cost
    }

    /// Total cost of an arbitrary contiguous partition
    pub fn partition_cost(
        &self,
        aspect_ratios: &[f64],
        container_width: f64,
        rows: &[Range<usize>],
    ) -> f64 {
        rows.iter()
            .map(|range| {
                let sum: f64 = aspect_ratios[range.clone()].iter().copied().map(usable_aspect_ratio).sum();
                self.row_cost(sum, container_width)
            })
            .sum()
    }

    /// Row boundaries of the cheapest layout, left to right
    ///
    /// Returns an empty list for empty input or a non-positive width.
    /// Unusable aspect ratios are treated as 4:3.
    pub fn optimal_partition(&self, aspect_ratios: &[f64], container_width: f64) -> Vec<Range<usize>> {
        if aspect_ratios.is_empty() || !is_usable_width(container_width) {
            return Vec::new();
        }

        let n = aspect_ratios.len();
        let mut dp = vec![f64::INFINITY; n + 1];
        let mut break_at = vec![0usize; n + 1];
        dp[0] = 0.0;

        for i in 0..n {
            let mut aspect_sum = 0.0;

            // Grow the last row leftwards from photo i; a later start wins ties.
            for j in (0..=i).rev() {
                aspect_sum += usable_aspect_ratio(aspect_ratios[j]);
                let candidate = dp[j] + self.row_cost(aspect_sum, container_width);

                if candidate < dp[i + 1] {
                    dp[i + 1] = candidate;
                    break_at[i + 1] = j;
                }
            }
        }

        let mut rows = Vec::new();
        let mut end = n;
        while end > 0 {
            let start = break_at[end];
            rows.push(start..end);
            end = start;
        }
        rows.reverse();

        debug!(
            "Partitioned {} photos into {} rows (cost {:.2})",
            n,
            rows.len(),
            dp[n]
        );
        rows
    }

    /// Lay out photos into rows filling `container_width`
    ///
    /// Rows keep the input order and cover every photo exactly once. Each
    /// row's height is recomputed from its final members; rows that would be
    /// drawn taller than 1.5x the target are clamped to the target. An empty
    /// list or a non-positive width yields no rows.
    pub fn plan(&self, photos: &[Photo], container_width: f64) -> Vec<LayoutRow> {
        if photos.is_empty() || !is_usable_width(container_width) {
            debug!(
                "Skipping layout: {} photos, container width {}",
                photos.len(),
                container_width
            );
            return Vec::new();
        }

        let aspect_ratios: Vec<f64> = photos
            .iter()
            .map(|photo| {
                if !photo.has_valid_aspect_ratio() {
                    warn!(
                        "Photo {} has unusable aspect ratio {}, using {:.3}",
                        photo.id, photo.aspect_ratio, DEFAULT_ASPECT_RATIO
                    );
                }
                photo.effective_aspect_ratio()
            })
            .collect();

        self.optimal_partition(&aspect_ratios, container_width)
            .into_iter()
            .map(|range| {
                let aspect_sum: f64 = aspect_ratios[range.clone()].iter().sum();
                LayoutRow {
                    photos: photos[range].to_vec(),
                    height: self.rendered_height(aspect_sum, container_width),
                }
            })
            .collect()
    }

    fn rendered_height(&self, aspect_sum: f64, container_width: f64) -> f64 {
        let height = container_width / aspect_sum;
        if height > self.target_row_height * CLAMP_FACTOR {
            self.target_row_height
        } else {
            height
        }
    }
}

/// Lay out photos with the default 250-unit target row height
pub fn plan_rows(photos: &[Photo], container_width: f64) -> Vec<LayoutRow> {
    RowLayoutPlanner::default().plan(photos, container_width)
}

fn is_usable_width(width: f64) -> bool {
    width.is_finite() && width > 0.0
}
