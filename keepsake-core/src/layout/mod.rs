//! Justified photo-row layout
//!
//! Given photos in display order and the width of the container they are
//! shown in, [`RowLayoutPlanner`] picks the row breaks that keep every row
//! as close as possible to a target height while filling the width exactly.
//!
//! ```rust
//! use keepsake_core::layout::RowLayoutPlanner;
//! use keepsake_core::schema::Photo;
//!
//! let photos: Vec<Photo> = (0..4)
//!     .map(|i| Photo::with_aspect_ratio(format!("p{}", i), 1.0))
//!     .collect();
//!
//! let rows = RowLayoutPlanner::default().plan(&photos, 800.0);
//! assert_eq!(rows.len(), 1);
//! assert!((rows[0].height - 200.0).abs() < 1e-9);
//! ```

pub mod planner;
pub mod types;

pub use planner::{
    plan_rows, RowLayoutPlanner, CLAMP_FACTOR, DEFAULT_TARGET_ROW_HEIGHT, ROW_PENALTY,
    SHORT_ROW_FACTOR, TALL_ROW_FACTOR,
};
pub use types::LayoutRow;
