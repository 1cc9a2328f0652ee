//! Ranking module for Keepsake
//!
//! Filters events by a case-insensitive substring query over title,
//! recipient and occasion, then orders them by engagement score.

pub mod engine;
pub mod types;

pub use engine::{
    compare_ranked, engagement_score, matches_query, rank_events, EngagementRanker, LIKE_WEIGHT,
    VIEW_WEIGHT,
};
pub use types::{RankOptions, ScoredEvent};
