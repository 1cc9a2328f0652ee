//! Common types for the ranking module

use serde::{Deserialize, Serialize};

use crate::schema::Event;

/// An event paired with its engagement score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredEvent {
    /// The matched event
    pub event: Event,
    /// `views * 1 + likes * 2`
    pub score: u64,
}

/// Ranking options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankOptions {
    /// Maximum number of results (`None` keeps everything)
    #[serde(default)]
    pub limit: Option<usize>,
    /// Only rank events owned by this user
    #[serde(default)]
    pub owner: Option<String>,
}

impl RankOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }
}
