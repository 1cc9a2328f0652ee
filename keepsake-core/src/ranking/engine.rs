//! Engagement-weighted search over memory events

use std::cmp::Ordering;

use tracing::debug;

use super::types::{RankOptions, ScoredEvent};
use crate::schema::Event;

/// Points per view
pub const VIEW_WEIGHT: u64 = 1;

/// Points per like
pub const LIKE_WEIGHT: u64 = 2;

/// Engagement score of an event: `views * 1 + likes * 2`, saturating
pub fn engagement_score(event: &Event) -> u64 {
    event
        .views
        .saturating_mul(VIEW_WEIGHT)
        .saturating_add(event.likes.saturating_mul(LIKE_WEIGHT))
}

/// Check whether an event matches an already lower-cased query
///
/// An empty query matches everything. Otherwise the query must be a
/// substring of the lower-cased title, recipient name or occasion.
pub fn matches_query(event: &Event, normalized_query: &str) -> bool {
    normalized_query.is_empty()
        || event.title.to_lowercase().contains(normalized_query)
        || event.recipient_name.to_lowercase().contains(normalized_query)
        || event.occasion.to_lowercase().contains(normalized_query)
}

/// Total order used for results: score desc, then newest first, then id asc
pub fn compare_ranked(a: &ScoredEvent, b: &ScoredEvent) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| b.event.created_at.cmp(&a.event.created_at))
        .then_with(|| a.event.id.cmp(&b.event.id))
}

/// Filter, score and order events for a search query
///
/// Shorthand for [`EngagementRanker::rank`] with default options.
pub fn rank_events<'a, I>(events: I, query: &str) -> Vec<ScoredEvent>
where
    I: IntoIterator<Item = &'a Event>,
{
    EngagementRanker::new().rank(events, query)
}

/// Ranks events by engagement
///
/// The ranker is stateless apart from its options, so one instance can be
/// shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct EngagementRanker {
    options: RankOptions,
}

impl EngagementRanker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RankOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RankOptions {
        &self.options
    }

    /// Filter, score and order events for a search query
    ///
    /// The query is lower-cased but otherwise used as typed, so surrounding
    /// whitespace must match too. An empty query lists every event.
    /// Every result carries its real engagement score, including in the
    /// unfiltered listing. Events agreeing on score, creation time and id
    /// keep their input order.
    pub fn rank<'a, I>(&self, events: I, query: &str) -> Vec<ScoredEvent>
    where
        I: IntoIterator<Item = &'a Event>,
    {
        let normalized = query.to_lowercase();
        let owner = self.options.owner.as_deref();

        let mut ranked: Vec<ScoredEvent> = events
            .into_iter()
            .filter(|event| owner.map_or(true, |o| event.user_id == o))
            .filter(|event| matches_query(event, &normalized))
            .map(|event| ScoredEvent {
                event: event.clone(),
                score: engagement_score(event),
            })
            .collect();

        // sort_by is stable, which settles fully identical keys.
        ranked.sort_by(compare_ranked);

        if let Some(limit) = self.options.limit {
            ranked.truncate(limit);
        }

        debug!("Ranked {} events for query {:?}", ranked.len(), normalized);
        ranked
    }
}
