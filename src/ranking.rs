//! Personalized re-ranking.
//!
//! Boosts are additive and order-independent: each signal contributes a
//! fixed amount on top of the base relevance score, so the final score for
//! an item is the same regardless of the order signals are evaluated in.
//!
//! # Boost constants
//!
//! | Signal                                   | Boost |
//! |------------------------------------------|-------|
//! | Category in preferred categories         | 0.10  |
//! | Author in preferred authors              | 0.05  |
//! | Recent search appears in title or body   | 0.05  |
//! | Published within 7 days                  | 0.02  |
//! | Published within 30 days (but not 7)     | 0.01  |
//!
//! The re-sort is stable: items whose final scores tie keep their pre-boost
//! relative order, so boosting never reorders equally-boosted items
//! arbitrarily.

use chrono::{DateTime, Duration, Utc};

use crate::types::{MatchResult, Preferences, SearchableItem};

/// Boost when the item's category is one of the preferred categories.
pub const CATEGORY_BOOST: f64 = 0.10;
/// Boost when the item's author is one of the preferred authors.
pub const AUTHOR_BOOST: f64 = 0.05;
/// Boost when a recent search string occurs in the title or body,
/// case-insensitively.
pub const RECENT_SEARCH_BOOST: f64 = 0.05;
/// Recency tier boost for items published within the last 7 days.
pub const RECENT_WEEK_BOOST: f64 = 0.02;
/// Recency tier boost for items published within the last 30 days.
pub const RECENT_MONTH_BOOST: f64 = 0.01;

/// Re-scores and re-sorts results using caller-supplied preferences.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankingBooster;

impl RankingBooster {
    pub fn new() -> Self {
        RankingBooster
    }

    /// Boost against the current wall clock.
    pub fn rank(&self, results: Vec<MatchResult>, preferences: &Preferences) -> Vec<MatchResult> {
        self.rank_at(results, preferences, Utc::now())
    }

    /// Boost against an explicit `now`, for deterministic recency tiers.
    pub fn rank_at(
        &self,
        results: Vec<MatchResult>,
        preferences: &Preferences,
        now: DateTime<Utc>,
    ) -> Vec<MatchResult> {
        let mut boosted: Vec<MatchResult> = results
            .into_iter()
            .map(|mut result| {
                result.score += boost_for(&result.item, preferences, now);
                result
            })
            .collect();

        // Stable sort: equal final scores keep pre-boost order
        boosted.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        for (rank, result) in boosted.iter_mut().enumerate() {
            result.rank = rank;
        }
        boosted
    }
}

/// Sum of all applicable boosts for one item. Always non-negative.
fn boost_for(item: &SearchableItem, preferences: &Preferences, now: DateTime<Utc>) -> f64 {
    let mut boost = 0.0;

    if preferences
        .preferred_categories
        .iter()
        .any(|c| *c == item.category)
    {
        boost += CATEGORY_BOOST;
    }

    if preferences
        .preferred_authors
        .iter()
        .any(|a| *a == item.author)
    {
        boost += AUTHOR_BOOST;
    }

    if !preferences.recent_searches.is_empty() {
        let title = item.title.to_lowercase();
        let body = item.body.to_lowercase();
        let hit = preferences.recent_searches.iter().any(|search| {
            let needle = search.to_lowercase();
            !needle.is_empty() && (title.contains(&needle) || body.contains(&needle))
        });
        if hit {
            boost += RECENT_SEARCH_BOOST;
        }
    }

    boost += recency_boost(item.published_at, now);
    boost
}

/// Tiered recency boost. Items published "in the future" (clock skew
/// between writer and reader) land in the freshest tier.
fn recency_boost(published_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let age = now - published_at;
    if age < Duration::days(7) {
        RECENT_WEEK_BOOST
    } else if age < Duration::days(30) {
        RECENT_MONTH_BOOST
    } else {
        0.0
    }
}
