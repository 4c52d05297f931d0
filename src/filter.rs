//! Structured facet filtering.
//!
//! Predicates are AND-combined across filter fields; absent fields impose no
//! constraint, so the default [`FilterSet`] is the identity transform. The
//! filter is validated once per application: an inverted date range or an
//! empty tag list is an explicit error value, never a silent match-nothing.

use crate::error::SearchError;
use crate::types::{FilterSet, MatchResult, SearchableItem};

/// Applies validated facet filters to result sets.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterPipeline;

impl FilterPipeline {
    pub fn new() -> Self {
        FilterPipeline
    }

    /// Filter scored results, preserving their relative order and
    /// reassigning ranks. Applying an empty filter returns the input
    /// unchanged apart from rank restamping.
    pub fn apply(
        &self,
        results: Vec<MatchResult>,
        filter: &FilterSet,
    ) -> Result<Vec<MatchResult>, SearchError> {
        validate(filter)?;
        let mut kept: Vec<MatchResult> = results
            .into_iter()
            .filter(|result| matches_validated(&result.item, filter))
            .collect();
        for (rank, result) in kept.iter_mut().enumerate() {
            result.rank = rank;
        }
        Ok(kept)
    }

    /// Predicate form for the no-query path and for reuse by callers that
    /// filter raw items.
    pub fn item_matches(
        &self,
        item: &SearchableItem,
        filter: &FilterSet,
    ) -> Result<bool, SearchError> {
        validate(filter)?;
        Ok(matches_validated(item, filter))
    }
}

fn validate(filter: &FilterSet) -> Result<(), SearchError> {
    if let Some(range) = &filter.date_range {
        if range.start > range.end {
            return Err(SearchError::InvalidDateRange {
                start: range.start,
                end: range.end,
            });
        }
    }
    if let Some(tags) = &filter.tags {
        if tags.is_empty() {
            return Err(SearchError::EmptyTagFilter);
        }
    }
    Ok(())
}

fn matches_validated(item: &SearchableItem, filter: &FilterSet) -> bool {
    if let Some(category) = &filter.category {
        if item.category != *category {
            return false;
        }
    }
    if let Some(kind) = filter.kind {
        if item.kind != kind {
            return false;
        }
    }
    if let Some(author) = &filter.author {
        if item.author != *author {
            return false;
        }
    }
    if let Some(tags) = &filter.tags {
        // OR semantics within the tag list: any shared tag keeps the item
        if !tags.iter().any(|tag| item.tags.contains(tag)) {
            return false;
        }
    }
    if let Some(range) = &filter.date_range {
        if !range.contains(item.published_at) {
            return false;
        }
    }
    true
}
