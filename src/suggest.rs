//! Autocomplete suggestion extraction.
//!
//! Suggestions are the matched span texts themselves, harvested across all
//! results in rank order with set semantics: the first discovery of a term
//! fixes its position, later duplicates are dropped.

use std::collections::HashSet;

use crate::index::CorpusIndex;
use crate::search::QueryEngine;

/// Default number of suggestions returned.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Derive up to `limit` autocomplete terms for a query.
pub fn suggest(
    engine: &QueryEngine,
    index: &CorpusIndex,
    query: &str,
    limit: usize,
) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut suggestions: Vec<String> = Vec::new();

    for result in engine.search(index, query, crate::search::DEFAULT_LIMIT) {
        for span in result.spans {
            if suggestions.len() >= limit {
                return suggestions;
            }
            if seen.insert(span.text.clone()) {
                suggestions.push(span.text);
            }
        }
    }

    suggestions
}
