//! Query execution and relevance scoring.
//!
//! A query is normalized, tokenized, and matched against every field of
//! every item through the [`FuzzyMatcher`] seam. Each field contributes the
//! mean over query tokens of its best hit score, weighted by the field's
//! multiplier; the aggregate item score is the weighted sum, so it never
//! exceeds `FieldWeights::total()`.
//!
//! # Invariants
//!
//! - A blank query is the identity over the corpus: items come back in
//!   corpus order, truncated to the limit, score 0.0, no spans.
//! - Zero-score items are excluded. Every returned result with a non-blank
//!   query carries at least one span at or above the match threshold.
//! - The sort is stable and descending by score; ties keep corpus order.

use crate::fuzzy::{FuzzyMatcher, SellersMatcher};
use crate::index::CorpusIndex;
use crate::types::{FieldKind, FieldWeights, MatchResult, MatchSpan};
use crate::utils::{normalize, tokenize};

/// Default number of results returned by a search.
pub const DEFAULT_LIMIT: usize = 20;

/// Tunable knobs for query execution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    pub weights: FieldWeights,
    /// A field hit below this score does not count as a match.
    pub match_threshold: f64,
    /// Query tokens shorter than this are dropped to suppress noise.
    pub min_token_len: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            weights: FieldWeights::default(),
            match_threshold: 0.5,
            min_token_len: 2,
        }
    }
}

/// Executes weighted multi-field fuzzy queries over a [`CorpusIndex`].
pub struct QueryEngine {
    config: SearchConfig,
    matcher: Box<dyn FuzzyMatcher>,
}

impl Default for QueryEngine {
    fn default() -> Self {
        QueryEngine::new()
    }
}

impl QueryEngine {
    /// Engine with default config and the [`SellersMatcher`] strategy.
    pub fn new() -> Self {
        QueryEngine::with_config(SearchConfig::default())
    }

    pub fn with_config(config: SearchConfig) -> Self {
        QueryEngine {
            config,
            matcher: Box::new(SellersMatcher::new()),
        }
    }

    /// Swap the matching strategy.
    pub fn with_matcher(mut self, matcher: Box<dyn FuzzyMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run a query and return scored results, best first.
    ///
    /// A blank query returns the corpus unfiltered by relevance so that
    /// facet filtering and ranking still apply downstream. A query whose
    /// tokens are all below the minimum length matches nothing.
    pub fn search(&self, index: &CorpusIndex, query: &str, limit: usize) -> Vec<MatchResult> {
        let normalized = normalize(query);
        if normalized.is_empty() {
            return index
                .items()
                .iter()
                .take(limit)
                .enumerate()
                .map(|(rank, item)| MatchResult {
                    item: item.clone(),
                    score: 0.0,
                    spans: Vec::new(),
                    rank,
                })
                .collect();
        }

        let tokens = tokenize(&normalized, self.config.min_token_len);
        if tokens.is_empty() {
            return Vec::new();
        }

        let mut results: Vec<MatchResult> = Vec::new();
        for (pos, item) in index.items().iter().enumerate() {
            let mut score = 0.0;
            let mut spans: Vec<MatchSpan> = Vec::new();

            for field in FieldKind::ALL {
                let weight = self.config.weights.weight(field);
                if weight <= 0.0 {
                    continue;
                }
                let text = index.field_text(pos, field);
                if text.is_empty() {
                    continue;
                }

                let mut hit_total = 0.0;
                let mut matched = 0usize;
                for token in &tokens {
                    let Some(hit) = self.matcher.best_match(text, token) else {
                        continue;
                    };
                    if hit.score < self.config.match_threshold {
                        continue;
                    }
                    hit_total += hit.score;
                    matched += 1;
                    spans.push(MatchSpan {
                        field,
                        text: slice_chars(text, hit.start, hit.end),
                        start: hit.start,
                        end: hit.end,
                    });
                }

                if matched > 0 {
                    // Mean over all tokens: unmatched tokens contribute 0, so
                    // full-coverage matches beat partial ones
                    score += weight * (hit_total / tokens.len() as f64);
                }
            }

            if score > 0.0 {
                results.push(MatchResult {
                    item: item.clone(),
                    score,
                    spans,
                    rank: 0,
                });
            }
        }

        // Stable sort: equal scores keep corpus order
        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(limit);
        for (rank, result) in results.iter_mut().enumerate() {
            result.rank = rank;
        }
        results
    }
}

/// Slice a string by character positions.
fn slice_chars(text: &str, start: usize, end: usize) -> String {
    text.chars().skip(start).take(end.saturating_sub(start)).collect()
}
