//! Corpus-wide facet frequency counts.

use crate::index::CorpusIndex;
use crate::types::CorpusSummary;

/// Summarize a corpus in one linear pass.
///
/// Each item increments exactly one counter per dimension, so every count
/// map sums to `total_items`.
pub fn summarize(index: &CorpusIndex) -> CorpusSummary {
    let mut summary = CorpusSummary {
        total_items: index.len(),
        ..CorpusSummary::default()
    };

    for item in index.items() {
        *summary
            .category_counts
            .entry(item.category.clone())
            .or_insert(0) += 1;
        *summary
            .type_counts
            .entry(item.kind.as_str().to_string())
            .or_insert(0) += 1;
        *summary
            .author_counts
            .entry(item.author.clone())
            .or_insert(0) += 1;
    }

    summary
}
