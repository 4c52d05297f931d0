//! Shared test utilities and fixtures.

#![allow(dead_code)]

use trove::CorpusIndex;

// Re-export canonical fixture builders from trove::testing
pub use trove::testing::{
    make_item, make_item_at, make_item_by, make_item_full, make_item_kind, make_item_tagged, past,
    BASE_TIME,
};

/// The three-item corpus used by the ranking and filtering scenarios:
/// a fresh TypeScript article, an old React article, and a ten-day-old
/// TypeScript article.
pub fn scenario_corpus() -> CorpusIndex {
    CorpusIndex::from_items(vec![
        make_item_at("id1", "TypeScript Basics", "TypeScript", past(0)),
        make_item_at("id2", "React Hooks", "React", past(60)),
        make_item_at("id3", "Typescript Generics", "TypeScript", past(10)),
    ])
}
