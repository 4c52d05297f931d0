//! In-memory fuzzy search and ranking for content libraries.
//!
//! This crate indexes a corpus of content items (articles, newsletters,
//! trend reports), executes weighted multi-field approximate queries,
//! applies structured facet filters, re-ranks with personalization boosts,
//! extracts autocomplete suggestions, and keeps a bounded, deduplicated
//! query history with a lossless query-parameter encoding of filter state.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐    ┌──────────────┐    ┌────────────────┐
//! │  index.rs  │───▶│  search.rs   │───▶│   filter.rs    │
//! │(CorpusIndex│    │ (QueryEngine │    │(FilterPipeline)│
//! │  rebuild)  │    │  + weights)  │    │                │
//! └────────────┘    └──────┬───────┘    └───────┬────────┘
//!       │                  │                    │
//!       ▼                  ▼                    ▼
//! ┌────────────┐    ┌──────────────┐    ┌────────────────┐
//! │analytics.rs│    │  fuzzy.rs    │    │   ranking.rs   │
//! │(summarize) │    │(FuzzyMatcher │    │(RankingBooster)│
//! │            │    │    seam)     │    │                │
//! └────────────┘    └──────────────┘    └────────────────┘
//!
//! independent of the pipeline: suggest.rs, history.rs, codec.rs
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use trove::{CorpusIndex, FilterPipeline, FilterSet, QueryEngine, DEFAULT_LIMIT};
//!
//! let index = CorpusIndex::from_items(items);
//! let engine = QueryEngine::new();
//! let results = engine.search(&index, "typescript", DEFAULT_LIMIT);
//! let results = FilterPipeline::new().apply(results, &FilterSet::default())?;
//! ```
//!
//! The engine is single-threaded and synchronous by design: every operation
//! is pure in-memory computation bounded by corpus size. Callers that need
//! concurrent access must serialize writers externally.

// Module declarations
mod analytics;
pub mod codec;
mod error;
mod filter;
mod fuzzy;
mod history;
mod index;
mod ranking;
mod search;
mod suggest;
pub mod testing;
mod types;
mod utils;

// Re-exports for public API
pub use analytics::summarize;
pub use error::SearchError;
pub use filter::FilterPipeline;
pub use fuzzy::{levenshtein_within, FuzzyHit, FuzzyMatcher, SellersMatcher};
pub use history::{
    FileBackend, HistoryBackend, HistoryStore, MemoryBackend, HISTORY_CAPACITY, HISTORY_KEY,
};
pub use index::{CorpusIndex, IndexEvent, SubscriberId};
pub use ranking::{
    RankingBooster, AUTHOR_BOOST, CATEGORY_BOOST, RECENT_MONTH_BOOST, RECENT_SEARCH_BOOST,
    RECENT_WEEK_BOOST,
};
pub use search::{QueryEngine, SearchConfig, DEFAULT_LIMIT};
pub use suggest::{suggest, DEFAULT_SUGGESTION_LIMIT};
pub use types::{
    CorpusSummary, DateRange, FieldKind, FieldWeights, FilterSet, ItemType, MatchResult, MatchSpan,
    Preferences, SearchableItem,
};
pub use utils::normalize;
