//! Property-based tests using proptest.
//!
//! These exercise the laws the engine promises: codec round-trips, history
//! bounds and dedup, blank-query identity, search soundness, and boost
//! monotonicity, for randomly generated inputs.

mod common;

use chrono::{TimeZone, Utc};
use common::{make_item, past, BASE_TIME};
use proptest::prelude::*;
use trove::codec::{decode, encode};
use trove::{
    CorpusIndex, DateRange, FilterPipeline, FilterSet, HistoryStore, ItemType, MatchResult,
    MemoryBackend, Preferences, QueryEngine, RankingBooster, HISTORY_CAPACITY,
};

// ============================================================================
// STRATEGIES
// ============================================================================

fn word_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{2,8}").unwrap()
}

fn title_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(word_strategy(), 1..4).prop_map(|words| words.join(" "))
}

fn corpus_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(title_strategy(), 1..8)
}

fn item_type_strategy() -> impl Strategy<Value = ItemType> {
    prop::sample::select(vec![ItemType::Article, ItemType::Newsletter, ItemType::Trend])
}

fn datetime_strategy() -> impl Strategy<Value = chrono::DateTime<Utc>> {
    // Whole seconds only: RFC 3339 text keeps full precision either way,
    // this just makes failure output readable
    (1_500_000_000i64..1_900_000_000i64)
        .prop_map(|secs| Utc.timestamp_opt(secs, 0).single().unwrap())
}

fn date_range_strategy() -> impl Strategy<Value = DateRange> {
    (datetime_strategy(), datetime_strategy()).prop_map(|(a, b)| DateRange {
        start: a.min(b),
        end: a.max(b),
    })
}

fn filter_strategy() -> impl Strategy<Value = FilterSet> {
    (
        prop::option::of(word_strategy()),
        prop::option::of(item_type_strategy()),
        prop::option::of(word_strategy()),
        prop::option::of(prop::collection::vec(word_strategy(), 1..4)),
        prop::option::of(date_range_strategy()),
    )
        .prop_map(|(category, kind, author, tags, date_range)| FilterSet {
            category,
            kind,
            author,
            tags,
            date_range,
        })
}

fn build_corpus(titles: &[String]) -> CorpusIndex {
    let items = titles
        .iter()
        .enumerate()
        .map(|(i, title)| make_item(&format!("item-{i}"), title))
        .collect();
    CorpusIndex::from_items(items)
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #[test]
    fn codec_round_trip_law(filter in filter_strategy()) {
        let pairs = encode(&filter);
        let decoded = decode(pairs.iter().map(|(k, v)| (*k, v.as_str()))).unwrap();
        prop_assert_eq!(decoded, filter);
    }

    #[test]
    fn history_is_bounded_and_deduplicated(queries in prop::collection::vec(word_strategy(), 0..60)) {
        let mut store = HistoryStore::load(MemoryBackend::new());
        for query in &queries {
            store.add(query);
            prop_assert!(store.entries().len() <= HISTORY_CAPACITY);
        }
        let entries = store.entries();
        for (i, entry) in entries.iter().enumerate() {
            prop_assert!(!entries[i + 1..].contains(entry), "duplicate entry {entry}");
        }
    }

    #[test]
    fn readding_moves_to_front_without_growth(queries in prop::collection::vec(word_strategy(), 1..20)) {
        let mut store = HistoryStore::load(MemoryBackend::new());
        for query in &queries {
            store.add(query);
        }
        let len_before = store.entries().len();
        let repeat = &queries[queries.len() / 2];
        store.add(repeat);
        prop_assert_eq!(store.entries().len(), len_before);
        prop_assert_eq!(&store.entries()[0], repeat);
    }

    #[test]
    fn blank_query_is_the_corpus_in_order(titles in corpus_strategy(), limit in 1usize..10) {
        let index = build_corpus(&titles);
        let results = QueryEngine::new().search(&index, "", limit);
        prop_assert_eq!(results.len(), titles.len().min(limit));
        for (i, result) in results.iter().enumerate() {
            prop_assert_eq!(&result.item.id, &index.items()[i].id);
            prop_assert_eq!(result.rank, i);
        }
    }

    #[test]
    fn search_results_always_carry_evidence(titles in corpus_strategy(), query in word_strategy()) {
        let index = build_corpus(&titles);
        let engine = QueryEngine::new();
        for result in engine.search(&index, &query, 50) {
            prop_assert!(result.score > 0.0);
            prop_assert!(!result.spans.is_empty());
            prop_assert!(result.score <= engine.config().weights.total() + 1e-9);
        }
    }

    #[test]
    fn search_order_is_descending_and_ranks_are_dense(
        titles in corpus_strategy(),
        query in word_strategy(),
    ) {
        let index = build_corpus(&titles);
        let results = QueryEngine::new().search(&index, &query, 50);
        for window in results.windows(2) {
            prop_assert!(window[0].score >= window[1].score);
        }
        for (i, result) in results.iter().enumerate() {
            prop_assert_eq!(result.rank, i);
        }
    }

    #[test]
    fn boosting_never_lowers_a_score(
        titles in corpus_strategy(),
        categories in prop::collection::vec(word_strategy(), 0..3),
        searches in prop::collection::vec(word_strategy(), 0..3),
    ) {
        let index = build_corpus(&titles);
        let results = QueryEngine::new().search(&index, "", 50);
        let base: Vec<(String, f64)> = results
            .iter()
            .map(|r| (r.item.id.clone(), r.score))
            .collect();

        let preferences = Preferences {
            preferred_categories: categories,
            preferred_authors: Vec::new(),
            recent_searches: searches,
        };
        let ranked = RankingBooster::new().rank_at(results, &preferences, *BASE_TIME);
        for result in &ranked {
            let (_, before) = base
                .iter()
                .find(|(id, _)| *id == result.item.id)
                .expect("item survived ranking");
            prop_assert!(result.score >= *before);
        }
    }

    #[test]
    fn identity_filter_preserves_results(titles in corpus_strategy(), query in word_strategy()) {
        let index = build_corpus(&titles);
        let results = QueryEngine::new().search(&index, &query, 50);
        let expected: Vec<String> = results.iter().map(|r| r.item.id.clone()).collect();
        let filtered = FilterPipeline::new()
            .apply(results, &FilterSet::default())
            .unwrap();
        let got: Vec<String> = filtered.iter().map(|r| r.item.id.clone()).collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn equal_boosts_preserve_relative_order(titles in corpus_strategy()) {
        let index = build_corpus(&titles);
        // Uniform base scores and uniform publication dates: nothing may move
        let results: Vec<MatchResult> = index
            .items()
            .iter()
            .enumerate()
            .map(|(rank, item)| MatchResult {
                item: item.clone(),
                score: 0.25,
                spans: Vec::new(),
                rank,
            })
            .collect();
        let before: Vec<String> = results.iter().map(|r| r.item.id.clone()).collect();
        let ranked = RankingBooster::new().rank_at(results, &Preferences::default(), past(0));
        let after: Vec<String> = ranked.iter().map(|r| r.item.id.clone()).collect();
        prop_assert_eq!(after, before);
    }
}
