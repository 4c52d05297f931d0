//! The building blocks of the search engine.
//!
//! These types define how corpus items, filters, and scored results fit
//! together. Everything here is plain data; behavior lives in the modules
//! that consume them.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **SearchableItem**: `id` is unique within a corpus. `CorpusIndex`
//!   enforces this on every mutation; an incoming duplicate replaces the
//!   existing item rather than shadowing it.
//!
//! - **DateRange**: `start <= end`. Validated by `FilterPipeline` and
//!   `FilterCodec` rather than at construction, so a deserialized range is
//!   checked exactly once on the path that uses it.
//!
//! - **MatchResult**: `rank` is the 0-based position after the final sort of
//!   whichever stage produced it. Each stage (search, filter, rank) restamps
//!   ranks; a stale result from before an index mutation is a snapshot, not
//!   a dangling reference.
//!
//! - **FilterSet**: the default value matches every item and is the identity
//!   element for filter application.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Kind of content an item holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Article,
    Newsletter,
    Trend,
}

impl ItemType {
    /// Convert to lowercase string representation.
    ///
    /// Matches the serde `rename_all = "lowercase"` convention.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Article => "article",
            ItemType::Newsletter => "newsletter",
            ItemType::Trend => "trend",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "article" => Ok(ItemType::Article),
            "newsletter" => Ok(ItemType::Newsletter),
            "trend" => Ok(ItemType::Trend),
            other => Err(SearchError::UnknownItemType(other.to_string())),
        }
    }
}

/// What users search over: one content item with its facet metadata.
///
/// The `id` is the stable handle for `remove` and `update`; everything else
/// is matchable text or facet data. Items are immutable once indexed except
/// through `CorpusIndex::update`, which reindexes in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchableItem {
    pub id: String,
    pub title: String,
    pub body: String,
    /// Tag list with set semantics; order is not significant.
    #[serde(default)]
    pub tags: Vec<String>,
    pub category: String,
    pub author: String,
    pub published_at: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: ItemType,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    /// Free-form metadata, carried through untouched.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

/// Which field of an item a match span points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Title,
    Body,
    Excerpt,
    Tags,
    Category,
    Author,
}

impl FieldKind {
    /// All matchable fields, in weight order.
    pub const ALL: [FieldKind; 6] = [
        FieldKind::Title,
        FieldKind::Body,
        FieldKind::Excerpt,
        FieldKind::Tags,
        FieldKind::Category,
        FieldKind::Author,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Title => "title",
            FieldKind::Body => "body",
            FieldKind::Excerpt => "excerpt",
            FieldKind::Tags => "tags",
            FieldKind::Category => "category",
            FieldKind::Author => "author",
        }
    }
}

/// Per-field multipliers controlling each field's contribution to an item's
/// aggregate relevance score.
///
/// The defaults sum to 1.0. They are tunable constants, not a correctness
/// requirement; the engine only assumes they are non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldWeights {
    pub title: f64,
    pub body: f64,
    pub excerpt: f64,
    pub tags: f64,
    pub category: f64,
    pub author: f64,
}

impl FieldWeights {
    /// Weight for a single field.
    pub fn weight(&self, field: FieldKind) -> f64 {
        match field {
            FieldKind::Title => self.title,
            FieldKind::Body => self.body,
            FieldKind::Excerpt => self.excerpt,
            FieldKind::Tags => self.tags,
            FieldKind::Category => self.category,
            FieldKind::Author => self.author,
        }
    }

    /// Sum of all field weights. An item's aggregate score never exceeds this.
    pub fn total(&self) -> f64 {
        FieldKind::ALL.iter().map(|f| self.weight(*f)).sum()
    }
}

impl Default for FieldWeights {
    fn default() -> Self {
        FieldWeights {
            title: 0.30,
            body: 0.20,
            excerpt: 0.20,
            tags: 0.15,
            category: 0.10,
            author: 0.05,
        }
    }
}

/// Where in a field the query matched.
///
/// Offsets are character positions into the *normalized* field text, and
/// `text` is the matched slice of that normalized text. Used for highlighting
/// and for harvesting autocomplete suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSpan {
    pub field: FieldKind,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// A scored search hit.
///
/// Holds an owned snapshot of the item so results stay valid across index
/// mutations. Recompute the search to observe a mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub item: SearchableItem,
    /// Aggregate relevance score; higher is more relevant.
    pub score: f64,
    /// Match spans in field order, empty for a blank query.
    pub spans: Vec<MatchSpan>,
    /// 0-based position after the producing stage's final sort.
    pub rank: usize,
}

/// Inclusive publication-date window.
///
/// Invariant: `start <= end`. Checked by the consumers, see the module docs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Inclusive containment on both ends.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}

/// Structured facet filter. Absent fields impose no constraint.
///
/// Predicates are AND-combined across fields; the tag list is OR-combined
/// within itself (non-empty intersection with the item's tags).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ItemType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Must be non-empty when present; an empty list is a validation error,
    /// not a match-nothing filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
}

impl FilterSet {
    /// True when no field constrains anything.
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.kind.is_none()
            && self.author.is_none()
            && self.tags.is_none()
            && self.date_range.is_none()
    }
}

/// Personalization signals consumed by the ranking booster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default)]
    pub preferred_categories: Vec<String>,
    #[serde(default)]
    pub preferred_authors: Vec<String>,
    #[serde(default)]
    pub recent_searches: Vec<String>,
}

/// Corpus-wide facet frequency counts.
///
/// `BTreeMap` keeps iteration deterministic for display and snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusSummary {
    pub total_items: usize,
    pub category_counts: BTreeMap<String, usize>,
    pub type_counts: BTreeMap<String, usize>,
    pub author_counts: BTreeMap<String, usize>,
}
