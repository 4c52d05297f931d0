//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical fixture builders to avoid duplication.

#![doc(hidden)]

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::types::{ItemType, SearchableItem};

/// Fixed reference instant so recency assertions are deterministic.
pub static BASE_TIME: LazyLock<DateTime<Utc>> =
    LazyLock::new(|| Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap());

/// A timestamp `days` days before [`BASE_TIME`].
pub fn past(days: i64) -> DateTime<Utc> {
    *BASE_TIME - Duration::days(days)
}

/// Create a simple test item with default fields.
///
/// This is the canonical fixture used across all tests.
pub fn make_item(id: &str, title: &str) -> SearchableItem {
    SearchableItem {
        id: id.to_string(),
        title: title.to_string(),
        body: format!("Body for {title}"),
        tags: Vec::new(),
        category: "General".to_string(),
        author: "Avery Quinn".to_string(),
        published_at: *BASE_TIME,
        kind: ItemType::Article,
        slug: id.to_string(),
        excerpt: None,
        metadata: BTreeMap::new(),
    }
}

/// Item with explicit body and category.
pub fn make_item_full(id: &str, title: &str, body: &str, category: &str) -> SearchableItem {
    SearchableItem {
        body: body.to_string(),
        category: category.to_string(),
        ..make_item(id, title)
    }
}

/// Item with an explicit publication time.
pub fn make_item_at(
    id: &str,
    title: &str,
    category: &str,
    published_at: DateTime<Utc>,
) -> SearchableItem {
    SearchableItem {
        category: category.to_string(),
        published_at,
        ..make_item(id, title)
    }
}

/// Item with tags.
pub fn make_item_tagged(id: &str, title: &str, tags: &[&str]) -> SearchableItem {
    SearchableItem {
        tags: tags.iter().map(|t| (*t).to_string()).collect(),
        ..make_item(id, title)
    }
}

/// Item with an explicit author.
pub fn make_item_by(id: &str, title: &str, author: &str) -> SearchableItem {
    SearchableItem {
        author: author.to_string(),
        ..make_item(id, title)
    }
}

/// Item with an explicit type.
pub fn make_item_kind(id: &str, title: &str, kind: ItemType) -> SearchableItem {
    SearchableItem {
        kind,
        ..make_item(id, title)
    }
}
