//! Corpus index construction and mutation.
//!
//! The index owns the items plus a precomputed, normalized copy of every
//! matchable field. Each mutation (`add`, `remove`, `update`) performs a full
//! rebuild of that matchable structure. The tradeoff is explicit: rebuilds
//! keep the code simple and are cheap at the corpus sizes this engine
//! targets (low thousands of items); incremental maintenance is out of
//! scope.
//!
//! # Invariants
//!
//! - `items.len() == field_texts.len()`, entries aligned by position.
//! - `positions` maps every item id to its position, and nothing else.
//! - Mutation is single-owner: callers needing concurrent access must
//!   serialize writers externally.

use std::collections::HashMap;

use crate::types::{FieldKind, SearchableItem};
use crate::utils::normalize;

/// Notification emitted after an effective mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexEvent {
    /// Items inserted (or replaced in place when the id already existed).
    Added(Vec<String>),
    /// Items removed, by id. Only ids actually present are reported.
    Removed(Vec<String>),
    /// A single item reindexed in place.
    Updated(String),
}

/// Handle returned by [`CorpusIndex::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// Normalized matchable text for one item, one entry per field.
#[derive(Debug, Clone, Default)]
pub(crate) struct FieldTexts {
    title: String,
    body: String,
    excerpt: String,
    tags: String,
    category: String,
    author: String,
}

impl FieldTexts {
    fn from_item(item: &SearchableItem) -> Self {
        FieldTexts {
            title: normalize(&item.title),
            body: normalize(&item.body),
            excerpt: item.excerpt.as_deref().map(normalize).unwrap_or_default(),
            tags: normalize(&item.tags.join(" ")),
            category: normalize(&item.category),
            author: normalize(&item.author),
        }
    }

    pub(crate) fn text(&self, field: FieldKind) -> &str {
        match field {
            FieldKind::Title => &self.title,
            FieldKind::Body => &self.body,
            FieldKind::Excerpt => &self.excerpt,
            FieldKind::Tags => &self.tags,
            FieldKind::Category => &self.category,
            FieldKind::Author => &self.author,
        }
    }
}

type Callback = Box<dyn FnMut(&IndexEvent)>;

/// The in-memory corpus: items in insertion order plus their matchable texts.
#[derive(Default)]
pub struct CorpusIndex {
    items: Vec<SearchableItem>,
    field_texts: Vec<FieldTexts>,
    positions: HashMap<String, usize>,
    subscribers: Vec<(SubscriberId, Callback)>,
    next_subscriber: u64,
}

impl CorpusIndex {
    /// An empty corpus.
    pub fn new() -> Self {
        CorpusIndex::default()
    }

    /// Build a corpus from an initial item list.
    pub fn from_items(items: Vec<SearchableItem>) -> Self {
        let mut index = CorpusIndex::new();
        index.insert_all(items);
        index.rebuild();
        index
    }

    /// Append items. An incoming id that already exists replaces the
    /// existing item in place, preserving id uniqueness.
    pub fn add(&mut self, items: Vec<SearchableItem>) {
        if items.is_empty() {
            return;
        }
        let ids: Vec<String> = items.iter().map(|i| i.id.clone()).collect();
        self.insert_all(items);
        self.rebuild();
        self.notify(&IndexEvent::Added(ids));
    }

    /// Remove items by id. Unknown ids are skipped; no event fires if
    /// nothing was removed.
    pub fn remove(&mut self, ids: &[&str]) {
        let removed: Vec<String> = ids
            .iter()
            .filter(|id| self.positions.contains_key(**id))
            .map(|id| (*id).to_string())
            .collect();
        if removed.is_empty() {
            return;
        }
        self.items.retain(|item| !removed.contains(&item.id));
        self.rebuild();
        self.notify(&IndexEvent::Removed(removed));
    }

    /// Reindex one item in place. An unknown id is a silent no-op; callers
    /// that want hard failures can check [`CorpusIndex::contains`] first.
    pub fn update(&mut self, item: SearchableItem) {
        let Some(&pos) = self.positions.get(&item.id) else {
            return;
        };
        let id = item.id.clone();
        self.items[pos] = item;
        self.rebuild();
        self.notify(&IndexEvent::Updated(id));
    }

    /// Register a callback fired after every effective mutation.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriberId
    where
        F: FnMut(&IndexEvent) + 'static,
    {
        let id = SubscriberId(self.next_subscriber);
        self.next_subscriber += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Drop a previously registered callback. Unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.subscribers.retain(|(sid, _)| *sid != id);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in corpus order. This order is the tie-break for equal scores.
    pub fn items(&self) -> &[SearchableItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&SearchableItem> {
        self.positions.get(id).map(|&pos| &self.items[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    /// Normalized field text for the item at `pos`.
    pub(crate) fn field_text(&self, pos: usize, field: FieldKind) -> &str {
        self.field_texts[pos].text(field)
    }

    fn insert_all(&mut self, items: Vec<SearchableItem>) {
        for item in items {
            match self.positions.get(&item.id) {
                Some(&pos) => self.items[pos] = item,
                None => {
                    self.positions.insert(item.id.clone(), self.items.len());
                    self.items.push(item);
                }
            }
        }
    }

    /// Recompute the matchable structure from scratch.
    fn rebuild(&mut self) {
        self.positions = self
            .items
            .iter()
            .enumerate()
            .map(|(pos, item)| (item.id.clone(), pos))
            .collect();
        self.field_texts = self.items.iter().map(FieldTexts::from_item).collect();
    }

    fn notify(&mut self, event: &IndexEvent) {
        for (_, callback) in &mut self.subscribers {
            callback(event);
        }
    }
}
