//! History store scenarios, including filesystem-backed persistence.

mod common;

use tempfile::TempDir;
use trove::{FileBackend, HistoryBackend, HistoryStore, MemoryBackend, HISTORY_CAPACITY, HISTORY_KEY};

#[test]
fn readding_a_query_moves_it_to_the_front() {
    let mut store = HistoryStore::load(MemoryBackend::new());
    store.add("a");
    store.add("b");
    store.add("a");
    assert_eq!(store.entries(), ["a", "b"]);
}

#[test]
fn history_never_exceeds_capacity() {
    let mut store = HistoryStore::load(MemoryBackend::new());
    for i in 0..100 {
        store.add(&format!("query {i}"));
        assert!(store.entries().len() <= HISTORY_CAPACITY);
    }
    assert_eq!(store.entries().len(), HISTORY_CAPACITY);
    // Most recent first
    assert_eq!(store.entries()[0], "query 99");
    assert_eq!(store.entries()[HISTORY_CAPACITY - 1], "query 80");
}

#[test]
fn file_backend_survives_reload() {
    let dir = TempDir::new().unwrap();

    let mut store = HistoryStore::load(FileBackend::new(dir.path()));
    store.add("rust generics");
    store.add("tokio");

    let reloaded = HistoryStore::load(FileBackend::new(dir.path()));
    assert_eq!(reloaded.entries(), ["tokio", "rust generics"]);
}

#[test]
fn file_backend_clear_persists() {
    let dir = TempDir::new().unwrap();

    let mut store = HistoryStore::load(FileBackend::new(dir.path()));
    store.add("one");
    store.clear();

    let reloaded = HistoryStore::load(FileBackend::new(dir.path()));
    assert!(reloaded.entries().is_empty());
}

#[test]
fn corrupt_file_payload_degrades_to_empty() {
    let dir = TempDir::new().unwrap();
    let mut backend = FileBackend::new(dir.path());
    backend.set(HISTORY_KEY, "[[[ not json").unwrap();

    let store = HistoryStore::load(FileBackend::new(dir.path()));
    assert!(store.entries().is_empty());
}

#[test]
fn missing_directory_degrades_to_empty() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("never-created");
    let store = HistoryStore::load(FileBackend::new(&missing));
    assert!(store.entries().is_empty());
}

#[test]
fn remove_is_a_no_op_for_unknown_entries() {
    let mut store = HistoryStore::load(MemoryBackend::new());
    store.add("kept");
    store.remove("unknown");
    assert_eq!(store.entries(), ["kept"]);
}
