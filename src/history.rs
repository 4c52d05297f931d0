//! Bounded, deduplicated query history with synchronous persistence.
//!
//! The store keeps at most [`HISTORY_CAPACITY`] distinct query strings,
//! most-recent-first. Re-adding an existing query moves it to the front
//! without growing the list. Every effective mutation persists the full
//! list through a [`HistoryBackend`] before returning.
//!
//! Persistence is deliberately forgiving: a missing key, an unreadable
//! backend, or a corrupt payload at load time degrades to an empty history
//! with a warning. History must never abort a search.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::warn;

use crate::error::SearchError;

/// Storage key under which the history payload lives.
pub const HISTORY_KEY: &str = "search_history";

/// Maximum number of entries retained.
pub const HISTORY_CAPACITY: usize = 20;

/// Synchronous key-value persistence seam.
///
/// The engine treats the store as local and synchronous; the payload under
/// [`HISTORY_KEY`] is a JSON array of strings.
pub trait HistoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, SearchError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), SearchError>;
}

/// In-memory backend, mainly for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        MemoryBackend::default()
    }

    /// Seed a key before constructing a store, e.g. to simulate an existing
    /// or corrupt payload.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut backend = MemoryBackend::new();
        backend.entries.insert(key.to_string(), value.to_string());
        backend
    }
}

impl HistoryBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, SearchError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SearchError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileBackend { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl HistoryBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>, SearchError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(SearchError::Storage(err.to_string())),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SearchError> {
        fs::create_dir_all(&self.dir).map_err(|err| SearchError::Storage(err.to_string()))?;
        fs::write(self.path_for(key), value).map_err(|err| SearchError::Storage(err.to_string()))
    }
}

/// Bounded most-recent-first query log.
pub struct HistoryStore<B: HistoryBackend> {
    backend: B,
    entries: Vec<String>,
}

impl<B: HistoryBackend> HistoryStore<B> {
    /// Load from the backend. Any failure to read or parse the payload is
    /// recovered as an empty history.
    pub fn load(backend: B) -> Self {
        let entries = match backend.get(HISTORY_KEY) {
            Ok(Some(payload)) => match serde_json::from_str::<Vec<String>>(&payload) {
                Ok(mut entries) => {
                    entries.truncate(HISTORY_CAPACITY);
                    entries
                }
                Err(err) => {
                    warn!(%err, "corrupt history payload, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(%err, "history backend unreadable, starting empty");
                Vec::new()
            }
        };
        HistoryStore { backend, entries }
    }

    /// Record a query at the front. Blank input is ignored; an existing
    /// equal entry moves to the front instead of duplicating.
    pub fn add(&mut self, query: &str) {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return;
        }
        self.entries.retain(|entry| entry != trimmed);
        self.entries.insert(0, trimmed.to_string());
        self.entries.truncate(HISTORY_CAPACITY);
        self.persist();
    }

    /// Remove one entry if present.
    pub fn remove(&mut self, query: &str) {
        let before = self.entries.len();
        self.entries.retain(|entry| entry != query);
        if self.entries.len() != before {
            self.persist();
        }
    }

    pub fn clear(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.entries.clear();
        self.persist();
    }

    /// Entries most-recent-first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    fn persist(&mut self) {
        let payload = match serde_json::to_string(&self.entries) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(%err, "failed to serialize history");
                return;
            }
        };
        if let Err(err) = self.backend.set(HISTORY_KEY, &payload) {
            warn!(%err, "failed to persist history");
        }
    }
}
