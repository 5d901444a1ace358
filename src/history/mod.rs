//! Recent search history
//!
//! A short, deduplicated, most-recent-first list of submitted queries,
//! persisted as a JSON array through a [`KeyValueStore`] after every change.

mod storage;

pub use storage::{FileStore, KeyValueStore, MemoryStore};

use crate::error::StorageError;
use std::sync::Arc;
use tracing::{debug, warn};

/// Default number of entries kept
pub const DEFAULT_LIMIT: usize = 5;

/// Bounded list of recent searches backed by durable storage
pub struct RecentSearches {
    store: Arc<dyn KeyValueStore>,
    key: String,
    limit: usize,
    entries: Vec<String>,
}

impl RecentSearches {
    /// Load the persisted list.
    ///
    /// Missing, unreadable or corrupt data yields an empty list; the next
    /// successful write replaces it.
    pub fn load(store: Arc<dyn KeyValueStore>, key: impl Into<String>, limit: usize) -> Self {
        let key = key.into();
        let limit = limit.max(1);

        let entries = match store.read(&key) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(list) => normalize(list, limit),
                Err(e) => {
                    warn!("Discarding corrupt search history under '{}': {}", key, e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read search history under '{}': {}", key, e);
                Vec::new()
            }
        };

        debug!("Loaded {} recent searches", entries.len());

        Self {
            store,
            key,
            limit,
            entries,
        }
    }

    /// Record a submitted query.
    ///
    /// Returns `Ok(false)` for blank input, which is ignored.
    pub fn record(&mut self, text: &str) -> Result<bool, StorageError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(false);
        }

        self.entries.retain(|entry| entry != text);
        self.entries.insert(0, text.to_string());
        self.entries.truncate(self.limit);
        self.persist()?;
        Ok(true)
    }

    /// Remove one entry. Returns whether anything was removed.
    pub fn remove(&mut self, text: &str) -> Result<bool, StorageError> {
        let before = self.entries.len();
        self.entries.retain(|entry| entry != text);
        if self.entries.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Forget every entry
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.entries.clear();
        self.store.remove(&self.key)
    }

    /// Entries, most recent first
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.entries)?;
        self.store.write(&self.key, &json)
    }
}

/// Trim, drop blanks and duplicates (first occurrence wins), bound the length
fn normalize(list: Vec<String>, limit: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(limit);
    for entry in list {
        let entry = entry.trim();
        if entry.is_empty() || out.iter().any(|e| e == entry) {
            continue;
        }
        out.push(entry.to_string());
        if out.len() == limit {
            break;
        }
    }
    out
}
