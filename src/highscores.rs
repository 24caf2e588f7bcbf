//! Best score per difficulty
//!
//! Persisted through a host-supplied key/value store as decimal strings,
//! one key per difficulty. Store failures are logged and absorbed; the
//! simulation never sees them.

use std::collections::HashMap;

use thiserror::Error;

use crate::difficulty::Difficulty;

/// Base storage key; the difficulty name is appended
pub const STORAGE_KEY_BASE: &str = "gyro_bounce_highscore_v1";

/// High-score persistence failure, produced by store implementations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend: {0}")]
    Backend(String),
}

/// Host persistence boundary.
///
/// Both operations are fallible; callers treat a failed read as "no recorded
/// value" and a failed write as "write skipped".
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store for tests, demos, and hosts without persistence
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Best-score tracker over a key/value store
#[derive(Debug)]
pub struct HighScores<S> {
    store: S,
}

impl<S: KeyValueStore> HighScores<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn key(difficulty: Difficulty) -> String {
        format!("{STORAGE_KEY_BASE}_{}", difficulty.as_str())
    }

    /// Recorded best for a difficulty. A missing, unreadable, or malformed
    /// entry counts as no record.
    pub fn best(&self, difficulty: Difficulty) -> u32 {
        let key = Self::key(difficulty);
        match self.store.get(&key) {
            Ok(Some(raw)) => match raw.trim().parse() {
                Ok(value) => value,
                Err(_) => {
                    log::warn!("malformed best score {raw:?} under {key}, treating as unset");
                    0
                }
            },
            Ok(None) => 0,
            Err(err) => {
                log::warn!("failed to read best score for {key}: {err}");
                0
            }
        }
    }

    /// Record `score` iff it beats the stored best. Returns whether the
    /// store was updated. Write failures are logged and swallowed.
    pub fn commit(&mut self, difficulty: Difficulty, score: u32) -> bool {
        let best = self.best(difficulty);
        if score <= best {
            return false;
        }

        let key = Self::key(difficulty);
        match self.store.set(&key, &score.to_string()) {
            Ok(()) => {
                log::info!("new best score {score} on {}", difficulty.as_str());
                true
            }
            Err(err) => {
                log::warn!("failed to persist best score {score} for {key}: {err}");
                false
            }
        }
    }
}
