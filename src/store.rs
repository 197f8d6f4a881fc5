//! High score persistence
//!
//! The engine only needs a keyed scalar: `load` at construction, `save`
//! when a run beats the best. Any backing store satisfies the contract;
//! failures are best-effort and never surface as errors — losing a high
//! score is cosmetic, not correctness-breaking.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Key under which the engine persists its best score
pub const HIGH_SCORE_KEY: &str = "high_score";

/// Synchronous key-value persistence seam.
///
/// Implementations must be idempotent and must not panic; a failed read
/// reports `None`, a failed write reports `false`, and callers treat
/// both as "no high score available".
pub trait ScoreStore {
    fn load(&self, key: &str) -> Option<u64>;

    /// Persist `value`, returning whether the write took effect
    fn save(&mut self, key: &str, value: u64) -> bool;
}

/// In-memory store for tests and embedding without a filesystem
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self, key: &str) -> Option<u64> {
        self.entries.get(key).copied()
    }

    fn save(&mut self, key: &str, value: u64) -> bool {
        self.entries.insert(key.to_string(), value);
        true
    }
}

/// Store backed by a small JSON object file.
///
/// The file is read once at construction; a missing or corrupt file is
/// logged and treated as empty rather than propagated.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: HashMap<String, u64>,
}

impl JsonFileStore {
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str::<HashMap<String, u64>>(&json) {
                Ok(entries) => {
                    log::info!("loaded {} persisted entries from {}", entries.len(), path.display());
                    entries
                }
                Err(err) => {
                    log::warn!("ignoring corrupt store file {}: {err}", path.display());
                    HashMap::new()
                }
            },
            Err(_) => {
                log::info!("no store file at {}, starting fresh", path.display());
                HashMap::new()
            }
        };
        Self { path, entries }
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&self, key: &str) -> Option<u64> {
        self.entries.get(key).copied()
    }

    fn save(&mut self, key: &str, value: u64) -> bool {
        self.entries.insert(key.to_string(), value);
        let json = match serde_json::to_string_pretty(&self.entries) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("failed to serialize store: {err}");
                return false;
            }
        };
        match fs::write(&self.path, json) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("failed to write {}: {err}", self.path.display());
                false
            }
        }
    }
}
