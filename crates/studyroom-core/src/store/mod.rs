//! Key-value storage.
//!
//! Everything the application persists lives in a synchronous string-keyed
//! store of JSON-encoded records (notes are the one raw-string exception).
//! [`SqliteStore`] is the on-disk implementation; [`MemoryStore`] backs
//! deterministic tests.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

/// Well-known record keys.
pub mod keys {
    /// Timer durations: `{"study": m, "short": m, "long": m}`.
    pub const SETTINGS: &str = "settings";
    /// Today's ledger record: `{"date": "YYYY-MM-DD", "sessions": n, "completed": n}`.
    pub const SESSIONS: &str = "sessions";
    /// Streak singleton: `{"streak": n, "lastDay": "YYYY-MM-DD"}`.
    pub const STREAK: &str = "streak";
    /// Rolling chart series: `[{"day": "YYYY-MM-DD", "pomos": n}, ...]`.
    pub const WEEKCHART: &str = "weekchart";
    /// Goal list: `[{"text": ..., "category": ..., "done": bool}, ...]`.
    pub const GOALS: &str = "goals";
    /// Free-form session notes, stored raw.
    pub const NOTES: &str = "notes";
    /// Persisted timer snapshot between CLI invocations.
    pub const TIMER: &str = "timer";
}

/// Synchronous string-keyed, string-valued storage.
///
/// No transactions, no expiry. The design assumes a single active process
/// per store scope; there is no cross-process locking.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Returns `~/.config/studyroom[-dev]/` based on STUDYROOM_ENV.
///
/// `STUDYROOM_DATA_DIR` overrides the location outright, which keeps CLI
/// end-to-end tests away from the real data directory.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    if let Ok(dir) = std::env::var("STUDYROOM_DATA_DIR") {
        let dir = PathBuf::from(dir);
        std::fs::create_dir_all(&dir)?;
        return Ok(dir);
    }

    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("STUDYROOM_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("studyroom-dev")
    } else {
        base_dir.join("studyroom")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Read and decode a JSON record, recovering to `None` on any failure.
///
/// Malformed persisted data is never surfaced to the caller; it is logged
/// and replaced by the caller's default.
pub fn read_json<T: DeserializeOwned>(store: &dyn KvStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(value) => value?,
        Err(e) => {
            tracing::warn!(key, error = %e, "store read failed");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "malformed record, falling back to default");
            None
        }
    }
}

/// Encode and write a JSON record. Write failures are logged and swallowed;
/// the in-memory state simply stays ahead of the store for that write.
pub fn write_json<T: Serialize>(store: &dyn KvStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => {
            if let Err(e) = store.set(key, &raw) {
                tracing::warn!(key, error = %e, "store write failed");
            }
        }
        Err(e) => tracing::warn!(key, error = %e, "failed to encode record"),
    }
}
