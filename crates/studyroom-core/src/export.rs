//! Bulk export and import of stored data.
//!
//! The bundle shares the store record shapes verbatim, so an export file is
//! just the persisted JSON records gathered under one object. Import
//! accepts partial bundles: only the fields present are applied.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chart::ChartEntry;
use crate::goals::Goal;
use crate::ledger::DayRecord;
use crate::store::{keys, read_json, write_json, KvStore};
use crate::streak::StreakRecord;

/// The import file could not be understood. This is the one storage error
/// that is surfaced to the user instead of being recovered silently.
#[derive(Debug, Error)]
#[error("invalid file: {0}")]
pub struct ImportError(#[from] serde_json::Error);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsBundle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sessions: Option<DayRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<Vec<Goal>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart: Option<Vec<ChartEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streak: Option<StreakRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl StatsBundle {
    /// Gather every exportable record from the store. Records that are
    /// absent or unreadable export as their empty defaults.
    pub fn collect(store: &dyn KvStore) -> Self {
        let notes = store.get(keys::NOTES).ok().flatten().unwrap_or_default();
        Self {
            sessions: Some(read_json(store, keys::SESSIONS).unwrap_or_default()),
            goals: Some(read_json(store, keys::GOALS).unwrap_or_default()),
            chart: Some(read_json(store, keys::WEEKCHART).unwrap_or_default()),
            streak: Some(read_json(store, keys::STREAK).unwrap_or_default()),
            notes: Some(notes),
        }
    }

    /// Parse an export file.
    ///
    /// # Errors
    /// Returns [`ImportError`] if the content is not a valid bundle.
    pub fn parse(json: &str) -> Result<Self, ImportError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write every present field back to the store.
    pub fn apply(&self, store: &dyn KvStore) {
        if let Some(sessions) = &self.sessions {
            write_json(store, keys::SESSIONS, sessions);
        }
        if let Some(goals) = &self.goals {
            write_json(store, keys::GOALS, goals);
        }
        if let Some(chart) = &self.chart {
            write_json(store, keys::WEEKCHART, chart);
        }
        if let Some(streak) = &self.streak {
            write_json(store, keys::STREAK, streak);
        }
        if let Some(notes) = &self.notes {
            if let Err(e) = store.set(keys::NOTES, notes) {
                tracing::warn!(error = %e, "failed to import notes");
            }
        }
    }
}
