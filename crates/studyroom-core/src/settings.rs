//! Timer duration configuration.
//!
//! Stored as the `settings` JSON record: `{"study": m, "short": m, "long": m}`.
//! Each field recovers independently: an absent or non-numeric value falls
//! back to its default, and any numeric value is floored to an integer and
//! clamped to a minimum of one minute.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::{keys, read_json, write_json, KvStore};
use crate::timer::Mode;

/// Configured minutes per mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    pub study: u32,
    pub short: u32,
    pub long: u32,
}

fn default_study() -> u32 {
    25
}
fn default_short() -> u32 {
    5
}
fn default_long() -> u32 {
    15
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            study: default_study(),
            short: default_short(),
            long: default_long(),
        }
    }
}

impl TimerSettings {
    /// Build settings from raw minute values, clamping each to >= 1.
    pub fn clamped(study: u32, short: u32, long: u32) -> Self {
        Self {
            study: study.max(1),
            short: short.max(1),
            long: long.max(1),
        }
    }

    /// Load from the store, recovering per field on invalid data.
    pub fn load(store: &dyn KvStore) -> Self {
        match read_json::<Value>(store, keys::SETTINGS) {
            Some(raw) => Self {
                study: field(&raw, "study", default_study()),
                short: field(&raw, "short", default_short()),
                long: field(&raw, "long", default_long()),
            },
            None => Self::default(),
        }
    }

    /// Persist to the store.
    pub fn save(&self, store: &dyn KvStore) {
        write_json(store, keys::SETTINGS, self);
    }

    /// Configured minutes for a mode.
    pub fn minutes(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Study => self.study,
            Mode::ShortBreak => self.short,
            Mode::LongBreak => self.long,
        }
    }
}

fn field(raw: &Value, key: &str, default: u32) -> u32 {
    raw.get(key)
        .and_then(Value::as_f64)
        .filter(|m| m.is_finite())
        .map(|m| m.floor().max(1.0) as u32)
        .unwrap_or(default)
}
