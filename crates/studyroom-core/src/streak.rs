//! Consecutive-day streak tracking.
//!
//! The streak qualifies on app load: `refresh()` compares the stored
//! `lastDay` against today and extends or resets the count, independent of
//! whether a session was completed. That matches the presented behavior of
//! the streak counter; see DESIGN.md for the discussion.

use std::rc::Rc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock::{day_key, Clock};
use crate::store::{keys, read_json, write_json, KvStore};

/// Persisted singleton under the `streak` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakRecord {
    #[serde(default)]
    pub streak: u32,
    #[serde(default, rename = "lastDay")]
    pub last_day: String,
}

pub struct StreakTracker {
    store: Rc<dyn KvStore>,
    clock: Rc<dyn Clock>,
}

impl StreakTracker {
    pub fn new(store: Rc<dyn KvStore>, clock: Rc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Apply the daily update rule and return the resulting streak.
    ///
    /// Idempotent within a calendar day: the first call after a day boundary
    /// does the work, every further call that day is a read.
    ///
    /// Rule: missing record initializes to `{0, today}`; `lastDay == today`
    /// changes nothing; a whole-day difference of exactly 1 increments the
    /// streak; any other difference (including an unparseable `lastDay`)
    /// resets it to 1.
    pub fn refresh(&self) -> u32 {
        let today = day_key(self.clock.today());

        let mut record = match read_json::<StreakRecord>(self.store.as_ref(), keys::STREAK) {
            Some(r) if !r.last_day.is_empty() => r,
            _ => {
                let fresh = StreakRecord {
                    streak: 0,
                    last_day: today,
                };
                write_json(self.store.as_ref(), keys::STREAK, &fresh);
                return fresh.streak;
            }
        };

        if record.last_day == today {
            return record.streak;
        }

        let diff = NaiveDate::parse_from_str(&record.last_day, "%Y-%m-%d")
            .ok()
            .map(|last| (self.clock.today() - last).num_days());
        record.streak = match diff {
            Some(1) => record.streak + 1,
            _ => 1,
        };
        record.last_day = today;
        write_json(self.store.as_ref(), keys::STREAK, &record);
        record.streak
    }
}
