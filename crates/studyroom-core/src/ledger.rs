//! Per-day session accounting.
//!
//! The ledger holds a single current-day record under the `sessions` key.
//! When the stored date no longer matches today, the record is superseded by
//! a fresh zeroed one; prior totals are abandoned rather than archived (the
//! chart series captures the history that matters for display).

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::chart::WeekChart;
use crate::clock::{day_key, Clock};
use crate::store::{keys, read_json, write_json, KvStore};

/// The current day's started/completed counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub sessions: u32,
    #[serde(default)]
    pub completed: u32,
}

pub struct SessionLedger {
    store: Rc<dyn KvStore>,
    clock: Rc<dyn Clock>,
    chart: WeekChart,
}

impl SessionLedger {
    pub fn new(store: Rc<dyn KvStore>, clock: Rc<dyn Clock>) -> Self {
        let chart = WeekChart::new(store.clone(), clock.clone());
        Self { store, clock, chart }
    }

    /// Today's record, rolling a stale one over first.
    pub fn load_today(&self) -> DayRecord {
        self.today_record()
    }

    /// Apply started/completed deltas to today's record and persist it.
    ///
    /// Re-derives "today" on every call, so a process left open across
    /// midnight rolls over before counting. Each recorded completion also
    /// feeds the chart series.
    pub fn record_completion(&self, delta_started: u32, delta_completed: u32) -> DayRecord {
        let mut record = self.today_record();
        record.sessions += delta_started;
        record.completed += delta_completed;
        write_json(self.store.as_ref(), keys::SESSIONS, &record);
        self.chart.add_today(delta_completed);
        record
    }

    /// Today's focus minutes, derived from the completed count.
    pub fn focus_minutes(&self, study_minutes: u32) -> u32 {
        self.load_today().completed * study_minutes
    }

    pub fn chart(&self) -> &WeekChart {
        &self.chart
    }

    /// The single rollover point: every ledger operation goes through here,
    /// so stale records are replaced the same way on all paths.
    fn today_record(&self) -> DayRecord {
        let today = day_key(self.clock.today());
        match read_json::<DayRecord>(self.store.as_ref(), keys::SESSIONS) {
            Some(record) if record.date == today => record,
            _ => {
                let fresh = DayRecord {
                    date: today,
                    sessions: 0,
                    completed: 0,
                };
                write_json(self.store.as_ref(), keys::SESSIONS, &fresh);
                fresh
            }
        }
    }
}
