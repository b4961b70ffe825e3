//! Rolling pomodoro chart series.
//!
//! A date-ascending list of `{day, pomos}` entries under the `weekchart`
//! key, capped at the most recent 14 days. Chart consumers surface the last
//! seven entries.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::clock::{day_key, Clock};
use crate::store::{keys, read_json, write_json, KvStore};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartEntry {
    pub day: String,
    #[serde(default)]
    pub pomos: u32,
}

const MAX_ENTRIES: usize = 14;

pub struct WeekChart {
    store: Rc<dyn KvStore>,
    clock: Rc<dyn Clock>,
}

impl WeekChart {
    pub fn new(store: Rc<dyn KvStore>, clock: Rc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// The full persisted series, oldest first.
    pub fn series(&self) -> Vec<ChartEntry> {
        read_json(self.store.as_ref(), keys::WEEKCHART).unwrap_or_default()
    }

    /// Increment today's entry by `delta`, creating it if absent, and trim
    /// the series to the newest [`MAX_ENTRIES`] days.
    ///
    /// A delta of zero still materializes today's entry, so a freshly
    /// imported or empty chart shows the current day.
    pub fn add_today(&self, delta: u32) -> Vec<ChartEntry> {
        let today = day_key(self.clock.today());
        let mut series = self.series();
        match series.iter_mut().find(|e| e.day == today) {
            Some(entry) => entry.pomos += delta,
            None => series.push(ChartEntry { day: today, pomos: delta }),
        }
        if series.len() > MAX_ENTRIES {
            let excess = series.len() - MAX_ENTRIES;
            series.drain(..excess);
        }
        write_json(self.store.as_ref(), keys::WEEKCHART, &series);
        series
    }

    /// The newest seven entries, for chart display.
    pub fn last_seven(&self) -> Vec<ChartEntry> {
        let series = self.series();
        let start = series.len().saturating_sub(7);
        series[start..].to_vec()
    }
}
