use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Mode;

/// Every state change in the timer core produces an Event.
/// Presentation layers consume these; they never own the state behind them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// The countdown started or stopped (for enabling/disabling controls).
    RunningChanged {
        running: bool,
        at: DateTime<Utc>,
    },
    /// One second elapsed while running.
    Tick {
        remaining_seconds: u32,
        /// Elapsed fraction of the current interval, in `[0, 1]`.
        progress: f64,
        at: DateTime<Utc>,
    },
    /// An interval ran down to zero.
    SessionCompleted {
        mode: Mode,
        sessions_today: u32,
        completed_today: u32,
        at: DateTime<Utc>,
    },
    /// The active mode changed; the countdown was re-initialized.
    ModeChanged {
        mode: Mode,
        total_seconds: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        total_seconds: u32,
        at: DateTime<Utc>,
    },
}
