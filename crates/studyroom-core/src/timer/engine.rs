//! Timer engine implementation.
//!
//! The engine is a countdown state machine. It does not use internal
//! threads - the caller owns the one-per-second tick source and invokes
//! `tick()` while the timer is running; `tick()` ignores all other states,
//! and the cancelling operations (`pause`, `reset`, `set_mode`) clear the
//! running flag synchronously, so the flag and the live tick source stay in
//! lock-step.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Idle
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(store, clock);
//! engine.start();
//! // Once per second:
//! let events = engine.tick(); // SessionCompleted + ModeChanged on expiry
//! ```

use std::rc::Rc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::Mode;
use crate::clock::Clock;
use crate::events::Event;
use crate::ledger::SessionLedger;
use crate::settings::TimerSettings;
use crate::store::KvStore;
use crate::streak::StreakTracker;

/// Serializable view of the engine state, used both for status display and
/// for persisting the timer between CLI invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub mode: Mode,
    pub total_seconds: u32,
    pub remaining_seconds: u32,
    pub running: bool,
    pub progress: f64,
    /// Remaining time as `MM:SS`, for display.
    pub display: String,
}

/// Core timer state machine.
///
/// Owns the session ledger and streak tracker so that interval completion
/// can do its bookkeeping in one place. All durations derive from the
/// configured minutes of the active mode, floored to one second.
pub struct TimerEngine {
    settings: TimerSettings,
    mode: Mode,
    total_seconds: u32,
    remaining_seconds: u32,
    running: bool,
    ledger: SessionLedger,
    streak: StreakTracker,
}

impl TimerEngine {
    /// Create an engine over the given store and clock.
    ///
    /// Starts idle in `Study` with a full countdown. Creation counts as an
    /// app load, so the streak refreshes here.
    pub fn new(store: Rc<dyn KvStore>, clock: Rc<dyn Clock>) -> Self {
        let settings = TimerSettings::load(store.as_ref());
        let total = interval_seconds(&settings, Mode::Study);
        let engine = Self {
            settings,
            mode: Mode::Study,
            total_seconds: total,
            remaining_seconds: total,
            running: false,
            ledger: SessionLedger::new(store.clone(), clock.clone()),
            streak: StreakTracker::new(store, clock),
        };
        engine.streak.refresh();
        engine
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn total_seconds(&self) -> u32 {
        self.total_seconds
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn settings(&self) -> TimerSettings {
        self.settings
    }

    pub fn ledger(&self) -> &SessionLedger {
        &self.ledger
    }

    pub fn streak(&self) -> &StreakTracker {
        &self.streak
    }

    /// Elapsed fraction of the current interval, clamped to `[0, 1]`.
    ///
    /// `total_seconds` is at least 1 through every normal path; the zero
    /// guard is there anyway.
    pub fn progress(&self) -> f64 {
        if self.total_seconds == 0 {
            return 0.0;
        }
        let elapsed = self.total_seconds - self.remaining_seconds.min(self.total_seconds);
        (f64::from(elapsed) / f64::from(self.total_seconds)).clamp(0.0, 1.0)
    }

    /// Remaining time as `MM:SS`.
    pub fn format_remaining(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.remaining_seconds / 60,
            self.remaining_seconds % 60
        )
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            mode: self.mode,
            total_seconds: self.total_seconds,
            remaining_seconds: self.remaining_seconds,
            running: self.running,
            progress: self.progress(),
            display: self.format_remaining(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin (or resume) the countdown. No-op while already running.
    pub fn start(&mut self) -> Vec<Event> {
        if self.running {
            return Vec::new();
        }
        self.total_seconds = interval_seconds(&self.settings, self.mode);
        if self.remaining_seconds == 0 || self.remaining_seconds > self.total_seconds {
            // Fresh run, or the configured minutes shrank since the last reset.
            self.remaining_seconds = self.total_seconds;
        }
        self.running = true;
        vec![Event::RunningChanged {
            running: true,
            at: Utc::now(),
        }]
    }

    /// Stop the countdown, keeping the remaining time resumable.
    /// No-op while not running.
    pub fn pause(&mut self) -> Vec<Event> {
        if !self.running {
            return Vec::new();
        }
        self.running = false;
        vec![Event::RunningChanged {
            running: false,
            at: Utc::now(),
        }]
    }

    /// Stop the countdown and re-initialize it from the active mode's
    /// configured minutes.
    pub fn reset(&mut self) -> Vec<Event> {
        let mut events = self.stop();
        self.total_seconds = interval_seconds(&self.settings, self.mode);
        self.remaining_seconds = self.total_seconds;
        events.push(Event::TimerReset {
            total_seconds: self.total_seconds,
            at: Utc::now(),
        });
        events
    }

    /// Switch the active mode and re-initialize the countdown.
    ///
    /// Never auto-starts: switching while running leaves the timer idle
    /// until `start()` is called again, mirroring the natural completion
    /// path, which changes mode after the countdown has already stopped.
    pub fn set_mode(&mut self, mode: Mode) -> Vec<Event> {
        let mut events = self.stop();
        events.extend(self.enter_mode(mode));
        events
    }

    /// Replace the configured minutes, persist them, and reset the timer.
    pub fn apply_settings(&mut self, store: &dyn KvStore, settings: TimerSettings) -> Vec<Event> {
        settings.save(store);
        self.settings = settings;
        self.reset()
    }

    /// Advance the countdown by one second. Fires only while running.
    ///
    /// Returns the resulting events: a `Tick` mid-interval, or the
    /// completion sequence (`RunningChanged`, `SessionCompleted`,
    /// `ModeChanged`) when the interval runs out.
    pub fn tick(&mut self) -> Vec<Event> {
        if !self.running {
            return Vec::new();
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds > 0 {
            return vec![Event::Tick {
                remaining_seconds: self.remaining_seconds,
                progress: self.progress(),
                at: Utc::now(),
            }];
        }
        self.complete()
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Interval completion: bookkeeping for study sessions, then the mode
    /// transition. Study completions record one started and one completed
    /// session together; there is no separate accounting for a session
    /// abandoned via pause or reset.
    fn complete(&mut self) -> Vec<Event> {
        self.running = false;
        let mut events = vec![Event::RunningChanged {
            running: false,
            at: Utc::now(),
        }];

        let finished = self.mode;
        let counts = if finished == Mode::Study {
            let counts = self.ledger.record_completion(1, 1);
            self.streak.refresh();
            counts
        } else {
            self.ledger.load_today()
        };
        events.push(Event::SessionCompleted {
            mode: finished,
            sessions_today: counts.sessions,
            completed_today: counts.completed,
            at: Utc::now(),
        });

        events.extend(self.enter_mode(finished.next_on_completion()));
        events
    }

    fn enter_mode(&mut self, mode: Mode) -> Vec<Event> {
        self.mode = mode;
        self.total_seconds = interval_seconds(&self.settings, mode);
        self.remaining_seconds = self.total_seconds;
        vec![Event::ModeChanged {
            mode,
            total_seconds: self.total_seconds,
            at: Utc::now(),
        }]
    }

    fn stop(&mut self) -> Vec<Event> {
        if !self.running {
            return Vec::new();
        }
        self.running = false;
        vec![Event::RunningChanged {
            running: false,
            at: Utc::now(),
        }]
    }
}

impl TimerEngine {
    /// Restore a persisted snapshot.
    ///
    /// `running` is always restored as false: a live tick source never
    /// survives the process that owned it. Remaining time is clamped into
    /// the snapshot's total.
    pub fn restore(&mut self, snapshot: TimerSnapshot) {
        self.mode = snapshot.mode;
        self.total_seconds = snapshot.total_seconds.max(1);
        self.remaining_seconds = snapshot.remaining_seconds.min(self.total_seconds);
        self.running = false;
    }
}

/// Configured minutes for `mode` as seconds, floored to one second.
fn interval_seconds(settings: &TimerSettings, mode: Mode) -> u32 {
    settings.minutes(mode).saturating_mul(60).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::store::{keys, MemoryStore};
    use chrono::{Local, TimeZone};
    use proptest::prelude::*;

    fn engine_with(study: u32, short: u32, long: u32) -> (Rc<MemoryStore>, TimerEngine) {
        let store = Rc::new(MemoryStore::new());
        TimerSettings::clamped(study, short, long).save(store.as_ref());
        let clock = Rc::new(FixedClock::new(
            Local.with_ymd_and_hms(2025, 3, 7, 9, 0, 0).unwrap(),
        ));
        let engine = TimerEngine::new(store.clone(), clock);
        (store, engine)
    }

    fn completions(events: &[Event]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, Event::SessionCompleted { .. }))
            .count()
    }

    #[test]
    fn starts_idle_in_study_with_full_countdown() {
        let (_, engine) = engine_with(25, 5, 15);
        assert_eq!(engine.mode(), Mode::Study);
        assert_eq!(engine.total_seconds(), 25 * 60);
        assert_eq!(engine.remaining_seconds(), 25 * 60);
        assert!(!engine.is_running());
        assert_eq!(engine.progress(), 0.0);
    }

    #[test]
    fn start_and_pause_are_idempotent() {
        let (_, mut engine) = engine_with(25, 5, 15);
        assert!(engine.pause().is_empty());
        assert_eq!(engine.start().len(), 1);
        assert!(engine.start().is_empty());
        assert_eq!(engine.pause().len(), 1);
        assert!(engine.pause().is_empty());
    }

    #[test]
    fn tick_is_ignored_while_idle() {
        let (_, mut engine) = engine_with(25, 5, 15);
        assert!(engine.tick().is_empty());
        assert_eq!(engine.remaining_seconds(), 25 * 60);
    }

    #[test]
    fn pause_keeps_remaining_resumable() {
        let (_, mut engine) = engine_with(25, 5, 15);
        engine.start();
        for _ in 0..10 {
            engine.tick();
        }
        engine.pause();
        assert_eq!(engine.remaining_seconds(), 25 * 60 - 10);
        engine.start();
        assert_eq!(engine.remaining_seconds(), 25 * 60 - 10);
    }

    #[test]
    fn reset_restores_the_full_interval() {
        let (_, mut engine) = engine_with(25, 5, 15);
        engine.start();
        engine.tick();
        let events = engine.reset();
        assert!(!engine.is_running());
        assert_eq!(engine.remaining_seconds(), 25 * 60);
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::TimerReset { total_seconds: 1500, .. })));
    }

    #[test]
    fn set_mode_recomputes_and_stays_idle() {
        let (_, mut engine) = engine_with(25, 5, 15);
        engine.start();
        let events = engine.set_mode(Mode::LongBreak);
        assert_eq!(engine.mode(), Mode::LongBreak);
        assert_eq!(engine.total_seconds(), 15 * 60);
        assert_eq!(engine.remaining_seconds(), 15 * 60);
        assert!(!engine.is_running());
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::RunningChanged { running: false, .. })));
        // Ticks no longer advance anything until start() is called again.
        assert!(engine.tick().is_empty());
    }

    #[test]
    fn countdown_completes_after_exactly_total_ticks() {
        let (_, mut engine) = engine_with(1, 5, 15);
        engine.start();
        for n in 1..60 {
            let events = engine.tick();
            assert_eq!(completions(&events), 0, "completed early at tick {n}");
        }
        let events = engine.tick();
        assert_eq!(completions(&events), 1);
        assert!(!engine.is_running());
    }

    #[test]
    fn study_completion_records_session_and_enters_short_break() {
        let (_, mut engine) = engine_with(1, 5, 15);
        engine.start();
        for _ in 0..60 {
            engine.tick();
        }
        assert_eq!(engine.mode(), Mode::ShortBreak);
        assert_eq!(engine.total_seconds(), 5 * 60);
        let record = engine.ledger().load_today();
        assert_eq!((record.sessions, record.completed), (1, 1));
    }

    #[test]
    fn break_completion_returns_to_study_without_ledger_update() {
        let (_, mut engine) = engine_with(25, 1, 15);
        engine.set_mode(Mode::ShortBreak);
        engine.start();
        for _ in 0..60 {
            engine.tick();
        }
        assert_eq!(engine.mode(), Mode::Study);
        let record = engine.ledger().load_today();
        assert_eq!((record.sessions, record.completed), (0, 0));
    }

    #[test]
    fn long_break_completion_also_returns_to_study() {
        let (_, mut engine) = engine_with(25, 5, 1);
        engine.set_mode(Mode::LongBreak);
        engine.start();
        for _ in 0..60 {
            engine.tick();
        }
        assert_eq!(engine.mode(), Mode::Study);
    }

    #[test]
    fn full_study_scenario_1500_ticks() {
        let (_, mut engine) = engine_with(25, 5, 15);
        engine.start();
        let mut last_progress = engine.progress();
        let mut completed = 0;
        for _ in 0..1500 {
            let events = engine.tick();
            completed += completions(&events);
            if completed == 0 {
                let progress = engine.progress();
                assert!(progress >= last_progress, "progress went backwards");
                last_progress = progress;
            }
        }
        assert_eq!(completed, 1);
        assert_eq!(engine.mode(), Mode::ShortBreak);
        assert_eq!(engine.ledger().load_today().completed, 1);
        // Mode change re-initialized the countdown.
        assert_eq!(engine.progress(), 0.0);
    }

    #[test]
    fn completion_refreshes_streak_without_same_day_growth() {
        let (store, mut engine) = engine_with(1, 5, 15);
        // Engine creation already wrote {0, today}; a completion refreshes
        // again, which is a same-day no-op.
        engine.start();
        for _ in 0..60 {
            engine.tick();
        }
        let raw = store.get(keys::STREAK).unwrap().unwrap();
        assert!(raw.contains("\"streak\":0"));
    }

    #[test]
    fn start_after_completion_runs_the_next_interval() {
        let (_, mut engine) = engine_with(1, 1, 15);
        engine.start();
        for _ in 0..60 {
            engine.tick();
        }
        assert_eq!(engine.mode(), Mode::ShortBreak);
        engine.start();
        for _ in 0..60 {
            engine.tick();
        }
        assert_eq!(engine.mode(), Mode::Study);
        assert_eq!(engine.ledger().load_today().completed, 1);
    }

    #[test]
    fn apply_settings_persists_and_resets() {
        let (store, mut engine) = engine_with(25, 5, 15);
        engine.start();
        engine.tick();
        engine.apply_settings(store.as_ref(), TimerSettings::clamped(50, 10, 20));
        assert!(!engine.is_running());
        assert_eq!(engine.total_seconds(), 50 * 60);
        assert_eq!(TimerSettings::load(store.as_ref()).study, 50);
    }

    #[test]
    fn start_clamps_remaining_when_settings_shrank() {
        let (store, mut engine) = engine_with(25, 5, 15);
        engine.apply_settings(store.as_ref(), TimerSettings::clamped(25, 5, 15));
        engine.start();
        engine.pause();
        engine.apply_settings(store.as_ref(), TimerSettings::clamped(1, 5, 15));
        engine.start();
        assert!(engine.remaining_seconds() <= engine.total_seconds());
    }

    #[test]
    fn snapshot_restore_roundtrip_forces_idle() {
        let (store, mut engine) = engine_with(25, 5, 15);
        engine.set_mode(Mode::ShortBreak);
        engine.start();
        for _ in 0..30 {
            engine.tick();
        }
        let snap = engine.snapshot();
        assert!(snap.running);
        assert_eq!(snap.display, "04:30");

        let clock = Rc::new(FixedClock::new(
            Local.with_ymd_and_hms(2025, 3, 7, 9, 0, 0).unwrap(),
        ));
        let mut restored = TimerEngine::new(store, clock);
        restored.restore(snap);
        assert_eq!(restored.mode(), Mode::ShortBreak);
        assert_eq!(restored.remaining_seconds(), 5 * 60 - 30);
        assert!(!restored.is_running());
    }

    proptest! {
        #[test]
        fn set_mode_total_matches_configured_minutes(m in 1u32..=180) {
            let (_, mut engine) = engine_with(m, m, m);
            for mode in [Mode::Study, Mode::ShortBreak, Mode::LongBreak] {
                engine.set_mode(mode);
                prop_assert_eq!(engine.total_seconds(), m * 60);
                prop_assert_eq!(engine.remaining_seconds(), engine.total_seconds());
            }
        }

        #[test]
        fn progress_stays_in_unit_interval(m in 1u32..=5, ticks in 0usize..=400) {
            let (_, mut engine) = engine_with(m, m, m);
            engine.start();
            for _ in 0..ticks {
                engine.tick();
                let p = engine.progress();
                prop_assert!((0.0..=1.0).contains(&p));
            }
        }
    }
}
