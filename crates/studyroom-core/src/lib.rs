//! # Studyroom Core Library
//!
//! Core business logic for Studyroom, a "virtual study room": a Pomodoro-style
//! interval timer with session statistics, goals, and notes persisted to a
//! local key-value store. CLI-first: everything here is driven through the
//! `studyroom` binary, and any GUI would be a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a caller-driven countdown state machine; the caller
//!   invokes `tick()` once per second while the timer is running
//! - **Storage**: a synchronous string-keyed store ([`KvStore`]) holding JSON
//!   records, backed by SQLite on disk or an in-memory map in tests
//! - **Derived views**: per-day session ledger, consecutive-day streak, and a
//!   14-day rolling pomodoro chart, all recomputed from the store
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: mode transitions, countdown, completion bookkeeping
//! - [`SessionLedger`]: today's started/completed counts with date rollover
//! - [`StreakTracker`]: consecutive-day streak maintenance
//! - [`SqliteStore`]: persistent key-value storage

pub mod chart;
pub mod clock;
pub mod error;
pub mod events;
pub mod export;
pub mod goals;
pub mod ledger;
pub mod notes;
pub mod quotes;
pub mod settings;
pub mod store;
pub mod streak;
pub mod timer;

pub use chart::{ChartEntry, WeekChart};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::StoreError;
pub use events::Event;
pub use export::{ImportError, StatsBundle};
pub use goals::{Goal, GoalList};
pub use ledger::{DayRecord, SessionLedger};
pub use notes::Notes;
pub use settings::TimerSettings;
pub use store::{KvStore, MemoryStore, SqliteStore};
pub use streak::{StreakRecord, StreakTracker};
pub use timer::{Mode, TimerEngine, TimerSnapshot};
