mod engine;
mod mode;

pub use engine::{TimerEngine, TimerSnapshot};
pub use mode::{Mode, UnknownMode};
