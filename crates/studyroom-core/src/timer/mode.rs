use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the three interval kinds. Modes are configuration, not instances;
/// exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    #[serde(rename = "study")]
    Study,
    #[serde(rename = "short")]
    ShortBreak,
    #[serde(rename = "long")]
    LongBreak,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Study => "Study",
            Mode::ShortBreak => "Short Break",
            Mode::LongBreak => "Long Break",
        }
    }

    /// The mode entered when an interval of this mode runs out.
    pub fn next_on_completion(&self) -> Mode {
        match self {
            Mode::Study => Mode::ShortBreak,
            Mode::ShortBreak | Mode::LongBreak => Mode::Study,
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown mode: {0}")]
pub struct UnknownMode(String);

impl std::str::FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "study" => Ok(Mode::Study),
            "short" => Ok(Mode::ShortBreak),
            "long" => Ok(Mode::LongBreak),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}
