use std::rc::Rc;

use clap::Subcommand;
use studyroom_core::store::keys;
use studyroom_core::{Clock, KvStore, TimerEngine, TimerSettings};

use super::open_env;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the configured minutes
    List,
    /// Set the minutes for one mode (study, short, long)
    Set {
        /// Settings key: study, short, or long
        key: String,
        /// Minutes (clamped to at least 1)
        minutes: u32,
    },
    /// Reset durations to 25/5/15
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let (store, clock) = open_env()?;

    match action {
        ConfigAction::List => {
            let settings = TimerSettings::load(store.as_ref());
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        ConfigAction::Set { key, minutes } => {
            let mut settings = TimerSettings::load(store.as_ref());
            match key.as_str() {
                "study" => settings.study = minutes.max(1),
                "short" => settings.short = minutes.max(1),
                "long" => settings.long = minutes.max(1),
                other => return Err(format!("unknown settings key: {other}").into()),
            }
            apply(store, clock, settings)?;
            println!("ok");
        }
        ConfigAction::Reset => {
            apply(store, clock, TimerSettings::default())?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}

/// Saving settings resets the timer, like the settings form in the GUI.
fn apply(
    store: Rc<dyn KvStore>,
    clock: Rc<dyn Clock>,
    settings: TimerSettings,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = TimerEngine::new(store.clone(), clock);
    engine.apply_settings(store.as_ref(), settings);
    store.set(keys::TIMER, &serde_json::to_string(&engine.snapshot())?)?;
    Ok(())
}
