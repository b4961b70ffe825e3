use clap::Subcommand;
use serde_json::json;
use studyroom_core::{SessionLedger, StreakTracker, TimerSettings, WeekChart};

use super::open_env;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's session counts and focus minutes
    Today,
    /// Refresh and print the consecutive-day streak
    Streak,
    /// The last seven chart entries
    Chart,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let (store, clock) = open_env()?;

    match action {
        StatsAction::Today => {
            let settings = TimerSettings::load(store.as_ref());
            let ledger = SessionLedger::new(store.clone(), clock);
            let record = ledger.load_today();
            let output = json!({
                "date": record.date,
                "sessions": record.sessions,
                "completed": record.completed,
                "focus_min": ledger.focus_minutes(settings.study),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        StatsAction::Streak => {
            let streak = StreakTracker::new(store, clock).refresh();
            println!("{}", serde_json::to_string_pretty(&json!({ "streak": streak }))?);
        }
        StatsAction::Chart => {
            let chart = WeekChart::new(store, clock);
            println!("{}", serde_json::to_string_pretty(&chart.last_seven())?);
        }
    }
    Ok(())
}
