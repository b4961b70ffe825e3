use std::rc::Rc;

use clap::Subcommand;
use studyroom_core::store::keys;
use studyroom_core::{Clock, Event, KvStore, Mode, TimerEngine, TimerSnapshot};

use super::open_env;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start (or resume) the countdown
    Start,
    /// Pause the countdown, keeping the remaining time
    Pause,
    /// Reset the countdown to the active mode's full duration
    Reset,
    /// Switch the active mode (study, short, long)
    Mode {
        /// Mode name: study, short, or long
        mode: String,
    },
    /// Print the current timer state as JSON
    Status,
    /// Run the countdown in the foreground, ticking once per second
    Run {
        /// Stop after this many ticks instead of running to completion
        #[arg(long)]
        ticks: Option<u64>,
    },
}

fn load_engine(store: Rc<dyn KvStore>, clock: Rc<dyn Clock>) -> TimerEngine {
    let mut engine = TimerEngine::new(store.clone(), clock);
    if let Ok(Some(json)) = store.get(keys::TIMER) {
        if let Ok(snapshot) = serde_json::from_str::<TimerSnapshot>(&json) {
            engine.restore(snapshot);
        }
    }
    engine
}

fn save_engine(store: &dyn KvStore, engine: &TimerEngine) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(&engine.snapshot())?;
    store.set(keys::TIMER, &json)?;
    Ok(())
}

fn print_events(events: &[Event]) -> Result<(), Box<dyn std::error::Error>> {
    for event in events {
        println!("{}", serde_json::to_string_pretty(event)?);
    }
    Ok(())
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let (store, clock) = open_env()?;
    let mut engine = load_engine(store.clone(), clock);

    match action {
        TimerAction::Start => {
            print_events(&engine.start())?;
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        }
        TimerAction::Pause => {
            print_events(&engine.pause())?;
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        }
        TimerAction::Reset => {
            print_events(&engine.reset())?;
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        }
        TimerAction::Mode { mode } => {
            // An unrecognized name errors out before any state is touched.
            let mode: Mode = mode.parse()?;
            print_events(&engine.set_mode(mode))?;
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        }
        TimerAction::Status => {
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        }
        TimerAction::Run { ticks } => {
            engine.start();
            let mut elapsed = 0u64;
            while engine.is_running() {
                if let Some(limit) = ticks {
                    if elapsed >= limit {
                        engine.pause();
                        break;
                    }
                }
                std::thread::sleep(std::time::Duration::from_secs(1));
                let events = engine.tick();
                elapsed += 1;
                eprintln!("{} {}", engine.mode().label(), engine.format_remaining());
                for event in &events {
                    if !matches!(event, Event::Tick { .. }) {
                        println!("{}", serde_json::to_string_pretty(event)?);
                    }
                }
            }
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        }
    }

    save_engine(store.as_ref(), &engine)?;
    Ok(())
}
