use std::path::PathBuf;

use chrono::Local;
use clap::Subcommand;
use studyroom_core::StatsBundle;

use super::open_env;

#[derive(Subcommand)]
pub enum DataAction {
    /// Write all stored data to a JSON file
    Export {
        /// Output path (defaults to studyroom_stats_<date>.json)
        path: Option<PathBuf>,
    },
    /// Load stored data from a previously exported JSON file
    Import { path: PathBuf },
}

pub fn run(action: DataAction) -> Result<(), Box<dyn std::error::Error>> {
    let (store, _clock) = open_env()?;

    match action {
        DataAction::Export { path } => {
            let path = path.unwrap_or_else(|| {
                PathBuf::from(format!(
                    "studyroom_stats_{}.json",
                    Local::now().format("%Y-%m-%d")
                ))
            });
            let bundle = StatsBundle::collect(store.as_ref());
            std::fs::write(&path, serde_json::to_string_pretty(&bundle)?)?;
            println!("exported to {}", path.display());
        }
        DataAction::Import { path } => {
            let content = std::fs::read_to_string(&path)?;
            StatsBundle::parse(&content)?.apply(store.as_ref());
            println!("import successful");
        }
    }
    Ok(())
}
