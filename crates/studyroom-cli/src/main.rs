use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "studyroom", version, about = "Virtual study room CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Timer duration configuration
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Session statistics, streak, and weekly chart
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Study goal management
    Goal {
        #[command(subcommand)]
        action: commands::goal::GoalAction,
    },
    /// Session notes
    Notes {
        #[command(subcommand)]
        action: commands::notes::NotesAction,
    },
    /// Export or import stored data
    Data {
        #[command(subcommand)]
        action: commands::data::DataAction,
    },
    /// Print a motivational quote
    Quote,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Goal { action } => commands::goal::run(action),
        Commands::Notes { action } => commands::notes::run(action),
        Commands::Data { action } => commands::data::run(action),
        Commands::Quote => commands::quote::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
