use anyhow::Result;
use clap::{Parser, Subcommand};
use nocturne_application::SleepTrackerCoordinator;
use nocturne_core::clock::SystemClock;
use nocturne_core::night::NightLabels;
use nocturne_infrastructure::{NocturnePaths, TomlNightRepository};
use std::path::PathBuf;
use std::sync::Arc;

mod commands;

#[derive(Parser)]
#[command(name = "nocturne")]
#[command(about = "Nocturne - local sleep session tracking", long_about = None)]
struct Cli {
    /// Directory holding the night ledger (defaults to the platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show whether a night is currently being tracked
    Status,
    /// Start tracking a new night
    Start,
    /// Stop tracking the current night
    Stop,
    /// Delete the entire night history
    Clear,
    /// Rate a night's quality
    Rate {
        /// Quality code: 0 (very bad) to 5 (excellent)
        quality: u8,
        /// Night ID to rate instead of the most recent night
        #[arg(long)]
        night: Option<String>,
    },
    /// Print the formatted night history
    History,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => NocturnePaths::data_dir()?,
    };
    let repository = Arc::new(TomlNightRepository::new(data_dir.join("nights.toml")));
    let coordinator = SleepTrackerCoordinator::new(
        repository.clone(),
        Arc::new(SystemClock),
        NightLabels::default(),
    )
    .await;

    match cli.command {
        Commands::Status => commands::tracker::status(&coordinator),
        Commands::Start => commands::tracker::start(&coordinator).await?,
        Commands::Stop => commands::tracker::stop(&coordinator).await?,
        Commands::Clear => commands::tracker::clear(&coordinator).await?,
        Commands::Rate { quality, night } => {
            commands::tracker::rate(&coordinator, repository.as_ref(), quality, night).await?
        }
        Commands::History => commands::tracker::history(&coordinator),
    }

    Ok(())
}
