//! Tracking subcommands: thin glue between the CLI and the coordinator.
//!
//! Each function reads the coordinator's observable state after the
//! operation and prints the outcome, standing in for a UI subscription.

use anyhow::{Result, bail};
use nocturne_application::SleepTrackerCoordinator;
use nocturne_core::night::{NightRepository, SleepQuality};

pub fn status(coordinator: &SleepTrackerCoordinator) {
    match coordinator.tonight().borrow().as_ref() {
        Some(night) => println!(
            "Tracking since {} (id {})",
            night.start_time.format("%Y-%m-%d %H:%M"),
            night.id
        ),
        None => println!("Not tracking."),
    }
}

pub async fn start(coordinator: &SleepTrackerCoordinator) -> Result<()> {
    coordinator.start_tracking().await?;

    match coordinator.tonight().borrow().as_ref() {
        Some(night) => println!(
            "Started tracking at {}.",
            night.start_time.format("%Y-%m-%d %H:%M")
        ),
        None => println!("Started tracking."),
    }
    Ok(())
}

pub async fn stop(coordinator: &SleepTrackerCoordinator) -> Result<()> {
    coordinator.stop_tracking().await?;

    let prompt = coordinator.quality_prompt().borrow().clone();
    match prompt {
        Some(night) => {
            println!(
                "Night complete, slept {} min.",
                night.duration().num_minutes()
            );
            println!("Rate it with `nocturne rate <0-5>`.");
            coordinator.quality_prompt_handled();
        }
        None => println!("No night is being tracked."),
    }
    Ok(())
}

pub async fn clear(coordinator: &SleepTrackerCoordinator) -> Result<()> {
    coordinator.clear_history().await?;
    println!("History cleared.");
    Ok(())
}

pub async fn rate(
    coordinator: &SleepTrackerCoordinator,
    repository: &dyn NightRepository,
    quality: u8,
    night_id: Option<String>,
) -> Result<()> {
    let Some(quality) = SleepQuality::from_code(quality) else {
        bail!("Quality must be between 0 and 5");
    };

    let night_id = match night_id {
        Some(id) => id,
        None => match repository.most_recent().await? {
            Some(night) => night.id,
            None => bail!("No nights tracked yet"),
        },
    };

    coordinator.set_quality(&night_id, quality).await?;
    println!("Rated night {} as {}.", night_id, quality.label());
    Ok(())
}

pub fn history(coordinator: &SleepTrackerCoordinator) {
    println!("{}", *coordinator.history_text().borrow());
}
