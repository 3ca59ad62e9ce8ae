//! Sleep tracking coordinator.
//!
//! Mediates between the night repository and a user interface: exposes the
//! current night, the formatted history and the quality-rating prompt as
//! observable values, and translates user actions into repository calls.

use nocturne_core::clock::Clock;
use nocturne_core::error::{NocturneError, Result};
use nocturne_core::night::{NightLabels, NightRepository, SleepNight, SleepQuality, format_nights};
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Presentation-layer coordinator for sleep tracking.
///
/// The coordinator owns three observable values, each held in a watch
/// channel whose sender stays private:
///
/// - **tonight**: the in-progress night, or `None`
/// - **history text**: formatted projection of the full history, refreshed
///   by a background task whenever the repository reports a change
/// - **quality prompt**: set when a night completes so the UI can route to
///   the rating screen; cleared via [`quality_prompt_handled`]
///
/// The repository remains the source of truth; the coordinator only holds
/// UI-facing projections. Its background tasks stop when the coordinator
/// is dropped.
///
/// Concurrent operations are not ordered against each other: a
/// `stop_tracking` racing a `clear_history` resolves in whatever order the
/// repository serves them.
///
/// [`quality_prompt_handled`]: SleepTrackerCoordinator::quality_prompt_handled
pub struct SleepTrackerCoordinator {
    repository: Arc<dyn NightRepository>,
    clock: Arc<dyn Clock>,
    tonight_tx: Arc<watch::Sender<Option<SleepNight>>>,
    history_tx: Arc<watch::Sender<String>>,
    quality_prompt_tx: watch::Sender<Option<SleepNight>>,
    cancel: CancellationToken,
}

impl SleepTrackerCoordinator {
    /// Creates a coordinator, restores the current night from storage and
    /// starts following repository changes.
    ///
    /// A stored night still in progress (tracking was interrupted, e.g. by
    /// an app restart) becomes the current night again; a completed one is
    /// left alone. Restore failures are logged and leave no current night.
    pub async fn new(
        repository: Arc<dyn NightRepository>,
        clock: Arc<dyn Clock>,
        labels: NightLabels,
    ) -> Self {
        let (tonight_tx, _) = watch::channel(None);
        let (history_tx, _) = watch::channel(String::new());
        let (quality_prompt_tx, _) = watch::channel(None);

        let coordinator = Self {
            repository,
            clock,
            tonight_tx: Arc::new(tonight_tx),
            history_tx: Arc::new(history_tx),
            quality_prompt_tx,
            cancel: CancellationToken::new(),
        };

        match Self::load_tonight(coordinator.repository.as_ref()).await {
            Ok(tonight) => {
                coordinator.tonight_tx.send_replace(tonight);
            }
            Err(e) => tracing::error!("Failed to restore current night: {}", e),
        }

        match coordinator.repository.list_all().await {
            Ok(nights) => {
                coordinator
                    .history_tx
                    .send_replace(format_nights(&nights, &labels));
            }
            Err(e) => tracing::error!("Failed to load night history: {}", e),
        }

        coordinator.spawn_history_task(labels);
        coordinator
    }

    /// Subscribes to the current in-progress night.
    pub fn tonight(&self) -> watch::Receiver<Option<SleepNight>> {
        self.tonight_tx.subscribe()
    }

    /// Subscribes to the formatted history text.
    pub fn history_text(&self) -> watch::Receiver<String> {
        self.history_tx.subscribe()
    }

    /// Subscribes to the quality-rating prompt signal.
    pub fn quality_prompt(&self) -> watch::Receiver<Option<SleepNight>> {
        self.quality_prompt_tx.subscribe()
    }

    /// Starts tracking a new night.
    ///
    /// The new record's start and end timestamps are both set to the
    /// current instant, marking it in progress. The current night is then
    /// re-read from storage.
    pub async fn start_tracking(&self) -> Result<()> {
        let night = SleepNight::new(self.clock.now());
        self.repository.insert(&night).await?;

        let tonight = Self::load_tonight(self.repository.as_ref()).await?;
        self.tonight_tx.send_replace(tonight);
        Ok(())
    }

    /// Stops tracking the current night.
    ///
    /// A no-op when nothing is being tracked. Otherwise the record's end
    /// timestamp is set to the current instant, the change is persisted,
    /// and the quality prompt is raised with the completed night.
    pub async fn stop_tracking(&self) -> Result<()> {
        let current = self.tonight_tx.borrow().clone();
        let Some(mut night) = current else {
            return Ok(());
        };

        night.end_time = self.clock.now();
        self.repository.update(&night).await?;

        self.tonight_tx.send_replace(Some(night.clone()));
        self.quality_prompt_tx.send_replace(Some(night));
        Ok(())
    }

    /// Deletes the entire night history and clears the current night.
    pub async fn clear_history(&self) -> Result<()> {
        self.repository.delete_all().await?;
        self.tonight_tx.send_replace(None);
        Ok(())
    }

    /// Assigns a quality rating to a stored night.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no stored night has the given ID.
    pub async fn set_quality(&self, night_id: &str, quality: SleepQuality) -> Result<()> {
        let mut night = self
            .repository
            .find_by_id(night_id)
            .await?
            .ok_or_else(|| NocturneError::not_found("SleepNight", night_id))?;

        night.quality = Some(quality);
        self.repository.update(&night).await
    }

    /// Acknowledges the quality prompt, clearing the signal.
    pub fn quality_prompt_handled(&self) {
        self.quality_prompt_tx.send_replace(None);
    }

    /// Reads the night to present as "tonight": the most recent record,
    /// provided it is still in progress.
    async fn load_tonight(repository: &dyn NightRepository) -> Result<Option<SleepNight>> {
        let night = repository.most_recent().await?;
        Ok(night.filter(|n| n.is_in_progress()))
    }

    /// Recomputes the history text whenever the repository reports a
    /// change, until the coordinator is dropped.
    fn spawn_history_task(&self, labels: NightLabels) {
        let repository = Arc::clone(&self.repository);
        let history_tx = Arc::clone(&self.history_tx);
        let cancel = self.cancel.clone();
        let mut changes = repository.changes();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    changed = changes.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }

                match repository.list_all().await {
                    Ok(nights) => {
                        history_tx.send_replace(format_nights(&nights, &labels));
                    }
                    Err(e) => tracing::warn!("Failed to refresh night history: {}", e),
                }
            }
        });
    }
}

impl Drop for SleepTrackerCoordinator {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
#[path = "coordinator_test.rs"]
mod tests;
