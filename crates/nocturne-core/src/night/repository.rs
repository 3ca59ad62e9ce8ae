//! Night repository trait.
//!
//! Defines the interface for sleep night persistence operations.

use super::model::SleepNight;
use crate::error::Result;
use async_trait::async_trait;
use tokio::sync::watch;

/// An abstract repository for managing sleep night persistence.
///
/// This trait defines the contract for persisting and retrieving tracked
/// nights, decoupling the application's core logic from the specific
/// storage mechanism (e.g., TOML files, database, remote API).
///
/// # Change notification
///
/// `changes` exposes a watch channel whose value increases after every
/// successful mutation. Subscribers re-query `list_all` when the version
/// moves; this replaces a push-based record stream with invalidation plus
/// re-query, so implementations never hand out stale collections.
#[async_trait]
pub trait NightRepository: Send + Sync {
    /// Finds a night by its ID.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(SleepNight))`: Night found
    /// - `Ok(None)`: Night not found
    /// - `Err(_)`: Error occurred during retrieval
    async fn find_by_id(&self, night_id: &str) -> Result<Option<SleepNight>>;

    /// Returns the most recently inserted night, if any.
    async fn most_recent(&self) -> Result<Option<SleepNight>>;

    /// Persists a newly created night.
    async fn insert(&self, night: &SleepNight) -> Result<()>;

    /// Persists changes to an existing night.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no stored night has the given ID.
    async fn update(&self, night: &SleepNight) -> Result<()>;

    /// Deletes every stored night.
    async fn delete_all(&self) -> Result<()>;

    /// Lists all stored nights, most recently inserted first.
    async fn list_all(&self) -> Result<Vec<SleepNight>>;

    /// Returns a receiver for the repository's change version.
    ///
    /// The held value increases after every successful `insert`, `update`
    /// and `delete_all`.
    fn changes(&self) -> watch::Receiver<u64>;
}
