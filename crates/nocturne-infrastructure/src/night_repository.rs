//! TOML-backed NightRepository implementation.
//!
//! The whole night history is stored as one TOML document (the ledger),
//! written through `AtomicTomlFile`. File I/O runs on the blocking thread
//! pool so async callers are never blocked on disk.

use crate::paths::NocturnePaths;
use crate::storage::AtomicTomlFile;
use async_trait::async_trait;
use nocturne_core::error::{NocturneError, Result};
use nocturne_core::night::{NightRepository, SleepNight};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;

/// On-disk form of the night history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct NightLedger {
    /// Nights in insertion order, oldest first.
    #[serde(default)]
    nights: Vec<SleepNight>,
}

/// File-backed night repository.
///
/// Nights are kept in insertion order in a single `nights.toml` ledger.
/// Every successful mutation bumps the change version so subscribers can
/// re-query.
pub struct TomlNightRepository {
    file: Arc<AtomicTomlFile<NightLedger>>,
    changes_tx: watch::Sender<u64>,
}

impl TomlNightRepository {
    /// Creates a repository backed by the ledger file at `path`.
    ///
    /// The file is created lazily on the first mutation.
    pub fn new(path: PathBuf) -> Self {
        let (changes_tx, _) = watch::channel(0);
        Self {
            file: Arc::new(AtomicTomlFile::new(path)),
            changes_tx,
        }
    }

    /// Creates a repository at the default platform location
    /// (e.g., `~/.local/share/nocturne/nights.toml`).
    pub fn at_default_location() -> Result<Self> {
        Ok(Self::new(NocturnePaths::nights_file()?))
    }

    async fn load_ledger(&self) -> Result<NightLedger> {
        let file = Arc::clone(&self.file);
        tokio::task::spawn_blocking(move || -> Result<NightLedger> {
            Ok(file.load()?.unwrap_or_default())
        })
        .await
        .map_err(|e| NocturneError::internal(format!("Storage task failed: {}", e)))?
    }

    async fn mutate_ledger<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut NightLedger) -> Result<()> + Send + 'static,
    {
        let file = Arc::clone(&self.file);
        tokio::task::spawn_blocking(move || file.update(NightLedger::default(), f))
            .await
            .map_err(|e| NocturneError::internal(format!("Storage task failed: {}", e)))??;

        self.changes_tx.send_modify(|version| *version += 1);
        tracing::debug!(
            "Night ledger updated (version {})",
            *self.changes_tx.borrow()
        );
        Ok(())
    }
}

#[async_trait]
impl NightRepository for TomlNightRepository {
    async fn find_by_id(&self, night_id: &str) -> Result<Option<SleepNight>> {
        let ledger = self.load_ledger().await?;
        Ok(ledger.nights.iter().find(|n| n.id == night_id).cloned())
    }

    async fn most_recent(&self) -> Result<Option<SleepNight>> {
        let ledger = self.load_ledger().await?;
        Ok(ledger.nights.last().cloned())
    }

    async fn insert(&self, night: &SleepNight) -> Result<()> {
        let night = night.clone();
        self.mutate_ledger(move |ledger| {
            ledger.nights.push(night);
            Ok(())
        })
        .await
    }

    async fn update(&self, night: &SleepNight) -> Result<()> {
        let night = night.clone();
        self.mutate_ledger(move |ledger| {
            match ledger.nights.iter_mut().find(|n| n.id == night.id) {
                Some(stored) => {
                    *stored = night;
                    Ok(())
                }
                None => Err(NocturneError::not_found("SleepNight", night.id.clone())),
            }
        })
        .await
    }

    async fn delete_all(&self) -> Result<()> {
        self.mutate_ledger(|ledger| {
            ledger.nights.clear();
            Ok(())
        })
        .await
    }

    async fn list_all(&self) -> Result<Vec<SleepNight>> {
        let ledger = self.load_ledger().await?;
        Ok(ledger.nights.iter().rev().cloned().collect())
    }

    fn changes(&self) -> watch::Receiver<u64> {
        self.changes_tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use nocturne_core::night::SleepQuality;
    use tempfile::TempDir;

    fn instant(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn repo_at(dir: &TempDir) -> TomlNightRepository {
        TomlNightRepository::new(dir.path().join("nights.toml"))
    }

    #[tokio::test]
    async fn test_insert_and_find_by_id() {
        let temp_dir = TempDir::new().unwrap();
        let repository = repo_at(&temp_dir);

        let night = SleepNight::new(instant(100));
        repository.insert(&night).await.unwrap();

        let loaded = repository.find_by_id(&night.id).await.unwrap();
        assert_eq!(loaded, Some(night));
    }

    #[tokio::test]
    async fn test_find_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let repository = repo_at(&temp_dir);

        let result = repository.find_by_id("no-such-night").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_most_recent_is_last_inserted() {
        let temp_dir = TempDir::new().unwrap();
        let repository = repo_at(&temp_dir);

        assert!(repository.most_recent().await.unwrap().is_none());

        let first = SleepNight::new(instant(100));
        let second = SleepNight::new(instant(200));
        repository.insert(&first).await.unwrap();
        repository.insert(&second).await.unwrap();

        let recent = repository.most_recent().await.unwrap().unwrap();
        assert_eq!(recent.id, second.id);
    }

    #[tokio::test]
    async fn test_update_persists_changes() {
        let temp_dir = TempDir::new().unwrap();
        let repository = repo_at(&temp_dir);

        let mut night = SleepNight::new(instant(100));
        repository.insert(&night).await.unwrap();

        night.end_time = instant(200);
        night.quality = Some(SleepQuality::Good);
        repository.update(&night).await.unwrap();

        let loaded = repository.find_by_id(&night.id).await.unwrap().unwrap();
        assert_eq!(loaded.end_time, instant(200));
        assert_eq!(loaded.quality, Some(SleepQuality::Good));
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let repository = repo_at(&temp_dir);

        let night = SleepNight::new(instant(100));
        let err = repository.update(&night).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_all() {
        let temp_dir = TempDir::new().unwrap();
        let repository = repo_at(&temp_dir);

        repository.insert(&SleepNight::new(instant(1))).await.unwrap();
        repository.insert(&SleepNight::new(instant(2))).await.unwrap();
        repository.delete_all().await.unwrap();

        assert!(repository.list_all().await.unwrap().is_empty());
        assert!(repository.most_recent().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_all_newest_first() {
        let temp_dir = TempDir::new().unwrap();
        let repository = repo_at(&temp_dir);

        let first = SleepNight::new(instant(100));
        let second = SleepNight::new(instant(200));
        repository.insert(&first).await.unwrap();
        repository.insert(&second).await.unwrap();

        let nights = repository.list_all().await.unwrap();
        assert_eq!(nights.len(), 2);
        assert_eq!(nights[0].id, second.id);
        assert_eq!(nights[1].id, first.id);
    }

    #[tokio::test]
    async fn test_changes_version_bumps_per_mutation() {
        let temp_dir = TempDir::new().unwrap();
        let repository = repo_at(&temp_dir);

        let changes = repository.changes();
        assert_eq!(*changes.borrow(), 0);

        let night = SleepNight::new(instant(100));
        repository.insert(&night).await.unwrap();
        assert_eq!(*changes.borrow(), 1);

        repository.update(&night).await.unwrap();
        assert_eq!(*changes.borrow(), 2);

        repository.delete_all().await.unwrap();
        assert_eq!(*changes.borrow(), 3);
    }

    #[tokio::test]
    async fn test_failed_update_does_not_bump_version() {
        let temp_dir = TempDir::new().unwrap();
        let repository = repo_at(&temp_dir);

        let changes = repository.changes();
        let night = SleepNight::new(instant(100));
        let _ = repository.update(&night).await.unwrap_err();
        assert_eq!(*changes.borrow(), 0);
    }

    #[tokio::test]
    async fn test_ledger_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let night = SleepNight::new(instant(100));

        {
            let repository = repo_at(&temp_dir);
            repository.insert(&night).await.unwrap();
        }

        let reopened = repo_at(&temp_dir);
        let loaded = reopened.find_by_id(&night.id).await.unwrap();
        assert_eq!(loaded, Some(night));
    }
}
