//! Unified path management for Nocturne data files.
//!
//! All tracked data lives under the platform data directory, resolved via
//! the `dirs` crate. This ensures consistency across Linux, macOS and
//! Windows.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.local/share/nocturne/     # Data directory (Linux)
//! └── nights.toml              # The night ledger
//! ```

use nocturne_core::error::{NocturneError, Result};
use std::path::PathBuf;

/// Unified path management for Nocturne.
pub struct NocturnePaths;

impl NocturnePaths {
    /// Returns the Nocturne data directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to the data directory (e.g., `~/.local/share/nocturne/`)
    /// - `Err(_)`: Could not determine the platform data directory
    pub fn data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|base| base.join("nocturne"))
            .ok_or_else(|| NocturneError::config("Cannot determine platform data directory"))
    }

    /// Returns the path to the night ledger file.
    pub fn nights_file() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("nights.toml"))
    }
}
