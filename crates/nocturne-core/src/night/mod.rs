//! Sleep night domain module.
//!
//! This module contains all sleep-night-related domain models, the
//! repository interface, and the history formatting logic.
//!
//! # Module Structure
//!
//! - `model`: Core domain model (`SleepNight`, `SleepQuality`)
//! - `repository`: Repository trait for night persistence (`NightRepository`)
//! - `format`: Pure text projection of the night history (`format_nights`)

mod format;
mod model;
mod repository;

// Re-export public API
pub use format::{format_nights, NightLabels};
pub use model::{SleepNight, SleepQuality};
pub use repository::NightRepository;
