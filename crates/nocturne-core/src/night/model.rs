//! Sleep night domain model.
//!
//! This module contains the core `SleepNight` entity representing one
//! tracked sleep interval in the application's domain layer.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User-assigned rating for a completed night, on a six-level scale.
///
/// The numeric codes (0-5) are stable and used wherever a rating is
/// entered or displayed as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepQuality {
    VeryBad,
    Poor,
    Soso,
    Ok,
    Good,
    Excellent,
}

impl SleepQuality {
    /// Numeric code of this rating (0-5).
    pub fn code(&self) -> u8 {
        match self {
            Self::VeryBad => 0,
            Self::Poor => 1,
            Self::Soso => 2,
            Self::Ok => 3,
            Self::Good => 4,
            Self::Excellent => 5,
        }
    }

    /// Parses a numeric code back into a rating.
    ///
    /// Returns `None` for codes outside 0-5.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::VeryBad),
            1 => Some(Self::Poor),
            2 => Some(Self::Soso),
            3 => Some(Self::Ok),
            4 => Some(Self::Good),
            5 => Some(Self::Excellent),
            _ => None,
        }
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::VeryBad => "very bad",
            Self::Poor => "poor",
            Self::Soso => "so-so",
            Self::Ok => "ok",
            Self::Good => "good",
            Self::Excellent => "excellent",
        }
    }
}

/// Represents one tracked sleep interval.
///
/// A night is created when the user starts tracking, with both timestamps
/// set to the same instant. Stopping assigns the real end time; the rating
/// is filled in afterwards, if the user provides one.
///
/// Invariant: a night is **in progress** exactly when `end_time` equals
/// `start_time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepNight {
    /// Unique night identifier (UUID format)
    pub id: String,
    /// Instant tracking started
    pub start_time: DateTime<Utc>,
    /// Instant tracking stopped; equals `start_time` while in progress
    pub end_time: DateTime<Utc>,
    /// User rating, absent until the night has been rated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<SleepQuality>,
}

impl SleepNight {
    /// Creates a new in-progress night starting at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            start_time: now,
            end_time: now,
            quality: None,
        }
    }

    /// Whether this night is still being tracked.
    pub fn is_in_progress(&self) -> bool {
        self.end_time == self.start_time
    }

    /// Time slept. Zero while the night is in progress.
    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_new_night_is_in_progress() {
        let night = SleepNight::new(instant(100));
        assert!(night.is_in_progress());
        assert_eq!(night.start_time, night.end_time);
        assert!(night.quality.is_none());
        assert!(!night.id.is_empty());
    }

    #[test]
    fn test_finished_night_is_not_in_progress() {
        let mut night = SleepNight::new(instant(100));
        night.end_time = instant(200);
        assert!(!night.is_in_progress());
        assert_eq!(night.duration(), Duration::seconds(100));
    }

    #[test]
    fn test_unique_ids() {
        let a = SleepNight::new(instant(0));
        let b = SleepNight::new(instant(0));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_quality_codes_round_trip() {
        for code in 0..=5u8 {
            let quality = SleepQuality::from_code(code).unwrap();
            assert_eq!(quality.code(), code);
        }
        assert_eq!(SleepQuality::from_code(6), None);
    }
}
