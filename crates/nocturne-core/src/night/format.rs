//! Pure text projection of the night history.
//!
//! The UI renders the full tracking history as one block of text. This
//! module owns that projection: given the stored nights and the display
//! strings, produce the text. No I/O and no state.

use super::model::SleepNight;
use chrono::Duration;

/// Display strings used by `format_nights`.
///
/// Kept as data rather than constants so a UI shell can substitute
/// localized strings.
#[derive(Debug, Clone)]
pub struct NightLabels {
    /// Line printed above the night list.
    pub header: String,
    /// Text shown when no nights are stored.
    pub empty: String,
    /// Marker for a night still being tracked.
    pub in_progress: String,
    /// Word preceding the slept duration.
    pub slept: String,
    /// Word preceding the quality label.
    pub rated: String,
}

impl Default for NightLabels {
    fn default() -> Self {
        Self {
            header: "Here is your sleep data:".to_string(),
            empty: "No nights tracked yet.".to_string(),
            in_progress: "still in progress".to_string(),
            slept: "slept".to_string(),
            rated: "rated".to_string(),
        }
    }
}

/// Formats the night history as human-readable text.
///
/// Nights are rendered in the order given (callers pass them newest
/// first), one line per night. Returns the empty-state text when there
/// are no nights.
pub fn format_nights(nights: &[SleepNight], labels: &NightLabels) -> String {
    if nights.is_empty() {
        return labels.empty.clone();
    }

    let mut out = String::new();
    out.push_str(&labels.header);
    out.push('\n');

    for night in nights {
        out.push('\n');
        let start = night.start_time.format("%Y-%m-%d %H:%M");
        if night.is_in_progress() {
            out.push_str(&format!("{}: {}", start, labels.in_progress));
        } else {
            let end = night.end_time.format("%Y-%m-%d %H:%M");
            out.push_str(&format!(
                "{} to {}, {} {}",
                start,
                end,
                labels.slept,
                format_duration(night.duration())
            ));
            if let Some(quality) = night.quality {
                out.push_str(&format!(", {} {}", labels.rated, quality.label()));
            }
        }
    }

    out
}

fn format_duration(duration: Duration) -> String {
    let minutes = duration.num_minutes();
    let hours = minutes / 60;
    let minutes = minutes % 60;
    if hours > 0 {
        format!("{} h {:02} min", hours, minutes)
    } else {
        format!("{} min", minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::night::SleepQuality;
    use chrono::{DateTime, TimeZone, Utc};

    fn instant(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn finished_night(start: i64, end: i64) -> SleepNight {
        let mut night = SleepNight::new(instant(start));
        night.end_time = instant(end);
        night
    }

    #[test]
    fn test_empty_history() {
        let labels = NightLabels::default();
        assert_eq!(format_nights(&[], &labels), labels.empty);
    }

    #[test]
    fn test_in_progress_line() {
        let labels = NightLabels::default();
        let night = SleepNight::new(instant(0));
        let text = format_nights(&[night], &labels);
        assert!(text.starts_with(&labels.header));
        assert!(text.contains("still in progress"));
    }

    #[test]
    fn test_finished_line_with_duration() {
        let labels = NightLabels::default();
        // 8 hours 20 minutes
        let night = finished_night(0, 8 * 3600 + 20 * 60);
        let text = format_nights(&[night], &labels);
        assert!(text.contains("slept 8 h 20 min"));
        assert!(!text.contains("rated"));
    }

    #[test]
    fn test_sub_hour_duration() {
        let labels = NightLabels::default();
        let night = finished_night(0, 45 * 60);
        let text = format_nights(&[night], &labels);
        assert!(text.contains("slept 45 min"));
    }

    #[test]
    fn test_rated_night_shows_quality() {
        let labels = NightLabels::default();
        let mut night = finished_night(0, 3600);
        night.quality = Some(SleepQuality::Good);
        let text = format_nights(&[night], &labels);
        assert!(text.contains("rated good"));
    }

    #[test]
    fn test_order_is_preserved() {
        let labels = NightLabels::default();
        let newer = finished_night(1000, 2000);
        let older = finished_night(0, 500);
        let text = format_nights(&[newer.clone(), older], &labels);
        let newer_pos = text.find("1970-01-01 00:16").unwrap();
        let older_pos = text.find("1970-01-01 00:00").unwrap();
        assert!(newer_pos < older_pos);
    }
}
