//! Descriptive statistics over the logged record set.
//!
//! Pure functions, no side effects: the dashboard calls these with the
//! current record list and renders the result. Empty input is always
//! well-defined: every metric reports zero rather than NaN.

use serde::{Deserialize, Serialize};

use super::record::StudyRecord;

/// Aggregate metrics for the dashboard's summary panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Sum of all logged hours.
    pub total_hours: f64,
    /// Mean hours per logged day. Zero when no sessions exist.
    pub average_hours: f64,
    /// Number of logged days.
    pub session_count: usize,
    /// Highest single-day total. Zero when no sessions exist.
    pub best_day_hours: f64,
}

/// One point of the rolling-average series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollingPoint {
    /// Date of the underlying record.
    pub date: chrono::NaiveDate,
    /// Mean hours over the trailing window ending at this record.
    pub average: f64,
}

/// Compute summary metrics over the record list.
pub fn summary(records: &[StudyRecord]) -> Summary {
    if records.is_empty() {
        return Summary {
            total_hours: 0.0,
            average_hours: 0.0,
            session_count: 0,
            best_day_hours: 0.0,
        };
    }

    let total_hours: f64 = records.iter().map(|r| r.hours).sum();
    let best_day_hours = records
        .iter()
        .map(|r| r.hours)
        .fold(f64::MIN, f64::max);

    Summary {
        total_hours,
        average_hours: total_hours / records.len() as f64,
        session_count: records.len(),
        best_day_hours,
    }
}

/// Rolling mean over the trailing `window` most recent records.
///
/// The window is positional, not calendar-based: a gap of many days still
/// only looks back over the nearest `window` logged entries, and missing
/// days are neither interpolated nor zero-filled. The first `window - 1`
/// points average over however many records exist so far (min period 1).
///
/// Records must already be sorted ascending by date, which is the only
/// order backends materialize.
pub fn rolling_average(records: &[StudyRecord], window: usize) -> Vec<RollingPoint> {
    let window = window.max(1);
    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let start = (i + 1).saturating_sub(window);
            let slice = &records[start..=i];
            let sum: f64 = slice.iter().map(|r| r.hours).sum();
            RollingPoint {
                date: record.date,
                average: sum / slice.len() as f64,
            }
        })
        .collect()
}
