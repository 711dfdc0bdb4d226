//! Core study-session domain types.
//!
//! Defines the `StudyRecord` entity and its input validation rules.
//! These types are the foundation of the hexagonal architecture's inner ring:
//! every backend stores exactly this shape and every use case operates on it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum loggable hours for a single day.
pub const MAX_HOURS: f64 = 24.0;

/// Date format used on the wire and in every backend.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single logged study session.
///
/// The date is the unique key: at most one record exists per calendar
/// day, and upserting an existing date replaces its hours in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StudyRecord {
    /// Calendar day the session belongs to (no time component).
    pub date: NaiveDate,
    /// Hours studied, 0 < hours <= 24.
    pub hours: f64,
}

impl StudyRecord {
    /// Create a record without validating it.
    ///
    /// Validation happens at the use-case boundary via [`validate_input`];
    /// adapters reading persisted rows accept them as-is.
    pub fn new(date: NaiveDate, hours: f64) -> Self {
        Self { date, hours }
    }

    /// ISO-8601 `YYYY-MM-DD` form used by every backend.
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

impl std::fmt::Display for StudyRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {:.1}h", self.date_string(), self.hours)
    }
}

/// Input validation failures, surfaced before any backend access.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidRecord {
    /// Hours must be strictly positive.
    #[error("hours must be greater than 0, got {0}")]
    NonPositiveHours(f64),
    /// Hours cannot exceed a full day.
    #[error("hours cannot exceed {MAX_HOURS}, got {0}")]
    HoursTooLarge(f64),
    /// Sessions cannot be logged ahead of time.
    #[error("date {0} is in the future")]
    FutureDate(NaiveDate),
}

/// Validate a `(date, hours)` pair against `today`.
///
/// Rejects non-positive hours, hours above [`MAX_HOURS`], and future
/// dates. Today itself is loggable.
pub fn validate_input(
    date: NaiveDate,
    hours: f64,
    today: NaiveDate,
) -> Result<(), InvalidRecord> {
    if !(hours > 0.0) {
        return Err(InvalidRecord::NonPositiveHours(hours));
    }
    if hours > MAX_HOURS {
        return Err(InvalidRecord::HoursTooLarge(hours));
    }
    if date > today {
        return Err(InvalidRecord::FutureDate(date));
    }
    Ok(())
}

/// Sort ascending by date and drop duplicate dates, keeping the last
/// occurrence.
///
/// Applied whenever a record set is materialized from a backend, so the
/// one-record-per-date invariant holds even if the stored table drifted.
pub fn normalize(mut records: Vec<StudyRecord>) -> Vec<StudyRecord> {
    records.sort_by_key(|r| r.date);
    // dedup_by keeps the FIRST of a run, so walk from the end instead.
    let mut out: Vec<StudyRecord> = Vec::with_capacity(records.len());
    for record in records.into_iter().rev() {
        if out.last().map(|r: &StudyRecord| r.date) != Some(record.date) {
            out.push(record);
        }
    }
    out.reverse();
    out
}
