//! Property-Based Tests — Domain Layer Invariants
//!
//! Uses `proptest` to verify that domain components maintain
//! invariants across random inputs.

use chrono::NaiveDate;
use proptest::prelude::*;

use study_tracker::domain::record::{normalize, StudyRecord};
use study_tracker::domain::stats::{rolling_average, summary};

fn arb_records(max_len: usize) -> impl Strategy<Value = Vec<StudyRecord>> {
    prop::collection::vec((0u32..3650, 0.1f64..24.0), 0..max_len).prop_map(|pairs| {
        let epoch = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        normalize(
            pairs
                .into_iter()
                .map(|(offset, hours)| {
                    StudyRecord::new(epoch + chrono::Days::new(u64::from(offset)), hours)
                })
                .collect(),
        )
    })
}

// ── Record-set normalization ────────────────────────────────

proptest! {
    /// Normalized record sets are sorted ascending with unique dates.
    #[test]
    fn normalize_sorts_and_dedupes(records in arb_records(50)) {
        prop_assert!(records.windows(2).all(|w| w[0].date < w[1].date));
    }

    /// Normalizing twice changes nothing.
    #[test]
    fn normalize_is_idempotent(records in arb_records(50)) {
        let again = normalize(records.clone());
        prop_assert_eq!(again, records);
    }
}

// ── Summary Properties ──────────────────────────────────────

proptest! {
    /// Total is the sum, count is the length, and the mean ties them.
    #[test]
    fn summary_totals_are_consistent(records in arb_records(50)) {
        let s = summary(&records);
        prop_assert_eq!(s.session_count, records.len());
        let expected: f64 = records.iter().map(|r| r.hours).sum();
        prop_assert!((s.total_hours - expected).abs() < 1e-6);
        if !records.is_empty() {
            let mean = expected / records.len() as f64;
            prop_assert!((s.average_hours - mean).abs() < 1e-6);
        }
    }

    /// The best day is an hours value that actually occurs.
    #[test]
    fn summary_best_day_is_attained(records in arb_records(50)) {
        prop_assume!(!records.is_empty());
        let s = summary(&records);
        prop_assert!(records.iter().any(|r| (r.hours - s.best_day_hours).abs() < 1e-9));
        prop_assert!(records.iter().all(|r| r.hours <= s.best_day_hours + 1e-9));
    }
}

// ── Rolling-Average Properties ──────────────────────────────

proptest! {
    /// Every rolling point stays within the global hours range.
    #[test]
    fn rolling_stays_within_bounds(records in arb_records(50), window in 1usize..10) {
        let series = rolling_average(&records, window);
        prop_assert_eq!(series.len(), records.len());
        if records.is_empty() {
            return Ok(());
        }
        let lo = records.iter().map(|r| r.hours).fold(f64::MAX, f64::min);
        let hi = records.iter().map(|r| r.hours).fold(f64::MIN, f64::max);
        for point in &series {
            prop_assert!(point.average >= lo - 1e-9);
            prop_assert!(point.average <= hi + 1e-9);
        }
    }

    /// A window of one reproduces the raw series.
    #[test]
    fn rolling_window_one_is_identity(records in arb_records(50)) {
        let series = rolling_average(&records, 1);
        for (point, record) in series.iter().zip(&records) {
            prop_assert_eq!(point.date, record.date);
            prop_assert!((point.average - record.hours).abs() < 1e-9);
        }
    }
}
