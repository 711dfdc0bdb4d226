//! Statistics Benchmarks — Dashboard Hot-Path Performance
//!
//! Benchmarks the pure functions recomputed on every dashboard render.
//!
//! Run with: cargo bench --bench stats_bench

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use study_tracker::domain::record::{normalize, StudyRecord};
use study_tracker::domain::stats::{rolling_average, summary};

fn year_of_records() -> Vec<StudyRecord> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..365u64)
        .map(|i| {
            let hours = 0.5 + f64::from(u32::try_from(i % 16).unwrap()) * 0.5;
            StudyRecord::new(start + chrono::Days::new(i), hours)
        })
        .collect()
}

/// Benchmark the summary panel over a year of sessions.
fn bench_summary(c: &mut Criterion) {
    let records = year_of_records();

    c.bench_function("summary_365_records", |b| {
        b.iter(|| {
            let _s = summary(black_box(&records));
        });
    });
}

/// Benchmark the 7-record rolling average over a year of sessions.
fn bench_rolling_average(c: &mut Criterion) {
    let records = year_of_records();

    c.bench_function("rolling_average_365_records_window_7", |b| {
        b.iter(|| {
            let _series = rolling_average(black_box(&records), black_box(7));
        });
    });
}

/// Benchmark normalization of an unsorted read with duplicates.
fn bench_normalize(c: &mut Criterion) {
    let mut records = year_of_records();
    records.reverse();
    records.extend(year_of_records().into_iter().take(30));

    c.bench_function("normalize_395_rows", |b| {
        b.iter(|| {
            let _clean = normalize(black_box(records.clone()));
        });
    });
}

criterion_group!(benches, bench_summary, bench_rolling_average, bench_normalize);
criterion_main!(benches);
