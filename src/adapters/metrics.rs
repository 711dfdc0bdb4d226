//! Prometheus Metrics Registry - Tracker Observability
//!
//! Registers and exposes Prometheus metrics for the dashboard service.
//! Covers operation counts by outcome, backend failures, and the size
//! of the record set last observed.

use prometheus::{Encoder, Gauge, IntCounterVec, Opts, Registry, TextEncoder};

/// Centralized Prometheus metrics for the study tracker.
///
/// All metrics follow the naming convention `study_tracker_*` and carry
/// labels for per-backend / per-outcome filtering.
pub struct MetricsRegistry {
    /// Prometheus registry.
    registry: Registry,
    /// Total upserts by outcome (added / updated / error).
    pub upserts: IntCounterVec,
    /// Total deletes by outcome (ok / error).
    pub deletes: IntCounterVec,
    /// Total record-set reads by source (display / fresh).
    pub reads: IntCounterVec,
    /// Backend failures that surfaced past the fallback chain, by backend.
    pub backend_failures: IntCounterVec,
    /// Record count last observed by a read.
    pub record_count: Gauge,
}

impl MetricsRegistry {
    /// Create and register all Prometheus metrics.
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let upserts = IntCounterVec::new(
            Opts::new("study_tracker_upserts_total", "Total upsert operations"),
            &["outcome"],
        )?;

        let deletes = IntCounterVec::new(
            Opts::new("study_tracker_deletes_total", "Total delete operations"),
            &["outcome"],
        )?;

        let reads = IntCounterVec::new(
            Opts::new("study_tracker_reads_total", "Total record-set reads"),
            &["source"],
        )?;

        let backend_failures = IntCounterVec::new(
            Opts::new(
                "study_tracker_backend_failures_total",
                "Backend failures that surfaced past the fallback chain",
            ),
            &["backend"],
        )?;

        let record_count = Gauge::new(
            "study_tracker_record_count",
            "Record count last observed by a read",
        )?;

        // Register all metrics
        registry.register(Box::new(upserts.clone()))?;
        registry.register(Box::new(deletes.clone()))?;
        registry.register(Box::new(reads.clone()))?;
        registry.register(Box::new(backend_failures.clone()))?;
        registry.register(Box::new(record_count.clone()))?;

        Ok(Self {
            registry,
            upserts,
            deletes,
            reads,
            backend_failures,
            record_count,
        })
    }

    /// Render the registry in Prometheus text exposition format.
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        if encoder.encode(&metric_families, &mut buffer).is_err() {
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}
