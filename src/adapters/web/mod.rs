//! Web Adapter - Dashboard HTTP API
//!
//! Axum-based JSON surface in front of the use cases: record CRUD,
//! summary statistics, the rolling-average series, the access gate, and
//! the operational endpoints (/live, /ready, /metrics). Chart rendering
//! happens client-side; this layer only returns the data and the
//! structured outcome tags the front-end turns into banners.

pub mod routes;

use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;
use tracing::info;

use crate::adapters::metrics::MetricsRegistry;
use crate::ports::storage::StorageAdapter;
use crate::usecases::{AccessGate, RecordStore};

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Record operations over the active backend.
    pub store: Arc<RecordStore<dyn StorageAdapter>>,
    /// Write gate; `None` when logins are not required.
    pub gate: Option<Arc<AccessGate>>,
    /// Prometheus registry.
    pub metrics: Arc<MetricsRegistry>,
    /// Rolling-average window from config.
    pub rolling_window: usize,
}

/// Build the dashboard router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/live", get(routes::liveness))
        .route("/ready", get(routes::readiness))
        .route("/metrics", get(routes::metrics))
        .route(
            "/api/records",
            get(routes::list_records).put(routes::upsert_record),
        )
        .route("/api/records/:date", delete(routes::delete_record))
        .route("/api/stats", get(routes::stats))
        .route("/api/stats/rolling", get(routes::rolling))
        .route("/api/login", post(routes::login))
        .route("/api/logout", post(routes::logout))
        .with_state(state)
}

/// Serve the dashboard until the shutdown future resolves.
pub async fn serve(
    state: AppState,
    bind_addr: &str,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!(address = %bind_addr, "Dashboard server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
