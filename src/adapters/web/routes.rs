//! Dashboard Route Handlers
//!
//! Every handler speaks JSON and maps use-case outcomes onto HTTP:
//! invalid input is 400, a logged-out write behind the gate is 401, and
//! a storage chain that failed entirely is 502. Read endpoints never
//! fail: a dead chain shows as an empty data set.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::domain::record::StudyRecord;
use crate::domain::stats::{self, RollingPoint, Summary};
use crate::usecases::record_store::{StoreError, UpsertOutcome};

/// Outcome envelope the front-end turns into a banner.
#[derive(Debug, Serialize)]
pub struct OpResponse {
    /// "added", "updated", "deleted", "ok", or "error".
    pub status: &'static str,
    /// Human-readable banner text.
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct UpsertRequest {
    pub date: NaiveDate,
    pub hours: f64,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RollingQuery {
    pub window: Option<usize>,
}

/// Summary panel payload: metrics plus the most recent sessions.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub summary: Summary,
    /// Up to 10 most recent sessions, newest first.
    pub recent: Vec<StudyRecord>,
}

/// Liveness probe: always returns 200 if the process is running.
pub async fn liveness() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Readiness probe: 200 only if some backend in the chain is usable.
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    if state.store.is_healthy().await {
        (StatusCode::OK, "READY")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "NOT READY")
    }
}

/// Prometheus text exposition.
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    state.metrics.render()
}

/// Full ordered record list.
pub async fn list_records(State(state): State<AppState>) -> Json<Vec<StudyRecord>> {
    let records = state.store.list_all().await;
    state.metrics.reads.with_label_values(&["display"]).inc();
    state.metrics.record_count.set(records.len() as f64);
    Json(records)
}

/// Insert or update one study session.
///
/// Hours are snapped to the 0.1 step here, at the input-collection
/// boundary; storage keeps whatever precision it is given.
pub async fn upsert_record(
    State(state): State<AppState>,
    Json(req): Json<UpsertRequest>,
) -> impl IntoResponse {
    if let Some(denied) = require_login(&state) {
        return denied;
    }

    let hours = (req.hours * 10.0).round() / 10.0;
    match state.store.upsert(req.date, hours).await {
        Ok(outcome) => {
            state
                .metrics
                .upserts
                .with_label_values(&[outcome.as_str()])
                .inc();
            let message = match outcome {
                UpsertOutcome::Added => format!("Added {hours} hours for {}", req.date),
                UpsertOutcome::Updated => format!("Updated {} to {hours} hours", req.date),
            };
            (
                StatusCode::OK,
                Json(OpResponse {
                    status: outcome.as_str(),
                    message,
                }),
            )
        }
        Err(e) => store_error_response(&state, e),
    }
}

/// Remove one study session. Succeeds even if the date was never logged.
pub async fn delete_record(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> impl IntoResponse {
    if let Some(denied) = require_login(&state) {
        return denied;
    }

    match state.store.delete(date).await {
        Ok(()) => {
            state.metrics.deletes.with_label_values(&["ok"]).inc();
            (
                StatusCode::OK,
                Json(OpResponse {
                    status: "deleted",
                    message: format!("Deleted entry for {date}"),
                }),
            )
        }
        Err(e) => store_error_response(&state, e),
    }
}

/// Summary metrics plus the recent-sessions panel.
pub async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let records = state.store.list_all().await;
    state.metrics.reads.with_label_values(&["display"]).inc();
    state.metrics.record_count.set(records.len() as f64);

    let summary = stats::summary(&records);
    let recent = records.iter().rev().take(10).copied().collect();
    Json(StatsResponse { summary, recent })
}

/// Rolling-average series.
///
/// Empty until the record count exceeds the window; a shorter history
/// has nothing meaningful to chart.
pub async fn rolling(
    State(state): State<AppState>,
    Query(query): Query<RollingQuery>,
) -> Json<Vec<RollingPoint>> {
    let window = query.window.unwrap_or(state.rolling_window).max(1);
    let records = state.store.list_all().await;
    state.metrics.reads.with_label_values(&["display"]).inc();

    if records.len() <= window {
        return Json(Vec::new());
    }
    Json(stats::rolling_average(&records, window))
}

/// Attempt a login against the access gate.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    let Some(gate) = &state.gate else {
        return (
            StatusCode::OK,
            Json(OpResponse {
                status: "ok",
                message: "Login not required".to_string(),
            }),
        );
    };

    if gate.login(&req.password) {
        (
            StatusCode::OK,
            Json(OpResponse {
                status: "ok",
                message: "Logged in".to_string(),
            }),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(OpResponse {
                status: "error",
                message: "Wrong password".to_string(),
            }),
        )
    }
}

/// Log out; the only transition back to the gated state.
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    if let Some(gate) = &state.gate {
        gate.logout();
    }
    Json(OpResponse {
        status: "ok",
        message: "Logged out".to_string(),
    })
}

/// 401 response when the gate is enabled and nobody is logged in.
fn require_login(state: &AppState) -> Option<(StatusCode, Json<OpResponse>)> {
    match &state.gate {
        Some(gate) if !gate.is_logged_in() => Some((
            StatusCode::UNAUTHORIZED,
            Json(OpResponse {
                status: "error",
                message: "Login required".to_string(),
            }),
        )),
        _ => None,
    }
}

/// Map a store error onto HTTP, counting surfaced backend failures.
fn store_error_response(
    state: &AppState,
    error: StoreError,
) -> (StatusCode, Json<OpResponse>) {
    let status_code = match &error {
        StoreError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        StoreError::Storage(e) => {
            state
                .metrics
                .backend_failures
                .with_label_values(&[e.backend()])
                .inc();
            StatusCode::BAD_GATEWAY
        }
    };
    (
        status_code,
        Json(OpResponse {
            status: "error",
            message: error.to_string(),
        }),
    )
}
