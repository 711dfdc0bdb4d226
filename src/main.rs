//! Study Tracker — Entry Point
//!
//! Initializes configuration, logging, the storage backend chain, and
//! the dashboard HTTP server. Runs until SIGINT.
//!
//! Wiring sequence:
//! 1. Load config.toml + validate
//! 2. Init tracing (JSON structured logging)
//! 3. Build the storage chain for the configured backend
//!    (sheets → memory fallback, local SQLite, or memory only)
//! 4. Create the RecordStore over the chain
//! 5. Load the AccessGate secret from env when logins are required
//! 6. Serve the dashboard API until SIGINT → graceful shutdown

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::info;

mod adapters;
mod config;
mod domain;
mod ports;
mod usecases;

use adapters::fallback::FallbackStorage;
use adapters::memory::EphemeralAdapter;
use adapters::metrics::MetricsRegistry;
use adapters::sheets::{RemoteTableAdapter, SheetsAuth, SheetsClient, SheetsClientConfig};
use adapters::sqlite::LocalTableAdapter;
use adapters::web::{self, AppState};
use config::{AppConfig, Backend};
use ports::storage::StorageAdapter;
use usecases::{AccessGate, RecordStore};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration from config.toml ──────────────
    let config = config::loader::load_config("config.toml")
        .context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new(&config.tracker.log_level)
                }),
        )
        .json()
        .init();

    info!(
        name = %config.tracker.name,
        version = env!("CARGO_PKG_VERSION"),
        backend = ?config.storage.backend,
        "Starting study tracker"
    );

    // ── 3. Build the storage chain for the configured backend ──
    let storage = build_storage(&config).context("Failed to build storage backend")?;

    // ── 4. Record store over the chain ──────────────────────
    let store = Arc::new(RecordStore::new(storage));

    // ── 5. Access gate (local-table deployments) ────────────
    let gate = if config.auth.require_login {
        Some(Arc::new(
            AccessGate::from_env().context("Failed to load admin password from env")?,
        ))
    } else {
        None
    };

    // ── 6. Serve the dashboard until SIGINT ─────────────────
    let metrics = Arc::new(MetricsRegistry::new().context("Failed to build metrics")?);
    let state = AppState {
        store,
        gate,
        metrics,
        rolling_window: config.stats.rolling_window,
    };

    let shutdown = async {
        let _ = signal::ctrl_c().await;
        info!("SIGINT received, shutting down");
    };

    web::serve(state, &config.server.bind_addr, shutdown).await?;

    info!("Shutdown complete");
    Ok(())
}

/// Instantiate the storage adapter chain for the configured backend.
///
/// `sheets` composes the remote adapter with an in-memory fallback so a
/// dead spreadsheet degrades instead of failing writes; `sqlite` and
/// `memory` run a single adapter.
fn build_storage(config: &AppConfig) -> Result<Arc<dyn StorageAdapter>> {
    match config.storage.backend {
        Backend::Sheets => {
            let auth =
                SheetsAuth::from_env().context("Failed to load sheets token from env")?;
            let client_config = SheetsClientConfig {
                base_url: config.sheets.base_url.clone(),
                spreadsheet_id: config.sheets.spreadsheet_id.clone(),
                timeout: Duration::from_millis(config.sheets.timeout_ms),
                max_retries: config.sheets.max_retries,
                retry_base_delay: Duration::from_millis(200),
            };
            let client = SheetsClient::new(auth, client_config)
                .context("Failed to create sheets client")?;
            let remote = RemoteTableAdapter::new(
                client,
                Duration::from_secs(config.sheets.cache_ttl_secs),
            );
            Ok(Arc::new(FallbackStorage::new(vec![
                Box::new(remote),
                Box::new(EphemeralAdapter::new()),
            ])))
        }
        Backend::Sqlite => {
            let store = LocalTableAdapter::open(&config.sqlite.path)?;
            Ok(Arc::new(store))
        }
        Backend::Memory => Ok(Arc::new(EphemeralAdapter::new())),
    }
}
