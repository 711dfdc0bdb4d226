//! Configuration Module - TOML-based Tracker Configuration
//!
//! Loads and validates configuration from `config.toml`. Backend
//! selection, endpoints, and tuning knobs are externalized here -
//! nothing is hardcoded in the domain layer. Secrets (sheets token,
//! admin password) come from the environment, never from the TOML.

pub mod loader;

use serde::Deserialize;

/// Top-level tracker configuration.
///
/// Loaded from `config.toml` at startup. All fields are validated
/// before the service begins operation.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// Service identity and logging.
  pub tracker: TrackerConfig,
  /// Backend selection.
  pub storage: StorageConfig,
  /// Spreadsheet backend settings (required when backend = "sheets").
  #[serde(default)]
  pub sheets: SheetsConfig,
  /// Local table backend settings (required when backend = "sqlite").
  #[serde(default)]
  pub sqlite: SqliteConfig,
  /// HTTP serving.
  pub server: ServerConfig,
  /// Write-protection gate.
  #[serde(default)]
  pub auth: AuthConfig,
  /// Dashboard statistics tuning.
  #[serde(default)]
  pub stats: StatsConfig,
}

/// Service identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerConfig {
  /// Human-readable service name.
  pub name: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
}

/// Which backend owns the record set.
///
/// Switching backends starts a disjoint data set; there is no
/// cross-backend synchronization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
  /// Remote spreadsheet with in-memory fallback.
  Sheets,
  /// Local SQLite table (the AccessGate deployment variant).
  Sqlite,
  /// In-process memory only; data dies with the session.
  Memory,
}

/// Backend selection.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
  /// Active backend: "sheets", "sqlite", or "memory".
  pub backend: Backend,
}

/// Spreadsheet values API settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetsConfig {
  /// Base URL of the values API.
  #[serde(default)]
  pub base_url: String,
  /// Spreadsheet document identifier.
  #[serde(default)]
  pub spreadsheet_id: String,
  /// Request timeout in milliseconds.
  #[serde(default = "default_timeout_ms")]
  pub timeout_ms: u64,
  /// Read cache TTL in seconds.
  #[serde(default = "default_cache_ttl")]
  pub cache_ttl_secs: u64,
  /// Maximum retries on transient errors.
  #[serde(default = "default_max_retries")]
  pub max_retries: u32,
}

impl Default for SheetsConfig {
  fn default() -> Self {
    Self {
      base_url: String::new(),
      spreadsheet_id: String::new(),
      timeout_ms: default_timeout_ms(),
      cache_ttl_secs: default_cache_ttl(),
      max_retries: default_max_retries(),
    }
  }
}

/// Local SQLite settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SqliteConfig {
  /// Database file path.
  #[serde(default = "default_sqlite_path")]
  pub path: String,
}

impl Default for SqliteConfig {
  fn default() -> Self {
    Self {
      path: default_sqlite_path(),
    }
  }
}

/// HTTP serving settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  /// Bind address, e.g. "0.0.0.0:8080".
  pub bind_addr: String,
}

/// Write-protection gate settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
  /// Gate the write endpoints behind STUDY_ADMIN_PASSWORD.
  #[serde(default)]
  pub require_login: bool,
}

/// Dashboard statistics settings.
#[derive(Debug, Clone, Deserialize)]
pub struct StatsConfig {
  /// Rolling-average window, in records.
  #[serde(default = "default_rolling_window")]
  pub rolling_window: usize,
}

impl Default for StatsConfig {
  fn default() -> Self {
    Self {
      rolling_window: default_rolling_window(),
    }
  }
}

fn default_log_level() -> String {
  "info".to_string()
}

fn default_timeout_ms() -> u64 {
  10_000
}

fn default_cache_ttl() -> u64 {
  5
}

fn default_max_retries() -> u32 {
  3
}

fn default_sqlite_path() -> String {
  "data/study.db".to_string()
}

fn default_rolling_window() -> usize {
  7
}
