//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::{AppConfig, Backend};

/// Load and validate configuration from a TOML file.
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config: AppConfig = toml::from_str(&content)
    .with_context(|| "Failed to parse config.toml")?;

  validate_config(&config)?;

  info!(
    name = %config.tracker.name,
    backend = ?config.storage.backend,
    require_login = config.auth.require_login,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Validate all configuration parameters.
///
/// Checks for:
/// - Non-empty service identity and bind address
/// - Backend-specific settings present for the chosen backend
/// - Sensible timeout / retry / window values
pub fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(
    !config.tracker.name.is_empty(),
    "tracker.name must not be empty"
  );
  anyhow::ensure!(
    !config.server.bind_addr.is_empty(),
    "server.bind_addr must not be empty"
  );

  match config.storage.backend {
    Backend::Sheets => {
      anyhow::ensure!(
        !config.sheets.base_url.is_empty(),
        "sheets.base_url must be set when storage.backend = \"sheets\""
      );
      anyhow::ensure!(
        !config.sheets.spreadsheet_id.is_empty(),
        "sheets.spreadsheet_id must be set when storage.backend = \"sheets\""
      );
      anyhow::ensure!(
        config.sheets.timeout_ms > 0,
        "sheets.timeout_ms must be positive, got {}",
        config.sheets.timeout_ms
      );
      anyhow::ensure!(
        config.sheets.max_retries <= 10,
        "sheets.max_retries must be at most 10, got {}",
        config.sheets.max_retries
      );
    }
    Backend::Sqlite => {
      anyhow::ensure!(
        !config.sqlite.path.is_empty(),
        "sqlite.path must be set when storage.backend = \"sqlite\""
      );
    }
    Backend::Memory => {}
  }

  anyhow::ensure!(
    config.stats.rolling_window >= 1,
    "stats.rolling_window must be at least 1, got {}",
    config.stats.rolling_window
  );

  Ok(())
}
