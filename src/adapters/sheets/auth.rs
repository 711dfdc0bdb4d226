//! Sheets Authentication — Bearer Token Handling
//!
//! The spreadsheet values API authenticates with a static bearer token.
//! The token comes from the STUDY_SHEETS_TOKEN environment variable and
//! is attached to every request; it is never read from config files.

use anyhow::{Context, Result};

/// Env var holding the spreadsheet API bearer token.
pub const TOKEN_ENV: &str = "STUDY_SHEETS_TOKEN";

/// Credentials for the spreadsheet values API.
pub struct SheetsAuth {
  /// Bearer token from STUDY_SHEETS_TOKEN (never logged).
  token: String,
}

impl SheetsAuth {
  /// Load the token from the environment.
  ///
  /// Required env var: STUDY_SHEETS_TOKEN. It MUST be set in `.env`
  /// (never committed to git).
  pub fn from_env() -> Result<Self> {
    let token = std::env::var(TOKEN_ENV)
      .with_context(|| format!("{TOKEN_ENV} not set"))?;
    Ok(Self { token })
  }

  /// Build credentials from an explicit token (tests, alternate wiring).
  pub fn with_token(token: impl Into<String>) -> Self {
    Self {
      token: token.into(),
    }
  }

  /// The Authorization header value for a request.
  pub fn bearer(&self) -> String {
    format!("Bearer {}", self.token)
  }
}
