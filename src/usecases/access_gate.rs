//! Access Gate - Shared-secret Write Protection
//!
//! Single static password compared in plaintext; a successful match
//! flips a process-scoped flag that makes the write endpoints reachable.
//! Reads and statistics are never gated. No hashing, no rate limiting,
//! no expiry beyond the process lifetime. This protects a single-admin
//! deployment, nothing more.

use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use tracing::{info, warn};

/// Env var holding the admin password.
pub const PASSWORD_ENV: &str = "STUDY_ADMIN_PASSWORD";

/// Session login state: LoggedOut -> (password matches) -> LoggedIn
/// -> (logout) -> LoggedOut. No other transitions.
pub struct AccessGate {
  secret: String,
  logged_in: AtomicBool,
}

impl AccessGate {
  /// Create a gate with an explicit secret (tests, alternate wiring).
  pub fn new(secret: impl Into<String>) -> Self {
    Self {
      secret: secret.into(),
      logged_in: AtomicBool::new(false),
    }
  }

  /// Load the secret from the environment.
  ///
  /// Required env var: STUDY_ADMIN_PASSWORD. It MUST be set in `.env`
  /// (never committed to git).
  pub fn from_env() -> Result<Self> {
    let secret = std::env::var(PASSWORD_ENV)
      .with_context(|| format!("{PASSWORD_ENV} not set"))?;
    Ok(Self::new(secret))
  }

  /// Attempt a login. Returns whether the password matched.
  pub fn login(&self, password: &str) -> bool {
    let matched = password == self.secret;
    if matched {
      self.logged_in.store(true, Ordering::Relaxed);
      info!("Admin logged in");
    } else {
      warn!("Rejected login attempt");
    }
    matched
  }

  /// Explicit logout; the only transition back to LoggedOut.
  pub fn logout(&self) {
    self.logged_in.store(false, Ordering::Relaxed);
    info!("Admin logged out");
  }

  /// Whether write operations are currently reachable.
  pub fn is_logged_in(&self) -> bool {
    self.logged_in.load(Ordering::Relaxed)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_starts_logged_out() {
    let gate = AccessGate::new("hunter2");
    assert!(!gate.is_logged_in());
  }

  #[test]
  fn test_wrong_password_stays_logged_out() {
    let gate = AccessGate::new("hunter2");
    assert!(!gate.login("hunter3"));
    assert!(!gate.is_logged_in());
  }

  #[test]
  fn test_login_then_logout() {
    let gate = AccessGate::new("hunter2");
    assert!(gate.login("hunter2"));
    assert!(gate.is_logged_in());
    gate.logout();
    assert!(!gate.is_logged_in());
  }

  #[test]
  fn test_failed_login_does_not_revoke_session() {
    let gate = AccessGate::new("hunter2");
    gate.login("hunter2");
    gate.login("wrong");
    // Only an explicit logout transitions back to LoggedOut.
    assert!(gate.is_logged_in());
  }
}
