//! Sheets HTTP Client - Retrying REST Client for the Values API
//!
//! Wraps reqwest with timeouts, retries, and bearer authentication for
//! the spreadsheet values endpoints. The adapter above it never touches
//! reqwest directly.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tokio::time::sleep;
use tracing::{debug, warn};

use super::auth::SheetsAuth;

/// Configuration for the sheets HTTP client.
#[derive(Debug, Clone)]
pub struct SheetsClientConfig {
  /// Base URL for the values API.
  pub base_url: String,
  /// Spreadsheet document identifier.
  pub spreadsheet_id: String,
  /// Request timeout.
  pub timeout: Duration,
  /// Maximum retries on transient errors.
  pub max_retries: u32,
  /// Base delay between retries (exponential backoff).
  pub retry_base_delay: Duration,
}

impl Default for SheetsClientConfig {
  fn default() -> Self {
    Self {
      base_url: "https://sheets.example.com".to_string(),
      spreadsheet_id: String::new(),
      timeout: Duration::from_secs(10),
      max_retries: 3,
      retry_base_delay: Duration::from_millis(200),
    }
  }
}

/// Retrying HTTP client for the spreadsheet values API.
pub struct SheetsClient {
  /// Underlying HTTP client.
  http: Client,
  /// Bearer credentials.
  auth: SheetsAuth,
  /// Client configuration.
  config: SheetsClientConfig,
}

impl SheetsClient {
  /// Create a new sheets client.
  pub fn new(auth: SheetsAuth, config: SheetsClientConfig) -> Result<Self> {
    let http = Client::builder()
      .timeout(config.timeout)
      .pool_max_idle_per_host(2)
      .build()
      .context("Failed to build HTTP client")?;

    Ok(Self { http, auth, config })
  }

  /// URL of the values resource for one worksheet.
  fn values_url(&self, worksheet: &str) -> String {
    format!(
      "{}/v1/spreadsheets/{}/values/{}",
      self.config.base_url, self.config.spreadsheet_id, worksheet
    )
  }

  /// Fetch the raw values grid of a worksheet.
  ///
  /// A 404 means the worksheet identifier does not exist; callers probe
  /// the next candidate on that.
  pub async fn get_values(&self, worksheet: &str) -> Result<Response> {
    let request = self.http.get(self.values_url(worksheet));
    self.execute_with_retry(request, "GET", worksheet).await
  }

  /// Replace the full values grid of a worksheet.
  pub async fn put_values(
    &self,
    worksheet: &str,
    body: &serde_json::Value,
  ) -> Result<Response> {
    let request = self
      .http
      .put(self.values_url(worksheet))
      .header("Content-Type", "application/json")
      .body(body.to_string());
    self.execute_with_retry(request, "PUT", worksheet).await
  }

  /// Execute a request with authentication and bounded retries.
  ///
  /// Retries transport errors, 429 and 5xx; 4xx responses (including the
  /// 404 the worksheet probe relies on) are returned to the caller as
  /// errors immediately.
  async fn execute_with_retry(
    &self,
    request: RequestBuilder,
    method: &str,
    worksheet: &str,
  ) -> Result<Response> {
    let mut last_error = None;

    for attempt in 0..=self.config.max_retries {
      if attempt > 0 {
        let delay = self.config.retry_base_delay * 2u32.pow(attempt - 1);
        debug!(attempt, delay_ms = delay.as_millis(), "Retrying request");
        sleep(delay).await;
      }

      let req = request
        .try_clone()
        .context("Failed to clone request")?
        .header("Authorization", self.auth.bearer());

      match req.send().await {
        Ok(response) => match response.status() {
          StatusCode::OK | StatusCode::CREATED => return Ok(response),
          StatusCode::TOO_MANY_REQUESTS => {
            warn!(worksheet, "Rate limited by sheets API, backing off");
            last_error = Some(anyhow::anyhow!("Rate limited"));
            continue;
          }
          status if status.is_server_error() => {
            warn!(status = %status, worksheet, "Server error, retrying");
            last_error = Some(anyhow::anyhow!("Server error: {status}"));
            continue;
          }
          status => {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
              "{method} {worksheet} failed with {status}: {body}"
            ));
          }
        },
        Err(e) => {
          warn!(error = %e, attempt, worksheet, "Request failed");
          last_error = Some(e.into());
          continue;
        }
      }
    }

    Err(last_error.unwrap_or_else(|| anyhow::anyhow!("Max retries exceeded")))
  }

  /// Check if the API is reachable via the first worksheet candidate.
  pub async fn health_check(&self, worksheet: &str) -> bool {
    self.get_values(worksheet).await.is_ok()
  }
}
