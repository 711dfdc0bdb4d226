//! Remote Table Adapter - Spreadsheet-backed StorageAdapter
//!
//! Implements the storage port against the values API: worksheet probing,
//! a short-TTL read cache, and full-replace writes that re-prime the
//! cache so the next displayed state reflects the just-applied change.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::client::SheetsClient;
use super::values::{self, ValuesGrid};
use crate::domain::record::StudyRecord;
use crate::ports::storage::{StorageAdapter, StorageError};

/// Worksheet identifiers probed in fixed priority order.
///
/// The numeric index comes first, then the case variants of the sheet
/// name. The winning identifier is deliberately not remembered: every
/// call walks this list from the top, so a transient failure of the
/// preferred worksheet falls back again on the next call at the cost of
/// one extra request. Known inefficiency, kept on purpose.
pub const WORKSHEET_CANDIDATES: [&str; 4] =
  ["0", "study_tracker", "Study_Tracker", "STUDY_TRACKER"];

const BACKEND: &str = "sheets";

struct CachedRead {
  fetched_at: Instant,
  records: Vec<StudyRecord>,
}

/// Spreadsheet-backed record storage with a short read cache.
pub struct RemoteTableAdapter {
  client: SheetsClient,
  cache_ttl: Duration,
  cache: RwLock<Option<CachedRead>>,
}

impl RemoteTableAdapter {
  /// Create an adapter over an authenticated client.
  pub fn new(client: SheetsClient, cache_ttl: Duration) -> Self {
    Self {
      client,
      cache_ttl,
      cache: RwLock::new(None),
    }
  }

  /// Probe the worksheet candidates in order and return the first grid
  /// that the API serves, together with the identifier that won.
  async fn fetch_grid(&self) -> Result<(&'static str, ValuesGrid), StorageError> {
    let mut last_reason = String::from("no worksheet candidates");
    for worksheet in WORKSHEET_CANDIDATES {
      match self.client.get_values(worksheet).await {
        Ok(response) => match response.json::<ValuesGrid>().await {
          Ok(grid) => {
            debug!(worksheet, rows = grid.values.len(), "Worksheet read");
            return Ok((worksheet, grid));
          }
          Err(e) => {
            warn!(worksheet, error = %e, "Worksheet returned malformed grid");
            last_reason = format!("{worksheet}: malformed grid: {e}");
          }
        },
        Err(e) => {
          debug!(worksheet, error = %e, "Worksheet candidate failed");
          last_reason = format!("{worksheet}: {e}");
        }
      }
    }
    Err(StorageError::Unavailable {
      backend: BACKEND,
      reason: last_reason,
    })
  }

  /// Fetch records from the API, bypassing and re-priming the cache.
  async fn fetch_records(&self) -> Result<Vec<StudyRecord>, StorageError> {
    let (_, grid) = self.fetch_grid().await?;
    let records = values::parse_records(&grid);
    self.prime_cache(records.clone()).await;
    Ok(records)
  }

  async fn prime_cache(&self, records: Vec<StudyRecord>) {
    let mut guard = self.cache.write().await;
    *guard = Some(CachedRead {
      fetched_at: Instant::now(),
      records,
    });
  }

  async fn cached(&self) -> Option<Vec<StudyRecord>> {
    let guard = self.cache.read().await;
    guard
      .as_ref()
      .filter(|c| c.fetched_at.elapsed() < self.cache_ttl)
      .map(|c| c.records.clone())
  }
}

#[async_trait]
impl StorageAdapter for RemoteTableAdapter {
  fn name(&self) -> &'static str {
    BACKEND
  }

  async fn read_all(&self) -> Result<Vec<StudyRecord>, StorageError> {
    if let Some(records) = self.cached().await {
      debug!(count = records.len(), "Serving cached worksheet read");
      return Ok(records);
    }
    self.fetch_records().await
  }

  async fn read_all_fresh(&self) -> Result<Vec<StudyRecord>, StorageError> {
    self.fetch_records().await
  }

  async fn write_all(&self, records: &[StudyRecord]) -> Result<(), StorageError> {
    // The write must target a worksheet that actually resolves, so the
    // probe runs here too before the PUT.
    let (worksheet, _) = self.fetch_grid().await?;
    let grid = values::to_grid(records);
    let body = serde_json::to_value(&grid).map_err(|e| StorageError::WriteRejected {
      backend: BACKEND,
      reason: format!("grid serialization failed: {e}"),
    })?;

    self
      .client
      .put_values(worksheet, &body)
      .await
      .map_err(|e| StorageError::WriteRejected {
        backend: BACKEND,
        reason: e.to_string(),
      })?;

    // Written state is the freshest possible snapshot.
    self.prime_cache(records.to_vec()).await;
    Ok(())
  }

  async fn is_healthy(&self) -> bool {
    self.fetch_grid().await.is_ok()
  }
}
