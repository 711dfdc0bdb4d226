//! Storage Port - Record Persistence Interface
//!
//! Defines the uniform contract every backend implements: read the full
//! ordered record set, replace it wholesale, or apply a single row change.
//! Full-replace backends get the row operations for free via default
//! implementations; the SQLite adapter overrides them with true row-level
//! SQL so its delta semantics are preserved behind the same trait.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::record::{normalize, StudyRecord};

/// Typed failure kinds an adapter can report.
///
/// Callers never see raw transport or SQL errors: adapters fold them into
/// these variants so the fallback chain can decide what to absorb.
#[derive(Debug, Error)]
pub enum StorageError {
  /// Backend could not be reached or read (connection/auth/schema/IO).
  #[error("{backend} backend unavailable: {reason}")]
  Unavailable {
    backend: &'static str,
    reason: String,
  },
  /// Backend was reachable but refused or failed the write.
  #[error("{backend} write rejected: {reason}")]
  WriteRejected {
    backend: &'static str,
    reason: String,
  },
}

impl StorageError {
  /// Which backend produced this error.
  pub fn backend(&self) -> &'static str {
    match self {
      Self::Unavailable { backend, .. } | Self::WriteRejected { backend, .. } => backend,
    }
  }
}

/// Trait for record persistence backends.
///
/// All methods operate on the full logical table of `(date, hours)` rows.
/// Implementations must keep the returned set sorted ascending by date
/// with at most one record per date.
#[async_trait]
pub trait StorageAdapter: Send + Sync + 'static {
  /// Stable backend label for logs and metrics.
  fn name(&self) -> &'static str;

  /// Read the full ordered record set.
  ///
  /// An empty backend yields an empty vec. Adapters with a read cache may
  /// serve a slightly stale snapshot here; use [`read_all_fresh`] when the
  /// result feeds a write.
  ///
  /// [`read_all_fresh`]: StorageAdapter::read_all_fresh
  async fn read_all(&self) -> Result<Vec<StudyRecord>, StorageError>;

  /// Read the full record set, bypassing any read cache.
  ///
  /// Every read-modify-write goes through this so the snapshot being
  /// rewritten is current. Cacheless adapters fall through to `read_all`.
  async fn read_all_fresh(&self) -> Result<Vec<StudyRecord>, StorageError> {
    self.read_all().await
  }

  /// Replace the whole table with `records`.
  ///
  /// An empty slice must leave a well-formed empty table (header-only on
  /// spreadsheet-style backends), never stale rows.
  async fn write_all(&self, records: &[StudyRecord]) -> Result<(), StorageError>;

  /// Insert or update the row for `record.date`.
  ///
  /// Default: fresh read, merge by exact calendar-date equality, re-sort,
  /// full rewrite. Delta-capable backends override this.
  async fn upsert_row(&self, record: StudyRecord) -> Result<(), StorageError> {
    let mut records = self.read_all_fresh().await?;
    if let Some(existing) = records.iter_mut().find(|r| r.date == record.date) {
      existing.hours = record.hours;
    } else {
      records.push(record);
    }
    let records = normalize(records);
    self.write_all(&records).await
  }

  /// Remove the row for `date`, if present.
  ///
  /// Removing an absent date is a successful no-op. Default: fresh read,
  /// filter, full rewrite (writing the explicit empty table when the last
  /// row goes away).
  async fn delete_row(&self, date: NaiveDate) -> Result<(), StorageError> {
    let records = self.read_all_fresh().await?;
    let remaining: Vec<StudyRecord> =
      records.into_iter().filter(|r| r.date != date).collect();
    self.write_all(&remaining).await
  }

  /// Check if the backend is currently usable (non-failing probe).
  async fn is_healthy(&self) -> bool;
}
