//! Record Store - Upsert-by-date Over the Storage Port
//!
//! The application's one write path. Validates input before any backend
//! access, tags each upsert as added or updated from a fresh snapshot,
//! and keeps delete idempotent. Display reads degrade to an empty list
//! when the whole backend chain is down, so the dashboard never hard-fails
//! on a read.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::domain::record::{validate_input, InvalidRecord, StudyRecord};
use crate::ports::storage::{StorageAdapter, StorageError};

/// What an upsert did to the record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
  /// No record existed for the date; one was appended.
  Added,
  /// A record existed for the date; its hours were replaced.
  Updated,
}

impl UpsertOutcome {
  /// Stable label used in responses, logs, and metrics.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Added => "added",
      Self::Updated => "updated",
    }
  }
}

/// Why a store operation was rejected.
#[derive(Debug, Error)]
pub enum StoreError {
  /// Input rejected before any backend access.
  #[error("invalid input: {0}")]
  InvalidInput(#[from] InvalidRecord),
  /// Every backend in the chain failed; nothing changed.
  #[error(transparent)]
  Storage(#[from] StorageError),
}

/// Backend-agnostic record operations enforcing the one-record-per-date
/// invariant.
///
/// Generic over the storage port; `?Sized` so a boxed adapter chain can
/// be used directly.
pub struct RecordStore<S: StorageAdapter + ?Sized> {
  storage: Arc<S>,
}

impl<S: StorageAdapter + ?Sized> RecordStore<S> {
  /// Create a store over the active storage adapter.
  pub fn new(storage: Arc<S>) -> Self {
    Self { storage }
  }

  /// Insert or update the record for `date`.
  ///
  /// Rejects hours outside (0, 24] and future dates without touching the
  /// backend. Otherwise reads a fresh snapshot to tag the outcome, then
  /// applies the row change through the adapter. Each call is its own
  /// independent read-modify-write; racing writers are a documented
  /// non-goal of the single-user design.
  #[instrument(skip(self), fields(date = %date, hours))]
  pub async fn upsert(
    &self,
    date: NaiveDate,
    hours: f64,
  ) -> Result<UpsertOutcome, StoreError> {
    validate_input(date, hours, Local::now().date_naive())?;

    let current = self.storage.read_all_fresh().await?;
    let outcome = if current.iter().any(|r| r.date == date) {
      UpsertOutcome::Updated
    } else {
      UpsertOutcome::Added
    };

    self
      .storage
      .upsert_row(StudyRecord::new(date, hours))
      .await?;

    info!(outcome = outcome.as_str(), "Study session saved");
    Ok(outcome)
  }

  /// Remove the record for `date`, if any.
  ///
  /// Deleting an absent date succeeds; delete is idempotent. When the
  /// last record goes, full-replace backends are left with an explicit
  /// empty table rather than stale rows.
  #[instrument(skip(self), fields(date = %date))]
  pub async fn delete(&self, date: NaiveDate) -> Result<(), StoreError> {
    self.storage.delete_row(date).await?;
    info!("Study session deleted");
    Ok(())
  }

  /// The current ordered record set, for display.
  ///
  /// A read that fails past the whole fallback chain degrades to an
  /// empty list with a warning instead of erroring the dashboard.
  pub async fn list_all(&self) -> Vec<StudyRecord> {
    match self.storage.read_all().await {
      Ok(records) => records,
      Err(e) => {
        warn!(error = %e, "Read failed past the fallback chain, showing empty set");
        Vec::new()
      }
    }
  }

  /// Whether any backend in the chain is currently usable.
  pub async fn is_healthy(&self) -> bool {
    self.storage.is_healthy().await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::adapters::memory::EphemeralAdapter;

  fn store() -> RecordStore<EphemeralAdapter> {
    RecordStore::new(Arc::new(EphemeralAdapter::new()))
  }

  fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
  }

  #[tokio::test]
  async fn test_upsert_then_update_then_delete() {
    let store = store();
    let date = d("2024-01-01");

    assert_eq!(store.upsert(date, 2.5).await.unwrap(), UpsertOutcome::Added);
    assert_eq!(store.upsert(date, 3.0).await.unwrap(), UpsertOutcome::Updated);

    let records = store.list_all().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].hours, 3.0);

    store.delete(date).await.unwrap();
    assert!(store.list_all().await.is_empty());
  }

  #[tokio::test]
  async fn test_upsert_same_hours_twice_tags_added_then_updated() {
    let store = store();
    let date = d("2024-01-01");
    assert_eq!(store.upsert(date, 2.0).await.unwrap(), UpsertOutcome::Added);
    assert_eq!(store.upsert(date, 2.0).await.unwrap(), UpsertOutcome::Updated);
    assert_eq!(store.list_all().await.len(), 1);
  }

  #[tokio::test]
  async fn test_list_sorted_no_duplicates() {
    let store = store();
    store.upsert(d("2024-01-03"), 3.0).await.unwrap();
    store.upsert(d("2024-01-01"), 1.0).await.unwrap();
    store.upsert(d("2024-01-02"), 2.0).await.unwrap();
    store.upsert(d("2024-01-01"), 1.5).await.unwrap();

    let records = store.list_all().await;
    assert_eq!(records.len(), 3);
    assert!(records.windows(2).all(|w| w[0].date < w[1].date));
  }

  #[tokio::test]
  async fn test_delete_absent_date_succeeds() {
    let store = store();
    store.upsert(d("2024-01-01"), 1.0).await.unwrap();
    store.delete(d("2024-02-01")).await.unwrap();
    assert_eq!(store.list_all().await.len(), 1);
  }

  #[tokio::test]
  async fn test_future_date_rejected() {
    let store = store();
    let tomorrow = Local::now().date_naive() + chrono::Days::new(1);
    let result = store.upsert(tomorrow, 1.0).await;
    assert!(matches!(result, Err(StoreError::InvalidInput(_))));
    assert!(store.list_all().await.is_empty());
  }

  #[tokio::test]
  async fn test_out_of_range_hours_rejected() {
    let store = store();
    let today = Local::now().date_naive();
    assert!(store.upsert(today, 25.0).await.is_err());
    assert!(store.upsert(today, 0.0).await.is_err());
    assert!(store.upsert(today, -1.0).await.is_err());
    assert!(store.list_all().await.is_empty());
  }
}
