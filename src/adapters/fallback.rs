//! Fallback Storage - Prioritized Adapter Chain
//!
//! Composes a list of storage adapters tried in priority order, first
//! success short-circuiting. Read failures degrade down the chain; write
//! failures land the change in the next adapter's state so the
//! user-visible operation still succeeds. Only when every adapter fails
//! does an error reach the caller, and in that case nothing changed
//! anywhere the caller can observe.

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::warn;

use crate::domain::record::StudyRecord;
use crate::ports::storage::{StorageAdapter, StorageError};

/// Composite adapter over an ordered chain of backends.
pub struct FallbackStorage {
    chain: Vec<Box<dyn StorageAdapter>>,
}

impl FallbackStorage {
    /// Build a chain from highest to lowest priority.
    ///
    /// # Panics
    /// Panics if the chain is empty.
    pub fn new(chain: Vec<Box<dyn StorageAdapter>>) -> Self {
        assert!(!chain.is_empty(), "fallback chain must not be empty");
        Self { chain }
    }

    fn note_failure(adapter: &dyn StorageAdapter, op: &str, error: &StorageError) {
        warn!(
            backend = adapter.name(),
            op,
            error = %error,
            "Backend failed, degrading to next in chain"
        );
    }
}

#[async_trait]
impl StorageAdapter for FallbackStorage {
    fn name(&self) -> &'static str {
        "fallback"
    }

    async fn read_all(&self) -> Result<Vec<StudyRecord>, StorageError> {
        let mut last_error = None;
        for adapter in &self.chain {
            match adapter.read_all().await {
                Ok(records) => return Ok(records),
                Err(e) => {
                    Self::note_failure(adapter.as_ref(), "read_all", &e);
                    last_error = Some(e);
                }
            }
        }
        Err(last_error.expect("non-empty chain"))
    }

    async fn read_all_fresh(&self) -> Result<Vec<StudyRecord>, StorageError> {
        let mut last_error = None;
        for adapter in &self.chain {
            match adapter.read_all_fresh().await {
                Ok(records) => return Ok(records),
                Err(e) => {
                    Self::note_failure(adapter.as_ref(), "read_all_fresh", &e);
                    last_error = Some(e);
                }
            }
        }
        Err(last_error.expect("non-empty chain"))
    }

    async fn write_all(&self, records: &[StudyRecord]) -> Result<(), StorageError> {
        let mut last_error = None;
        for adapter in &self.chain {
            match adapter.write_all(records).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    Self::note_failure(adapter.as_ref(), "write_all", &e);
                    last_error = Some(e);
                }
            }
        }
        Err(last_error.expect("non-empty chain"))
    }

    async fn upsert_row(&self, record: StudyRecord) -> Result<(), StorageError> {
        let mut last_error = None;
        for adapter in &self.chain {
            match adapter.upsert_row(record).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    Self::note_failure(adapter.as_ref(), "upsert_row", &e);
                    last_error = Some(e);
                }
            }
        }
        Err(last_error.expect("non-empty chain"))
    }

    async fn delete_row(&self, date: NaiveDate) -> Result<(), StorageError> {
        let mut last_error = None;
        for adapter in &self.chain {
            match adapter.delete_row(date).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    Self::note_failure(adapter.as_ref(), "delete_row", &e);
                    last_error = Some(e);
                }
            }
        }
        Err(last_error.expect("non-empty chain"))
    }

    async fn is_healthy(&self) -> bool {
        for adapter in &self.chain {
            if adapter.is_healthy().await {
                return true;
            }
        }
        false
    }
}
