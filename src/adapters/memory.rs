//! Ephemeral Adapter - Process-local Record Set
//!
//! Session-scoped storage used as the fallback when the remote backend
//! is unreachable, and as the sole backend in `memory` mode. The record
//! set lives inside the adapter instance and dies with the process;
//! there is no ambient global state.

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::domain::record::{normalize, StudyRecord};
use crate::ports::storage::{StorageAdapter, StorageError};

/// In-process record storage with an explicit instance lifecycle.
pub struct EphemeralAdapter {
    records: RwLock<Vec<StudyRecord>>,
}

impl EphemeralAdapter {
    /// Create an empty session store.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Create a store pre-seeded with records (tests, warm fallback).
    pub fn with_records(records: Vec<StudyRecord>) -> Self {
        Self {
            records: RwLock::new(normalize(records)),
        }
    }
}

impl Default for EphemeralAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageAdapter for EphemeralAdapter {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn read_all(&self) -> Result<Vec<StudyRecord>, StorageError> {
        Ok(self.records.read().await.clone())
    }

    async fn write_all(&self, records: &[StudyRecord]) -> Result<(), StorageError> {
        let mut guard = self.records.write().await;
        *guard = normalize(records.to_vec());
        Ok(())
    }

    async fn upsert_row(&self, record: StudyRecord) -> Result<(), StorageError> {
        let mut guard = self.records.write().await;
        if let Some(existing) = guard.iter_mut().find(|r| r.date == record.date) {
            existing.hours = record.hours;
        } else {
            guard.push(record);
            guard.sort_by_key(|r| r.date);
        }
        Ok(())
    }

    async fn delete_row(&self, date: NaiveDate) -> Result<(), StorageError> {
        let mut guard = self.records.write().await;
        guard.retain(|r| r.date != date);
        Ok(())
    }

    async fn is_healthy(&self) -> bool {
        true
    }
}
