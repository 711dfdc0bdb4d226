//! Integration Tests - Record Store Over Mock and Real Adapters
//!
//! Tests the interaction between usecases, the storage port, and the
//! fallback chain. Uses mockall for trait mocking and tokio::test for
//! async tests.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use mockall::mock;
use mockall::predicate::*;

use study_tracker::adapters::fallback::FallbackStorage;
use study_tracker::adapters::memory::EphemeralAdapter;
use study_tracker::domain::record::StudyRecord;
use study_tracker::ports::storage::{StorageAdapter, StorageError};
use study_tracker::usecases::record_store::{RecordStore, StoreError, UpsertOutcome};

// ---- Mock Definitions ----

mock! {
    pub Storage {}

    #[async_trait::async_trait]
    impl StorageAdapter for Storage {
        fn name(&self) -> &'static str;
        async fn read_all(&self) -> Result<Vec<StudyRecord>, StorageError>;
        async fn read_all_fresh(&self) -> Result<Vec<StudyRecord>, StorageError>;
        async fn write_all(&self, records: &[StudyRecord]) -> Result<(), StorageError>;
        async fn upsert_row(&self, record: StudyRecord) -> Result<(), StorageError>;
        async fn delete_row(&self, date: NaiveDate) -> Result<(), StorageError>;
        async fn is_healthy(&self) -> bool;
    }
}

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn unavailable() -> StorageError {
    StorageError::Unavailable {
        backend: "mock",
        reason: "down".to_string(),
    }
}

// ---- RecordStore over a mocked adapter ----

#[tokio::test]
async fn test_upsert_tags_added_for_new_date() {
    let mut mock = MockStorage::new();
    mock.expect_read_all_fresh()
        .times(1)
        .returning(|| Ok(vec![]));
    mock.expect_upsert_row()
        .withf(|r| r.date == d("2024-01-01") && (r.hours - 2.5).abs() < 1e-9)
        .times(1)
        .returning(|_| Ok(()));

    let store = RecordStore::new(Arc::new(mock));
    let outcome = store.upsert(d("2024-01-01"), 2.5).await.unwrap();
    assert_eq!(outcome, UpsertOutcome::Added);
}

#[tokio::test]
async fn test_upsert_tags_updated_for_existing_date() {
    let mut mock = MockStorage::new();
    mock.expect_read_all_fresh()
        .times(1)
        .returning(|| Ok(vec![StudyRecord::new(d("2024-01-01"), 2.5)]));
    mock.expect_upsert_row().times(1).returning(|_| Ok(()));

    let store = RecordStore::new(Arc::new(mock));
    let outcome = store.upsert(d("2024-01-01"), 3.0).await.unwrap();
    assert_eq!(outcome, UpsertOutcome::Updated);
}

#[tokio::test]
async fn test_invalid_input_never_touches_the_backend() {
    // No expectations: any adapter call would panic the mock.
    let mock = MockStorage::new();
    let store = RecordStore::new(Arc::new(mock));

    let today = Local::now().date_naive();
    let tomorrow = today + chrono::Days::new(1);

    assert!(matches!(
        store.upsert(today, 25.0).await,
        Err(StoreError::InvalidInput(_))
    ));
    assert!(matches!(
        store.upsert(today, 0.0).await,
        Err(StoreError::InvalidInput(_))
    ));
    assert!(matches!(
        store.upsert(tomorrow, 1.0).await,
        Err(StoreError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn test_delete_is_idempotent_from_the_callers_view() {
    let mut mock = MockStorage::new();
    // The adapter reports success whether or not the row existed.
    mock.expect_delete_row()
        .with(eq(d("2024-01-01")))
        .times(2)
        .returning(|_| Ok(()));

    let store = RecordStore::new(Arc::new(mock));
    store.delete(d("2024-01-01")).await.unwrap();
    store.delete(d("2024-01-01")).await.unwrap();
}

#[tokio::test]
async fn test_exhausted_chain_surfaces_as_store_error() {
    let mut mock = MockStorage::new();
    mock.expect_read_all_fresh()
        .times(1)
        .returning(|| Err(unavailable()));

    let store = RecordStore::new(Arc::new(mock));
    let result = store.upsert(d("2024-01-01"), 1.0).await;
    assert!(matches!(result, Err(StoreError::Storage(_))));
}

#[tokio::test]
async fn test_display_read_degrades_to_empty_not_error() {
    let mut mock = MockStorage::new();
    mock.expect_read_all().times(1).returning(|| Err(unavailable()));

    let store = RecordStore::new(Arc::new(mock));
    assert!(store.list_all().await.is_empty());
}

// ---- RecordStore over a real fallback chain ----

#[tokio::test]
async fn test_dead_remote_falls_back_to_memory_and_stays_visible() {
    let mut dead_remote = MockStorage::new();
    dead_remote.expect_name().return_const("mock");
    dead_remote
        .expect_read_all_fresh()
        .returning(|| Err(unavailable()));
    dead_remote.expect_read_all().returning(|| Err(unavailable()));
    dead_remote
        .expect_upsert_row()
        .returning(|_| Err(unavailable()));
    dead_remote
        .expect_delete_row()
        .returning(|_| Err(unavailable()));

    let chain: Arc<dyn StorageAdapter> = Arc::new(FallbackStorage::new(vec![
        Box::new(dead_remote),
        Box::new(EphemeralAdapter::new()),
    ]));
    let store = RecordStore::new(chain);

    // The user-visible operation succeeds even though the primary is down.
    assert_eq!(
        store.upsert(d("2024-01-01"), 2.5).await.unwrap(),
        UpsertOutcome::Added
    );
    let records = store.list_all().await;
    assert_eq!(records, vec![StudyRecord::new(d("2024-01-01"), 2.5)]);

    // And the delete lands in the same fallback state.
    store.delete(d("2024-01-01")).await.unwrap();
    assert!(store.list_all().await.is_empty());
}

#[tokio::test]
async fn test_full_scenario_add_update_delete() {
    let store = RecordStore::new(Arc::new(EphemeralAdapter::new()));

    assert_eq!(
        store.upsert(d("2024-01-01"), 2.5).await.unwrap(),
        UpsertOutcome::Added
    );
    assert_eq!(
        store.upsert(d("2024-01-01"), 3.0).await.unwrap(),
        UpsertOutcome::Updated
    );
    assert_eq!(store.list_all().await[0].hours, 3.0);

    store.delete(d("2024-01-01")).await.unwrap();
    assert!(store.list_all().await.is_empty());
}
