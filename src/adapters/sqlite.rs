//! Local Table Adapter - SQLite-backed Record Storage
//!
//! The one backend with true delta semantics: upserts run as
//! `UPDATE … WHERE date = ?` falling back to `INSERT`, and deletes as
//! row-level `DELETE`, instead of rewriting the whole table. From the
//! outside it behaves exactly like the full-replace backends.
//!
//! rusqlite is synchronous, so every call runs the SQL on the blocking
//! pool with the connection behind a mutex.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use tracing::{debug, info};

use crate::domain::record::{StudyRecord, DATE_FORMAT};
use crate::ports::storage::{StorageAdapter, StorageError};

const BACKEND: &str = "sqlite";

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS study_sessions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date TEXT NOT NULL UNIQUE,
    hours REAL NOT NULL
)";

/// SQLite-backed record storage over the `study_sessions` table.
pub struct LocalTableAdapter {
    conn: Arc<Mutex<Connection>>,
}

impl LocalTableAdapter {
    /// Open (or create) the database file and bootstrap the schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| unavailable(e.to_string()))?;
            }
        }
        let conn = Connection::open(path).map_err(|e| unavailable(e.to_string()))?;
        Self::bootstrap(conn, path.display().to_string())
    }

    /// Open an in-memory database (tests).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(|e| unavailable(e.to_string()))?;
        Self::bootstrap(conn, ":memory:".to_string())
    }

    fn bootstrap(conn: Connection, label: String) -> Result<Self, StorageError> {
        conn.execute(CREATE_TABLE_SQL, [])
            .map_err(|e| unavailable(format!("schema bootstrap failed: {e}")))?;
        info!(db = %label, "SQLite store opened");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run a blocking rusqlite operation on the blocking pool.
    async fn with_conn<T, F>(&self, f: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            // A poisoned lock still holds a usable connection.
            let mut guard = conn.lock().unwrap_or_else(|e| e.into_inner());
            f(&mut guard)
        })
        .await
        .map_err(|e| unavailable(format!("blocking task failed: {e}")))?
        .map_err(|e| unavailable(e.to_string()))
    }
}

fn unavailable(reason: String) -> StorageError {
    StorageError::Unavailable {
        backend: BACKEND,
        reason,
    }
}

#[async_trait]
impl StorageAdapter for LocalTableAdapter {
    fn name(&self) -> &'static str {
        BACKEND
    }

    async fn read_all(&self) -> Result<Vec<StudyRecord>, StorageError> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT date, hours FROM study_sessions ORDER BY date")?;
            let rows = stmt.query_map([], |row| {
                let date: String = row.get(0)?;
                let hours: f64 = row.get(1)?;
                Ok((date, hours))
            })?;

            let mut records = Vec::new();
            for row in rows {
                let (date, hours) = row?;
                match NaiveDate::parse_from_str(&date, DATE_FORMAT) {
                    Ok(date) => records.push(StudyRecord::new(date, hours)),
                    Err(e) => {
                        tracing::warn!(row = %date, error = %e, "Skipping unparseable stored date");
                    }
                }
            }
            Ok(records)
        })
        .await
    }

    /// Full replace exists only to satisfy the contract; the store's own
    /// write paths are the row-level operations below.
    async fn write_all(&self, records: &[StudyRecord]) -> Result<(), StorageError> {
        let rows: Vec<(String, f64)> = records
            .iter()
            .map(|r| (r.date_string(), r.hours))
            .collect();
        self.with_conn(move |conn| {
            let tx = conn.transaction()?;
            tx.execute("DELETE FROM study_sessions", [])?;
            for (date, hours) in &rows {
                tx.execute(
                    "INSERT INTO study_sessions (date, hours) VALUES (?1, ?2)",
                    params![date, hours],
                )?;
            }
            tx.commit()
        })
        .await
    }

    async fn upsert_row(&self, record: StudyRecord) -> Result<(), StorageError> {
        let date = record.date_string();
        let hours = record.hours;
        self.with_conn(move |conn| {
            let updated = conn.execute(
                "UPDATE study_sessions SET hours = ?1 WHERE date = ?2",
                params![hours, date],
            )?;
            if updated == 0 {
                conn.execute(
                    "INSERT INTO study_sessions (date, hours) VALUES (?1, ?2)",
                    params![date, hours],
                )?;
            }
            Ok(updated)
        })
        .await
        .map(|updated| {
            debug!(updated, "Row-level upsert applied");
        })
    }

    async fn delete_row(&self, date: NaiveDate) -> Result<(), StorageError> {
        let date = date.format(DATE_FORMAT).to_string();
        self.with_conn(move |conn| {
            conn.execute("DELETE FROM study_sessions WHERE date = ?1", params![date])
        })
        .await
        .map(|_| ())
    }

    async fn is_healthy(&self) -> bool {
        self.with_conn(|conn| {
            conn.query_row("SELECT COUNT(*) FROM study_sessions", [], |row| {
                row.get::<_, i64>(0)
            })
        })
        .await
        .is_ok()
    }
}
