//! SQLite-backed task store.
//!
//! The task collection is serialized as a single JSON array under a fixed
//! key in a key-value table. Saving is best-effort on each collection change;
//! loading is lenient: a malformed record is skipped, a malformed field falls
//! back to its serde default, and every task comes back with
//! `is_running = false` because timers never resume across a reload.

use rusqlite::{params, Connection};

use super::data_dir;
use crate::error::StorageError;
use crate::task::Task;

const TASKS_KEY: &str = "tasks";

/// SQLite store at `~/.config/focusflow/focusflow.db`.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open the store, creating the database file and schema if needed.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()
            .map_err(|e| StorageError::QueryFailed(e.to_string()))?
            .join("focusflow.db");
        let conn = Connection::open(&path)
            .map_err(|source| StorageError::OpenFailed { path, source })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory store (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )
    }

    fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    /// Load the task collection.
    ///
    /// Missing key yields an empty list. Records that fail to parse are
    /// dropped rather than failing the load, and `is_running` is forced to
    /// `false` on every task.
    pub fn load_tasks(&self) -> Result<Vec<Task>, StorageError> {
        let Some(json) = self.kv_get(TASKS_KEY)? else {
            return Ok(Vec::new());
        };
        let records: Vec<serde_json::Value> =
            serde_json::from_str(&json).unwrap_or_default();
        let mut tasks: Vec<Task> = records
            .into_iter()
            .filter_map(|record| serde_json::from_value(record).ok())
            .collect();
        for task in &mut tasks {
            task.is_running = false;
        }
        Ok(tasks)
    }

    /// Persist the task collection under the fixed key.
    pub fn save_tasks(&self, tasks: &[Task]) -> Result<(), StorageError> {
        let json = serde_json::to_string(tasks)?;
        self.kv_set(TASKS_KEY, &json)?;
        Ok(())
    }
}
