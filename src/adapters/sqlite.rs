//! SQLite adapter: key-value implementation of the storage port.
//!
//! Durable local persistence for the triage queue.
//!
//! # Mutex Behavior
//!
//! The database connection is protected by `Mutex`. A poisoned mutex
//! (from panic in another thread) will cause panic. This fail-fast
//! behavior is intentional for data integrity in healthcare
//! applications.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection};

use crate::adapters::StorageError;
use crate::ports::KeyValueStore;

/// SQLite key-value storage adapter.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open a store backed by the database at `path`.
    ///
    /// # Errors
    /// Returns error if the database cannot be opened or initialized.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory database (for testing).
    ///
    /// # Errors
    /// Returns error if the database cannot be created.
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Initialize the database schema.
    fn init_schema(&self) -> Result<(), StorageError> {
        let conn = self.conn.lock().expect("Lock failed");

        conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value BLOB NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )?;

        Ok(())
    }
}

impl KeyValueStore for SqliteStore {
    type Error = StorageError;

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        let conn = self.conn.lock().expect("Lock failed");

        let mut stmt = conn.prepare("SELECT value FROM kv_store WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, Vec<u8>>(0));

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), Self::Error> {
        let conn = self.conn.lock().expect("Lock failed");
        let now = chrono::Utc::now().to_rfc3339();

        conn.execute(
            "INSERT OR REPLACE INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, value, now],
        )?;

        tracing::debug!("Stored {} bytes under key {}", value.len(), key);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), Self::Error> {
        let conn = self.conn.lock().expect("Lock failed");
        conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_delete() {
        let store = SqliteStore::in_memory().expect("Should create db");

        assert!(store.get("queue").expect("Should read").is_none());

        store.set("queue", b"[]").expect("Should write");
        assert_eq!(store.get("queue").expect("Should read"), Some(b"[]".to_vec()));

        store.set("queue", b"[1]").expect("Should overwrite");
        assert_eq!(
            store.get("queue").expect("Should read"),
            Some(b"[1]".to_vec())
        );

        store.delete("queue").expect("Should delete");
        assert!(store.get("queue").expect("Should read").is_none());
    }

    #[test]
    fn test_keys_are_independent() {
        let store = SqliteStore::in_memory().expect("Should create db");

        store.set("a", b"1").expect("Should write");
        store.set("b", b"2").expect("Should write");
        store.delete("a").expect("Should delete");

        assert!(store.get("a").expect("Should read").is_none());
        assert_eq!(store.get("b").expect("Should read"), Some(b"2".to_vec()));
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let db_path = dir.path().join("triage.db");

        {
            let store = SqliteStore::new(&db_path).expect("Should create db");
            store.set("queue", b"persisted").expect("Should write");
        }

        let reopened = SqliteStore::new(&db_path).expect("Should reopen db");
        assert_eq!(
            reopened.get("queue").expect("Should read"),
            Some(b"persisted".to_vec())
        );
    }
}
