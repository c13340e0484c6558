//! SQLite-backed key-value storage.
//!
//! A single `kv` table holds every persisted blob; values are written with
//! `INSERT OR REPLACE` so each `set` replaces the whole snapshot for its key.

use std::path::Path;

use rusqlite::{params, Connection};
use tracing::debug;

use super::{data_dir, PersistentStore};
use crate::error::StorageError;

/// SQLite database used as the durable [`PersistentStore`].
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open the database at `~/.config/studyhub/studyhub.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be created or the
    /// database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let dir = data_dir().map_err(|source| StorageError::Io {
            path: "studyhub data dir".into(),
            source,
        })?;
        Self::open_at(dir.join("studyhub.db"))
    }

    /// Open (or create) the database at an explicit path.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        debug!(path = %path.as_ref().display(), "opening sqlite store");
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory database.
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
        )?;
        Ok(())
    }
}

impl PersistentStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        debug!(key, bytes = value.len(), "stored value");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_store() {
        let mut store = SqliteStore::open_memory().unwrap();
        assert!(store.get("test").unwrap().is_none());
        store.set("test", "hello").unwrap();
        assert_eq!(store.get("test").unwrap().unwrap(), "hello");
    }

    #[test]
    fn set_replaces_previous_value() {
        let mut store = SqliteStore::open_memory().unwrap();
        store.set("tasks", "[]").unwrap();
        store.set("tasks", "[1]").unwrap();
        assert_eq!(store.get("tasks").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn remove_deletes_key() {
        let mut store = SqliteStore::open_memory().unwrap();
        store.set("theme", "dark").unwrap();
        store.remove("theme").unwrap();
        assert!(store.get("theme").unwrap().is_none());
        // Removing a missing key is fine.
        store.remove("theme").unwrap();
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("studyhub.db");
        {
            let mut store = SqliteStore::open_at(&path).unwrap();
            store.set("sessionCount", "3").unwrap();
        }
        let store = SqliteStore::open_at(&path).unwrap();
        assert_eq!(store.get("sessionCount").unwrap().as_deref(), Some("3"));
    }
}
