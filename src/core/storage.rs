//! Storage - key-value backends
//!
//! The catalog keeps two documents under fixed logical keys, one for the
//! items and one for the type registry. A backend only has to get and set a
//! string per key.
//!
//! # Key Points
//! - `SqliteBackend`: a single `kv` table in `.resman/data.db`
//! - `MemoryBackend`: shared in-process map, can be told to refuse writes
//! - Callers treat every error here as non-fatal

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use rusqlite::{params, Connection, OpenFlags, OptionalExtension};

use super::error::PersistenceError;

/// Key of the items document
pub const ITEMS_KEY: &str = "resource_manager.items";

/// Key of the type registry document
pub const TYPES_KEY: &str = "resource_manager.types";

/// Minimal string store addressed by logical key
pub trait KvBackend {
    /// Read the document stored under `key`, `None` if never written
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Overwrite the document stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// SQLite-backed store
pub struct SqliteBackend {
    conn: Connection,
    path: Option<PathBuf>,
}

impl SqliteBackend {
    /// Open or create a database file
    pub fn open(path: &Path) -> Result<Self, PersistenceError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA busy_timeout=5000;")?;

        let backend = Self {
            conn,
            path: Some(path.to_path_buf()),
        };
        backend.init_schema()?;

        tracing::debug!(path = %path.display(), "opened sqlite backend");
        Ok(backend)
    }

    /// Open an in-memory database (for testing)
    pub fn open_memory() -> Result<Self, PersistenceError> {
        let conn = Connection::open_in_memory()?;
        let backend = Self { conn, path: None };
        backend.init_schema()?;
        Ok(backend)
    }

    /// Database file, `None` for in-memory databases
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn init_schema(&self) -> Result<(), PersistenceError> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }
}

impl KvBackend for SqliteBackend {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.conn.execute(
            r#"
            INSERT INTO kv (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
            params![key, value],
        )?;
        Ok(())
    }
}

/// In-process store; clones share the same entries
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: Rc<RefCell<HashMap<String, String>>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw document
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Make every subsequent `set` fail (simulates an exhausted quota)
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Raw document under `key`
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl KvBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        if self.fail_writes.get() {
            return Err(PersistenceError::Unavailable("quota exceeded".to_string()));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sqlite_get_missing() {
        let backend = SqliteBackend::open_memory().unwrap();
        assert_eq!(backend.get(ITEMS_KEY).unwrap(), None);
    }

    #[test]
    fn test_sqlite_set_overwrites() {
        let mut backend = SqliteBackend::open_memory().unwrap();
        backend.set(ITEMS_KEY, "[]").unwrap();
        backend.set(ITEMS_KEY, "[1]").unwrap();

        assert_eq!(backend.get(ITEMS_KEY).unwrap().as_deref(), Some("[1]"));
        assert_eq!(backend.get(TYPES_KEY).unwrap(), None);
    }

    #[test]
    fn test_sqlite_file_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("data.db");

        {
            let mut backend = SqliteBackend::open(&path).unwrap();
            backend.set(TYPES_KEY, r#"["Book"]"#).unwrap();
        }

        let backend = SqliteBackend::open(&path).unwrap();
        assert_eq!(backend.path(), Some(path.as_path()));
        assert_eq!(
            backend.get(TYPES_KEY).unwrap().as_deref(),
            Some(r#"["Book"]"#)
        );
    }

    #[test]
    fn test_memory_shared_between_clones() {
        let backend = MemoryBackend::new();
        let mut writer = backend.clone();
        writer.set(ITEMS_KEY, "[]").unwrap();

        assert_eq!(backend.raw(ITEMS_KEY).as_deref(), Some("[]"));
    }

    #[test]
    fn test_memory_fail_writes() {
        let mut backend = MemoryBackend::new().with_entry(ITEMS_KEY, "[]");
        backend.set_fail_writes(true);

        let err = backend.set(ITEMS_KEY, "[1]").unwrap_err();
        assert!(matches!(err, PersistenceError::Unavailable(_)));
        assert_eq!(backend.raw(ITEMS_KEY).as_deref(), Some("[]"));
    }
}
