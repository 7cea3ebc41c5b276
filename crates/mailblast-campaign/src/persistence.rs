//! SQLite-backed snapshot store — a single key/value table in WAL mode.
//! Drop-in alternative to the per-key JSON files when one durable file
//! is preferable.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection};

use mailblast_core::error::{MailblastError, Result};
use mailblast_core::traits::SnapshotStore;

/// SQLite-backed key→blob store.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create the snapshot database.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .map_err(|e| MailblastError::Store(format!("DB open: {e}")))?;
        // WAL keeps reads cheap while the actor writes
        conn.execute_batch("PRAGMA journal_mode=WAL;").ok();
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| MailblastError::Store(format!("Lock: {e}")))?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS snapshots (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL DEFAULT '',
                updated_at TEXT DEFAULT (datetime('now'))
            );",
        )
        .map_err(|e| MailblastError::Store(format!("Migration: {e}")))?;
        Ok(())
    }
}

impl SnapshotStore for SqliteStore {
    fn get(&self, key: &str) -> Option<String> {
        let conn = self.conn.lock().ok()?;
        match conn.query_row(
            "SELECT value FROM snapshots WHERE key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        ) {
            Ok(value) => Some(value),
            Err(rusqlite::Error::QueryReturnedNoRows) => None,
            Err(e) => {
                tracing::warn!("⚠️ Snapshot read '{key}': {e}");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| MailblastError::Store(format!("Lock: {e}")))?;
        conn.execute(
            "INSERT INTO snapshots (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value=?2, updated_at=datetime('now')",
            params![key, value],
        )
        .map_err(|e| MailblastError::Store(format!("Set '{key}': {e}")))?;
        Ok(())
    }
}
