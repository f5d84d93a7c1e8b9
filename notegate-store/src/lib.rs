//! SQLite-backed note store: one row per submitting user.
//!
//! The store owns a single connection behind a mutex; queries are
//! single-row writes and a full-table read, so contention is not a
//! concern at this service's scale. Callers on the async side wrap
//! calls in `spawn_blocking`.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use tracing::debug;

use notegate_core::Note;

/// Errors produced by the note store.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    /// An error from the underlying SQLite engine.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A stored timestamp failed to parse back.
    #[error("corrupt updated_at for note {discord_id}: {reason}")]
    CorruptTimestamp { discord_id: String, reason: String },
}

/// Durable storage for notes, keyed by `discord_id`.
#[derive(Debug)]
pub struct NoteStore {
    conn: Mutex<Connection>,
}

impl NoteStore {
    /// Open (creating if absent) the database at `path`.
    ///
    /// # Errors
    /// Returns [`StoreError::Sqlite`] if the file cannot be opened or
    /// the schema cannot be applied.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        Self::init(&conn)?;
        debug!(path = %path.display(), "note store opened");
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Open a private in-memory store, for tests.
    ///
    /// # Errors
    /// Returns [`StoreError::Sqlite`] if the schema cannot be applied.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::init(&conn)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    fn init(conn: &Connection) -> Result<(), StoreError> {
        conn.execute_batch(
            r"
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;

            CREATE TABLE IF NOT EXISTS notes (
                discord_id TEXT PRIMARY KEY,
                username   TEXT NOT NULL,
                pos_x      REAL NOT NULL,
                pos_y      REAL NOT NULL,
                pos_z      REAL NOT NULL,
                message    TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        self.conn.lock().expect("note store lock poisoned")
    }

    /// Insert the note, or replace the existing note for the same
    /// `discord_id`. The row is stamped with the note's `updated_at`.
    ///
    /// # Errors
    /// Returns [`StoreError::Sqlite`] on constraint or engine failure.
    pub fn upsert(&self, note: &Note) -> Result<(), StoreError> {
        self.lock().execute(
            "INSERT INTO notes (discord_id, username, pos_x, pos_y, pos_z, message, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(discord_id) DO UPDATE SET
                 username   = excluded.username,
                 pos_x      = excluded.pos_x,
                 pos_y      = excluded.pos_y,
                 pos_z      = excluded.pos_z,
                 message    = excluded.message,
                 updated_at = excluded.updated_at",
            params![
                note.discord_id,
                note.username,
                note.pos_x,
                note.pos_y,
                note.pos_z,
                note.message,
                note.updated_at.to_rfc3339(),
            ],
        )?;
        debug!(discord_id = %note.discord_id, "note upserted");
        Ok(())
    }

    /// Every current note. No ordering is guaranteed.
    ///
    /// # Errors
    /// Returns [`StoreError::Sqlite`] on query failure and
    /// [`StoreError::CorruptTimestamp`] if a stored timestamp does not
    /// parse back as RFC 3339.
    pub fn list_all(&self) -> Result<Vec<Note>, StoreError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT discord_id, username, pos_x, pos_y, pos_z, message, updated_at FROM notes",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, f64>(2)?,
                row.get::<_, f64>(3)?,
                row.get::<_, f64>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, String>(6)?,
            ))
        })?;

        let mut notes = Vec::new();
        for row in rows {
            let (discord_id, username, pos_x, pos_y, pos_z, message, updated_at) = row?;
            let updated_at: DateTime<Utc> =
                updated_at.parse().map_err(|e| StoreError::CorruptTimestamp {
                    discord_id: discord_id.clone(),
                    reason: format!("{e}"),
                })?;
            notes.push(Note { discord_id, username, pos_x, pos_y, pos_z, message, updated_at });
        }
        Ok(notes)
    }

    /// Number of stored notes.
    ///
    /// # Errors
    /// Returns [`StoreError::Sqlite`] on query failure.
    pub fn count(&self) -> Result<u64, StoreError> {
        let count: u64 =
            self.lock()
                .query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))?;
        Ok(count)
    }
}
