//! Local persistence for sermons.
//!
//! Each sermon lives in its own `SQLite` file under the storage root:
//!
//! ```text
//! <root>/<uuid>.sqlite
//!   sermon          # One row: title, creation time, structure as JSON text
//!   outline_point   # Outline points by section and position
//!   thought         # Thoughts, in insertion order
//! ```
//!
//! Storage never orders anything. Callers hand it the structure computed
//! by [`crate::order`] and get back exactly what they stored, normalized.

mod sermon;
mod thought;

use std::{fs, io, path::PathBuf};

use rusqlite::Connection;
use uuid::Uuid;

use crate::order::StructureError;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("sermon not found: {0}")]
    SermonNotFound(Uuid),

    #[error("sermon already exists: {0}")]
    SermonAlreadyExists(Uuid),

    #[error("corrupt sermon file: {0}")]
    Corrupt(String),

    #[error("stored structure is unreadable: {0}")]
    Structure(#[from] StructureError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = core::result::Result<T, StorageError>;

const SCHEMA: &str = "
    CREATE TABLE sermon (
        id          TEXT PRIMARY KEY,
        title       TEXT NOT NULL,
        created_at  TEXT NOT NULL,
        structure   TEXT NOT NULL
    );
    CREATE TABLE outline_point (
        id        TEXT NOT NULL,
        section   TEXT NOT NULL,
        position  INTEGER NOT NULL,
        text      TEXT NOT NULL,
        PRIMARY KEY (section, id)
    );
    CREATE TABLE thought (
        id                TEXT PRIMARY KEY,
        text              TEXT NOT NULL,
        tags              TEXT NOT NULL,
        date              TEXT NOT NULL,
        outline_point_id  TEXT
    );
";

/// Local file-based storage for sermons.
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Creates a new storage instance rooted at the given directory.
    ///
    /// The directory is created if it doesn't exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Returns the default storage root: `~/.pulpit/sermons/`.
    pub fn default_root() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".pulpit").join("sermons"))
    }

    fn db_path(&self, id: Uuid) -> PathBuf {
        self.root.join(format!("{id}.sqlite"))
    }

    /// Creates a fresh database for a sermon. Fails if one already exists.
    fn create_db(&self, id: Uuid) -> Result<Connection> {
        let path = self.db_path(id);
        if path.exists() {
            return Err(StorageError::SermonAlreadyExists(id));
        }
        let conn = Connection::open(&path)?;
        if let Err(e) = conn.execute_batch(SCHEMA) {
            drop(conn);
            self.discard_db(id);
            return Err(e.into());
        }
        Ok(conn)
    }

    /// Removes a sermon file that was never fully written.
    fn discard_db(&self, id: Uuid) {
        let path = self.db_path(id);
        match fs::remove_file(&path) {
            Ok(()) => tracing::debug!(sermon = %id, "discarded partial sermon file"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %path.display(), "failed to discard partial sermon file: {e}"),
        }
    }

    /// Opens an existing sermon database.
    fn open_db(&self, id: Uuid) -> Result<Connection> {
        let path = self.db_path(id);
        if !path.exists() {
            return Err(StorageError::SermonNotFound(id));
        }
        Ok(Connection::open(path)?)
    }
}
