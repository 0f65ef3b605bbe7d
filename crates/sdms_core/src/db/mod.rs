//! SQLite storage bootstrap and schema entry points.
//!
//! # Responsibility
//! - Resolve a backing location into a configured SQLite connection.
//! - Ensure the `students` table exists before any data access.
//!
//! # Invariants
//! - Returned connections always have the schema in place.
//! - A connection that fails bootstrap is dropped, never returned.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use uuid::Uuid;

mod open;
pub mod schema;

pub use open::open_connection;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Backing store a connection is opened against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// On-disk database file, created if absent.
    File(PathBuf),
    /// Named shared-cache in-memory database.
    ///
    /// Every connection opened with the same name sees the same data while
    /// at least one of them stays open.
    Memory { name: String },
}

impl StoreLocation {
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }

    /// Returns a fresh in-memory location with a unique name.
    pub fn memory() -> Self {
        Self::Memory {
            name: format!("sdms-{}", Uuid::new_v4().simple()),
        }
    }

    pub(crate) fn mode(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Memory { .. } => "memory",
        }
    }
}

impl Display for StoreLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Memory { name } => write!(f, "memory:{name}"),
        }
    }
}
