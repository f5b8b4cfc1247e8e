//! SQLite storage access for the names dataset.
//!
//! # Responsibility
//! - Open SQLite files (never creating them) and in-memory databases.
//! - Own the lazily opened, shared connection of a process scope.
//!
//! # Invariants
//! - A missing or unreadable database file is reported as
//!   `DbError::StorageUnavailable`, never silently created.
//! - Open failures are not retried.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod handle;
mod open;

pub use handle::{StorageHandle, DEFAULT_DB_FILE_NAME};
pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    /// The store could not be opened or is not a readable database.
    StorageUnavailable {
        path: PathBuf,
        source: rusqlite::Error,
    },
    /// Statement-level failure on an open connection.
    Sqlite(rusqlite::Error),
}

impl DbError {
    /// Returns the underlying SQLite error for either variant.
    pub fn sqlite_error(&self) -> &rusqlite::Error {
        match self {
            Self::StorageUnavailable { source, .. } => source,
            Self::Sqlite(err) => err,
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StorageUnavailable { path, source } => write!(
                f,
                "names storage `{}` is unavailable: {source}",
                path.display()
            ),
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StorageUnavailable { source, .. } => Some(source),
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
