//! Process-scoped storage handle.
//!
//! # Responsibility
//! - Open the names database on first demand and reuse that connection.
//! - Serialize access to the shared connection.
//!
//! # Invariants
//! - At most one connection is open per handle.
//! - First open runs at most once concurrently; a failed open registers
//!   nothing, so the next `acquire` starts from scratch.
//! - `shutdown` is the only way to close the connection before drop.

use super::open::{open_db, open_db_in_memory, IN_MEMORY_PATH};
use super::{DbError, DbResult};
use log::{debug, info};
use once_cell::sync::OnceCell;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// File name used by [`StorageHandle::in_dir`].
pub const DEFAULT_DB_FILE_NAME: &str = "names.db";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Location {
    File(PathBuf),
    Memory,
}

/// Owner of the single shared connection to the names store.
///
/// Construct one per application scope and pass it by reference to the
/// layers that need it.
#[derive(Debug)]
pub struct StorageHandle {
    location: Location,
    conn: OnceCell<Mutex<Connection>>,
}

impl StorageHandle {
    /// Creates a handle for an existing database file. Nothing is opened yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            location: Location::File(path.into()),
            conn: OnceCell::new(),
        }
    }

    /// Creates a handle for `dir/names.db`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(DEFAULT_DB_FILE_NAME))
    }

    /// Creates a handle backed by a private in-memory database.
    pub fn in_memory() -> Self {
        Self {
            location: Location::Memory,
            conn: OnceCell::new(),
        }
    }

    /// Path of the backing store (`:memory:` for in-memory handles).
    pub fn path(&self) -> &Path {
        match &self.location {
            Location::File(path) => path,
            Location::Memory => Path::new(IN_MEMORY_PATH),
        }
    }

    /// Returns whether the connection has been opened.
    pub fn is_open(&self) -> bool {
        self.conn.get().is_some()
    }

    /// Returns the shared connection, opening it on first use.
    ///
    /// # Errors
    /// - `DbError::StorageUnavailable` when the store cannot be opened.
    pub fn acquire(&self) -> DbResult<MutexGuard<'_, Connection>> {
        let cell = self.conn.get_or_try_init(|| {
            info!(
                "event=storage_acquire module=db status=opening path={}",
                self.path().display()
            );
            let conn = match &self.location {
                Location::File(path) => open_db(path)?,
                Location::Memory => open_db_in_memory()?,
            };
            Ok::<_, DbError>(Mutex::new(conn))
        })?;

        // Poisoning is ignored: the guard protects no Rust-side state.
        Ok(cell.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Closes the connection if one is open.
    ///
    /// Returns `true` when a connection was closed. A later `acquire`
    /// reopens the store.
    pub fn shutdown(&mut self) -> bool {
        let closed = self.conn.take().is_some();
        if closed {
            info!(
                "event=storage_shutdown module=db status=ok path={}",
                self.path().display()
            );
        } else {
            debug!(
                "event=storage_shutdown module=db status=noop path={}",
                self.path().display()
            );
        }
        closed
    }
}
