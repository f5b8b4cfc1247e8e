//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open existing database files or private in-memory databases.
//! - Probe the file header so corrupt files fail at open time.
//!
//! # Invariants
//! - File opens never pass `SQLITE_OPEN_CREATE`.
//! - Every failure is returned as `DbError::StorageUnavailable`.

use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

pub(crate) const IN_MEMORY_PATH: &str = ":memory:";

/// Opens an existing SQLite database file.
///
/// The file is not created when missing; the `names` table is expected to be
/// created explicitly via `NameRepository::create`.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    open_with("file", path, || Connection::open_with_flags(path, flags))
}

/// Opens a private in-memory SQLite database.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with("memory", Path::new(IN_MEMORY_PATH), Connection::open_in_memory)
}

fn open_with(
    mode: &str,
    path: &Path,
    open: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let conn = match open().and_then(|conn| bootstrap_connection(&conn).map(|()| conn)) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(DbError::StorageUnavailable {
                path: PathBuf::from(path),
                source: err,
            });
        }
    };

    info!(
        "event=db_open module=db status=ok mode={mode} duration_ms={}",
        started_at.elapsed().as_millis()
    );
    Ok(conn)
}

fn bootstrap_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    // Reading the schema cookie forces SQLite to parse the file header.
    conn.query_row("PRAGMA schema_version;", [], |row| row.get::<_, i64>(0))?;
    Ok(())
}
