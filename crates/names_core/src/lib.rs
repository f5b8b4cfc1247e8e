//! Lookup library over a dataset of given names and their statistics.
//!
//! Layers, bottom-up: `db` (storage handle), `repo` (queries), `service`
//! (use-case delegation), `facade` (read-only surface).

pub mod db;
pub mod facade;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DbResult, StorageHandle};
pub use facade::Names;
pub use logging::{init_logging, logging_status, LogLevel, LoggingConfig, LoggingError};
pub use model::name::{Geography, Name, Popularity};
pub use repo::name_repo::{NameRepository, RepoError, RepoResult, SqliteNameRepository};
pub use service::name_service::NameService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
