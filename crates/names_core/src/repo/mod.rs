//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract for the names dataset.
//! - Isolate SQLite query details from service and facade callers.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NameNotFound`,
//!   `DuplicateName`) in addition to store transport errors.
//! - Absence in list queries is an empty `Vec`, not an error.

pub mod name_repo;
