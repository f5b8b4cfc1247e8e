//! Domain model for the names dataset.
//!
//! # Responsibility
//! - Define the value types returned by repository reads.
//!
//! # Invariants
//! - A `Name` is identified solely by its written form.
//! - Derived attributes are computed here, never read from storage.

pub mod name;
