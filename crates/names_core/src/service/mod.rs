//! Core use-case services.
//!
//! # Responsibility
//! - Expose repository operations to callers that should not depend on the
//!   storage adapter.

pub mod name_service;
