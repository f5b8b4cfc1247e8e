//! Name use-case service.
//!
//! # Responsibility
//! - Provide stable read and write entry points for core callers.
//! - Delegate every call 1:1 to a repository implementation.
//!
//! # Invariants
//! - Repository results and errors are returned unchanged.
//! - Service layer remains storage-agnostic.

use crate::model::name::Name;
use crate::repo::name_repo::{NameRepository, RepoResult};

/// Use-case service wrapper for name operations.
pub struct NameService<R: NameRepository> {
    repo: R,
}

impl<R: NameRepository> NameService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Total number of stored names.
    pub fn count(&self) -> RepoResult<i64> {
        self.repo.count()
    }

    /// Case-insensitive existence check.
    pub fn exists(&self, name: &str) -> RepoResult<bool> {
        self.repo.exists_by_name(name)
    }

    /// Case-insensitive exact lookup; `NameNotFound` when absent.
    pub fn get_by_name(&self, name: &str) -> RepoResult<Name> {
        self.repo.get_by_name(name)
    }

    pub fn get_by_country(&self, country: &str) -> RepoResult<Vec<Name>> {
        self.repo.get_by_country(country)
    }

    pub fn get_by_country_density(&self, country: &str) -> RepoResult<Vec<Name>> {
        self.repo.get_by_country_density(country)
    }

    pub fn get_all(&self) -> RepoResult<Vec<Name>> {
        self.repo.get_all()
    }

    /// Names with `usage_world` outside `[min, max]`.
    pub fn get_between_usage_world(&self, min: i64, max: i64) -> RepoResult<Vec<Name>> {
        self.repo.get_between_usage_world(min, max)
    }

    /// Names with `usage_country` outside `[min, max]`.
    pub fn get_between_usage_country(&self, min: i64, max: i64) -> RepoResult<Vec<Name>> {
        self.repo.get_between_usage_country(min, max)
    }

    /// Names with `rank_world` outside `[min, max]`.
    pub fn get_between_rank_world(&self, min: i64, max: i64) -> RepoResult<Vec<Name>> {
        self.repo.get_between_rank_world(min, max)
    }

    /// Names with `rank_country` outside `[min, max]`.
    pub fn get_between_rank_country(&self, min: i64, max: i64) -> RepoResult<Vec<Name>> {
        self.repo.get_between_rank_country(min, max)
    }

    /// Inserts one name; `DuplicateName` when the value already exists.
    pub fn add(&self, name: &Name) -> RepoResult<()> {
        self.repo.add(name)
    }

    /// Case-insensitive delete; deleting an absent name is a no-op.
    pub fn delete_by_name(&self, name: &str) -> RepoResult<()> {
        self.repo.delete_by_name(name)
    }

    /// Creates the `names` table when missing.
    pub fn create(&self) -> RepoResult<()> {
        self.repo.create()
    }
}
