//! Read-only facade over a storage handle.
//!
//! # Responsibility
//! - Offer the query surface of the names dataset without exposing writes.
//! - Acquire the shared connection per call and forward to `NameService`.
//!
//! # Invariants
//! - No operation here mutates the store.
//! - Storage failures surface as `RepoError::DatabaseOperationFailed`.

use crate::db::StorageHandle;
use crate::model::name::Name;
use crate::repo::name_repo::{RepoResult, SqliteNameRepository};
use crate::service::name_service::NameService;

/// Query entry point bound to one [`StorageHandle`].
#[derive(Debug, Clone, Copy)]
pub struct Names<'h> {
    storage: &'h StorageHandle,
}

impl<'h> Names<'h> {
    pub fn new(storage: &'h StorageHandle) -> Self {
        Self { storage }
    }

    pub fn count(&self) -> RepoResult<i64> {
        self.with_service(|service| service.count())
    }

    pub fn exists(&self, name: &str) -> RepoResult<bool> {
        self.with_service(|service| service.exists(name))
    }

    pub fn get_by_name(&self, name: &str) -> RepoResult<Name> {
        self.with_service(|service| service.get_by_name(name))
    }

    pub fn get_by_country(&self, country: &str) -> RepoResult<Vec<Name>> {
        self.with_service(|service| service.get_by_country(country))
    }

    pub fn get_by_country_density(&self, country: &str) -> RepoResult<Vec<Name>> {
        self.with_service(|service| service.get_by_country_density(country))
    }

    pub fn get_all(&self) -> RepoResult<Vec<Name>> {
        self.with_service(|service| service.get_all())
    }

    pub fn get_between_usage_world(&self, min: i64, max: i64) -> RepoResult<Vec<Name>> {
        self.with_service(|service| service.get_between_usage_world(min, max))
    }

    pub fn get_between_usage_country(&self, min: i64, max: i64) -> RepoResult<Vec<Name>> {
        self.with_service(|service| service.get_between_usage_country(min, max))
    }

    pub fn get_between_rank_world(&self, min: i64, max: i64) -> RepoResult<Vec<Name>> {
        self.with_service(|service| service.get_between_rank_world(min, max))
    }

    pub fn get_between_rank_country(&self, min: i64, max: i64) -> RepoResult<Vec<Name>> {
        self.with_service(|service| service.get_between_rank_country(min, max))
    }

    fn with_service<T>(
        &self,
        call: impl FnOnce(&NameService<SqliteNameRepository<'_>>) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let conn = self.storage.acquire()?;
        let service = NameService::new(SqliteNameRepository::new(&conn));
        call(&service)
    }
}
