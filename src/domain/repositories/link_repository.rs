//! Repository trait for link record persistence.

use crate::domain::entities::{LinkRecord, NewLinkRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Durable, key-indexed storage of link records.
///
/// The store must be shared between all service instances.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Finds the record for a full URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_full_url(&self, full_url: &str) -> Result<Option<LinkRecord>, AppError>;

    /// Finds a record by its short code.
    ///
    /// Codes are not guaranteed unique; when several records share one,
    /// the oldest record (lowest id) is returned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<LinkRecord>, AppError>;

    /// Inserts a record, or overwrites code and timestamp of the existing
    /// record for the same `full_url`.
    ///
    /// Must be atomic per `full_url`: concurrent saves for one URL leave
    /// exactly one record behind (last write wins).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn save(&self, record: NewLinkRecord) -> Result<LinkRecord, AppError>;

    /// Checks if the storage backend is reachable.
    async fn health_check(&self) -> bool;
}
