//! Short link registry with upsert and lazy expiry.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use tracing::{debug, info};

use crate::domain::entities::{LinkRecord, NewLinkRecord};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::generate_code;

/// Default lifetime of a link after its last create-or-fetch write.
pub const LINK_TTL: Duration = Duration::from_secs(10 * 60);

/// Result of [`LinkRegistry::upsert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertOutcome {
    pub code: String,
    /// `true` when a record was inserted or an expired one refreshed.
    pub created: bool,
}

/// Result of [`LinkRegistry::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkResolution {
    Found(LinkRecord),
    /// The record exists but its TTL has elapsed. It stays stored.
    Expired(LinkRecord),
    NotFound,
}

/// Persisted mapping from full URL to short code.
///
/// Expiry is never stored: a record reads as expired once
/// `now > created_at + link_ttl`, and the next upsert for the same URL
/// reactivates it with a fresh timestamp.
pub struct LinkRegistry {
    repository: Arc<dyn LinkRepository>,
    link_ttl: TimeDelta,
}

impl LinkRegistry {
    /// Creates a new link registry.
    pub fn new(repository: Arc<dyn LinkRepository>, link_ttl: Duration) -> Self {
        Self {
            repository,
            link_ttl: TimeDelta::from_std(link_ttl).unwrap_or(TimeDelta::MAX),
        }
    }

    /// Record stored for `full_url`, expired or not.
    pub async fn find_by_url(&self, full_url: &str) -> Result<Option<LinkRecord>, AppError> {
        self.repository.find_by_full_url(full_url).await
    }

    /// Record carrying `code`, expired or not. The oldest one on collision.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<LinkRecord>, AppError> {
        self.repository.find_by_code(code).await
    }

    /// Returns the active code for `full_url`, creating or refreshing the
    /// record when it is absent or expired.
    ///
    /// The lookup and the write are not one atomic step. Concurrent calls
    /// for the same URL may both write; the repository's insert-or-update
    /// keeps a single record and the code is the same either way.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn upsert(&self, full_url: &str) -> Result<UpsertOutcome, AppError> {
        let now = Utc::now();

        if let Some(existing) = self.find_by_url(full_url).await?
            && !self.is_expired_at(&existing, now)
        {
            debug!(code = %existing.short_code, "Active link found");
            return Ok(UpsertOutcome {
                code: existing.short_code,
                created: false,
            });
        }

        let record = self
            .repository
            .save(NewLinkRecord {
                full_url: full_url.to_string(),
                short_code: generate_code(full_url),
                created_at: now.trunc_subsecs(0),
            })
            .await?;

        info!(code = %record.short_code, "Short link written");
        Ok(UpsertOutcome {
            code: record.short_code,
            created: true,
        })
    }

    /// Looks up a code and classifies the record as found or expired.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn resolve(&self, code: &str) -> Result<LinkResolution, AppError> {
        let Some(record) = self.find_by_code(code).await? else {
            return Ok(LinkResolution::NotFound);
        };

        if self.is_expired_at(&record, Utc::now()) {
            Ok(LinkResolution::Expired(record))
        } else {
            Ok(LinkResolution::Found(record))
        }
    }

    fn is_expired_at(&self, record: &LinkRecord, now: DateTime<Utc>) -> bool {
        record
            .created_at
            .checked_add_signed(self.link_ttl)
            .is_some_and(|deadline| now > deadline)
    }
}
