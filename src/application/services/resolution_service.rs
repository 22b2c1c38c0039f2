//! Create-or-fetch, inspect and redirect, composed from admission control
//! and the link registry.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::application::services::admission_controller::{AdmissionController, AdmissionLimits};
use crate::application::services::link_registry::{
    LINK_TTL, LinkRegistry, LinkResolution, UpsertOutcome,
};
use crate::domain::repositories::{CounterStore, LinkRepository};
use crate::error::AppError;

/// Tunables of the resolution service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceSettings {
    pub admission: AdmissionLimits,
    pub link_ttl: Duration,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            admission: AdmissionLimits::default(),
            link_ttl: LINK_TTL,
        }
    }
}

/// Externally visible shortener operations.
///
/// Holds no shared state of its own beyond the two stores, so it can serve
/// any number of concurrent requests.
pub struct ResolutionService {
    admission: AdmissionController,
    registry: LinkRegistry,
}

impl ResolutionService {
    /// Creates a new resolution service.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        counter_store: Arc<dyn CounterStore>,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            admission: AdmissionController::new(counter_store, settings.admission),
            registry: LinkRegistry::new(link_repository, settings.link_ttl),
        }
    }

    /// Returns the short code for `full_url`, creating it if needed.
    ///
    /// # Flow
    ///
    /// 1. Both inputs must be present and non-empty (`user_id` checked first)
    /// 2. Admission against the global and per-user counters
    /// 3. Registry upsert
    /// 4. Release of the admission, on every path after step 2 succeeded
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidRequest`] if an input is missing
    /// - [`AppError::RateLimited`] if the admission was rejected
    /// - [`AppError::Internal`] on any store failure, including a failed release
    pub async fn create_or_fetch(
        &self,
        full_url: Option<&str>,
        user_id: Option<&str>,
    ) -> Result<UpsertOutcome, AppError> {
        let user_id = user_id
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::invalid_request("user_id is required"))?;
        let full_url = full_url
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::invalid_request("URL is required"))?;

        let permit = self.admission.acquire(user_id).await?;

        let outcome = if permit.is_admitted() {
            self.registry.upsert(full_url).await
        } else {
            Err(AppError::RateLimited)
        };

        let released = permit.release().await;

        match (outcome, released) {
            (Ok(outcome), Ok(())) => Ok(outcome),
            (Ok(_), Err(e)) => {
                warn!(user_id, "Link written but admission release failed");
                Err(e)
            }
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(release_err)) => {
                warn!(user_id, error = %release_err, "Admission release failed after request error");
                Err(e)
            }
        }
    }

    /// Returns the full URL behind a code.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if no record has this code
    /// - [`AppError::Expired`] if the record is past its TTL
    /// - [`AppError::Internal`] on storage errors
    pub async fn inspect(&self, code: &str) -> Result<String, AppError> {
        match self.registry.resolve(code).await? {
            LinkResolution::Found(record) => Ok(record.full_url),
            LinkResolution::Expired(_) => Err(AppError::Expired),
            LinkResolution::NotFound => Err(AppError::NotFound),
        }
    }

    /// Returns the redirect target for a code.
    ///
    /// Same outcomes as [`inspect`](Self::inspect); an expired link is never
    /// redirected.
    ///
    /// # Errors
    ///
    /// See [`inspect`](Self::inspect).
    pub async fn redirect(&self, code: &str) -> Result<String, AppError> {
        self.inspect(code).await
    }
}
