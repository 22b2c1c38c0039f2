//! Admission control over global and per-user in-flight requests.
//!
//! Both counters live in a shared [`CounterStore`] so that every service
//! instance sees the same totals. Each admission increments the counters,
//! each release decrements them, and the store's TTL resets counters that
//! were never released.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::repositories::CounterStore;
use crate::error::AppError;
use tracing::{debug, warn};

/// Counter key shared by all callers.
pub const GLOBAL_COUNTER_KEY: &str = "total_requests";

/// Default maximum number of in-flight admissions across all users.
pub const MAX_CONCURRENT_GLOBAL: i64 = 100;

/// Default maximum number of in-flight admissions for one user.
pub const MAX_CONCURRENT_PER_USER: i64 = 100;

/// Default counter TTL, refreshed on every admission.
pub const RATE_WINDOW_TTL: Duration = Duration::from_secs(60);

/// Counter key for a single user.
pub fn user_counter_key(user_id: &str) -> String {
    format!("user_requests:{user_id}")
}

/// Thresholds applied by [`AdmissionController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdmissionLimits {
    pub max_global: i64,
    pub max_per_user: i64,
    pub window_ttl: Duration,
}

impl Default for AdmissionLimits {
    fn default() -> Self {
        Self {
            max_global: MAX_CONCURRENT_GLOBAL,
            max_per_user: MAX_CONCURRENT_PER_USER,
            window_ttl: RATE_WINDOW_TTL,
        }
    }
}

/// Outcome of an admission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admitted,
    Rejected,
}

/// Gate that bounds concurrent work per caller and globally.
///
/// Counters are incremented even when the attempt is rejected, so every
/// [`try_admit`](Self::try_admit) must be paired with exactly one
/// [`release`](Self::release). [`acquire`](Self::acquire) wraps that
/// pairing in an [`AdmissionPermit`].
pub struct AdmissionController {
    store: Arc<dyn CounterStore>,
    limits: AdmissionLimits,
}

impl AdmissionController {
    /// Creates a new admission controller.
    pub fn new(store: Arc<dyn CounterStore>, limits: AdmissionLimits) -> Self {
        Self { store, limits }
    }

    /// Increments the global and user counters in one atomic batch and
    /// compares the new values to the limits.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the counter store fails. Nothing
    /// was incremented in that case, so no release is owed.
    pub async fn try_admit(&self, user_id: &str) -> Result<Admission, AppError> {
        let keys = [user_counter_key(user_id), GLOBAL_COUNTER_KEY.to_string()];
        let counts = self
            .store
            .increment_all(&keys, self.limits.window_ttl)
            .await?;

        let &[user_count, global_count] = counts.as_slice() else {
            return Err(AppError::internal(format_args!(
                "counter store returned {} values for 2 keys",
                counts.len()
            )));
        };

        if global_count > self.limits.max_global || user_count > self.limits.max_per_user {
            warn!(
                user_id,
                user_count, global_count, "Admission rejected: concurrency limit exceeded"
            );
            return Ok(Admission::Rejected);
        }

        debug!(user_id, user_count, global_count, "Admission granted");
        Ok(Admission::Admitted)
    }

    /// Decrements the user and global counters, never below zero.
    ///
    /// Both counters are attempted even if the first decrement fails.
    ///
    /// # Errors
    ///
    /// Returns the first [`AppError::Internal`] raised by the store.
    pub async fn release(&self, user_id: &str) -> Result<(), AppError> {
        release_counters(self.store.as_ref(), user_id).await
    }

    /// Runs [`try_admit`](Self::try_admit) and wraps the result in a permit
    /// that owes exactly one release, whatever the decision was.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the counter store fails.
    pub async fn acquire(&self, user_id: &str) -> Result<AdmissionPermit, AppError> {
        let decision = self.try_admit(user_id).await?;

        Ok(AdmissionPermit {
            store: Some(Arc::clone(&self.store)),
            user_id: user_id.to_string(),
            decision,
        })
    }
}

async fn release_counters(store: &dyn CounterStore, user_id: &str) -> Result<(), AppError> {
    let user_result = store.decrement_clamped(&user_counter_key(user_id)).await;
    let global_result = store.decrement_clamped(GLOBAL_COUNTER_KEY).await;

    let user_count = user_result?;
    let global_count = global_result?;
    debug!(user_id, user_count, global_count, "Admission released");

    Ok(())
}

/// A pending release for one admission attempt.
///
/// Call [`release`](Self::release) when the guarded work is done. A permit
/// dropped without an explicit release (early return, panic, cancelled
/// future) schedules its release on the current tokio runtime; outside a
/// runtime the counter TTL heals the leak.
#[must_use = "an admission permit must be released"]
pub struct AdmissionPermit {
    store: Option<Arc<dyn CounterStore>>,
    user_id: String,
    decision: Admission,
}

impl AdmissionPermit {
    pub fn is_admitted(&self) -> bool {
        self.decision == Admission::Admitted
    }

    /// Releases the admission.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the counter store fails.
    pub async fn release(mut self) -> Result<(), AppError> {
        match self.store.take() {
            Some(store) => release_counters(store.as_ref(), &self.user_id).await,
            None => Ok(()),
        }
    }
}

impl Drop for AdmissionPermit {
    fn drop(&mut self) {
        let Some(store) = self.store.take() else {
            return;
        };

        let user_id = std::mem::take(&mut self.user_id);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                debug!(user_id = %user_id, "Admission permit dropped, releasing in background");
                handle.spawn(async move {
                    if let Err(e) = release_counters(store.as_ref(), &user_id).await {
                        warn!(user_id = %user_id, "Background admission release failed: {}", e);
                    }
                });
            }
            Err(_) => {
                warn!(
                    user_id = %user_id,
                    "Admission permit dropped outside a runtime, counters heal on TTL"
                );
            }
        }
    }
}
