//! Trait for the shared in-flight counter store.

use crate::error::AppError;
use async_trait::async_trait;
use std::time::Duration;

/// Atomic integer counters with a time-to-live.
///
/// Counters are created on first increment and vanish once their TTL
/// elapses without a refresh. A vanished counter reads as zero.
///
/// # Implementations
///
/// - [`crate::infrastructure::counters::RedisCounterStore`] - Redis, shared across instances
/// - [`crate::infrastructure::counters::MemoryCounterStore`] - In-process, for tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Increments every key by one and resets each key's TTL to `ttl`.
    ///
    /// The whole batch is applied atomically. Returns the post-increment
    /// values in the order of `keys`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store is unreachable; in that
    /// case no key was modified.
    async fn increment_all(&self, keys: &[String], ttl: Duration) -> Result<Vec<i64>, AppError>;

    /// Decrements `key` by one unless it is already zero or absent.
    ///
    /// Returns the resulting value. Leaves the key's TTL untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store is unreachable.
    async fn decrement_clamped(&self, key: &str) -> Result<i64, AppError>;

    /// Reads a counter. `None` when the key is absent or expired.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store is unreachable.
    async fn get(&self, key: &str) -> Result<Option<i64>, AppError>;

    /// Deletes a counter outright.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store is unreachable.
    async fn reset(&self, key: &str) -> Result<(), AppError>;

    /// Checks if the store backend is reachable.
    async fn health_check(&self) -> bool;
}
