//! In-process counter store.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::time::Instant;

use crate::domain::repositories::CounterStore;
use crate::error::AppError;

#[derive(Debug, Clone, Copy)]
struct Counter {
    value: i64,
    expires_at: Instant,
}

/// Counter store held in process memory.
///
/// One lock guards the whole map, so an increment batch over several keys
/// is atomic. Expired counters are dropped lazily on access. Counters are
/// not shared between processes: limits apply per instance only.
#[derive(Default)]
pub struct MemoryCounterStore {
    counters: Mutex<HashMap<String, Counter>>,
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn live_value(counters: &mut HashMap<String, Counter>, key: &str, now: Instant) -> Option<i64> {
        let counter = counters.get(key).copied()?;
        if counter.expires_at > now {
            Some(counter.value)
        } else {
            counters.remove(key);
            None
        }
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn increment_all(&self, keys: &[String], ttl: Duration) -> Result<Vec<i64>, AppError> {
        let now = Instant::now();
        let mut counters = self.counters.lock();

        let counts = keys
            .iter()
            .map(|key| {
                let value = Self::live_value(&mut counters, key, now).unwrap_or(0) + 1;
                counters.insert(
                    key.clone(),
                    Counter {
                        value,
                        expires_at: now + ttl,
                    },
                );
                value
            })
            .collect();

        Ok(counts)
    }

    async fn decrement_clamped(&self, key: &str) -> Result<i64, AppError> {
        let now = Instant::now();
        let mut counters = self.counters.lock();

        if Self::live_value(&mut counters, key, now).is_none() {
            return Ok(0);
        }

        let value = counters.get_mut(key).map_or(0, |counter| {
            if counter.value > 0 {
                counter.value -= 1;
            }
            counter.value
        });

        Ok(value)
    }

    async fn get(&self, key: &str) -> Result<Option<i64>, AppError> {
        let mut counters = self.counters.lock();
        Ok(Self::live_value(&mut counters, key, Instant::now()))
    }

    async fn reset(&self, key: &str) -> Result<(), AppError> {
        self.counters.lock().remove(key);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_increment_returns_counts_in_key_order() {
        let store = MemoryCounterStore::new();
        let ttl = Duration::from_secs(60);

        store.increment_all(&keys(&["a"]), ttl).await.unwrap();
        let counts = store.increment_all(&keys(&["b", "a"]), ttl).await.unwrap();

        assert_eq!(counts, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_decrement_never_goes_negative() {
        let store = MemoryCounterStore::new();
        store
            .increment_all(&keys(&["a"]), Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(store.decrement_clamped("a").await.unwrap(), 0);
        assert_eq!(store.decrement_clamped("a").await.unwrap(), 0);
        assert_eq!(store.get("a").await.unwrap(), Some(0));
    }

    #[tokio::test]
    async fn test_decrement_missing_key_is_noop() {
        let store = MemoryCounterStore::new();

        assert_eq!(store.decrement_clamped("missing").await.unwrap(), 0);
        assert_eq!(store.get("missing").await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_counter_expires_after_ttl() {
        let store = MemoryCounterStore::new();
        let ttl = Duration::from_secs(60);
        store.increment_all(&keys(&["leaky"]), ttl).await.unwrap();

        tokio::time::advance(Duration::from_secs(59)).await;
        assert_eq!(store.get("leaky").await.unwrap(), Some(1));

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(store.get("leaky").await.unwrap(), None);
        assert_eq!(store.decrement_clamped("leaky").await.unwrap(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_increment_refreshes_ttl() {
        let store = MemoryCounterStore::new();
        let ttl = Duration::from_secs(60);
        store.increment_all(&keys(&["k"]), ttl).await.unwrap();

        tokio::time::advance(Duration::from_secs(45)).await;
        store.increment_all(&keys(&["k"]), ttl).await.unwrap();

        tokio::time::advance(Duration::from_secs(45)).await;
        assert_eq!(store.get("k").await.unwrap(), Some(2));
    }

    #[tokio::test]
    async fn test_reset_removes_counter() {
        let store = MemoryCounterStore::new();
        store
            .increment_all(&keys(&["k"]), Duration::from_secs(60))
            .await
            .unwrap();

        store.reset("k").await.unwrap();

        assert_eq!(store.get("k").await.unwrap(), None);
    }
}
