//! In-process link repository.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::entities::{LinkRecord, NewLinkRecord};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

#[derive(Default)]
struct Inner {
    next_id: i64,
    by_url: HashMap<String, LinkRecord>,
}

/// Link repository held in process memory.
///
/// Gives the same per-URL atomicity as the PostgreSQL repository but is
/// not shared between processes. Used by tests and single-node setups.
#[derive(Default)]
pub struct MemoryLinkRepository {
    inner: Mutex<Inner>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.inner.lock().by_url.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn find_by_full_url(&self, full_url: &str) -> Result<Option<LinkRecord>, AppError> {
        Ok(self.inner.lock().by_url.get(full_url).cloned())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<LinkRecord>, AppError> {
        Ok(self
            .inner
            .lock()
            .by_url
            .values()
            .filter(|r| r.short_code == code)
            .min_by_key(|r| r.id)
            .cloned())
    }

    async fn save(&self, record: NewLinkRecord) -> Result<LinkRecord, AppError> {
        let mut inner = self.inner.lock();

        let id = match inner.by_url.get(&record.full_url) {
            Some(existing) => existing.id,
            None => {
                inner.next_id += 1;
                inner.next_id
            }
        };

        let saved = LinkRecord::new(id, record.full_url, record.short_code, record.created_at);
        inner.by_url.insert(saved.full_url.clone(), saved.clone());

        Ok(saved)
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, Utc};

    fn new_record(url: &str, code: &str) -> NewLinkRecord {
        NewLinkRecord {
            full_url: url.into(),
            short_code: code.into(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_save_overwrites_existing_url() {
        let repo = MemoryLinkRepository::new();

        let first = repo.save(new_record("https://a.example", "aaaaaa")).await.unwrap();
        let mut refreshed = new_record("https://a.example", "aaaaaa");
        refreshed.created_at = first.created_at + TimeDelta::minutes(20);
        let second = repo.save(refreshed).await.unwrap();

        assert_eq!(repo.len(), 1);
        assert_eq!(first.id, second.id);
        assert!(second.created_at > first.created_at);
    }

    #[tokio::test]
    async fn test_find_by_code_prefers_oldest_on_collision() {
        let repo = MemoryLinkRepository::new();
        repo.save(new_record("https://first.example", "c0ffee"))
            .await
            .unwrap();
        repo.save(new_record("https://second.example", "c0ffee"))
            .await
            .unwrap();

        let found = repo.find_by_code("c0ffee").await.unwrap().unwrap();

        assert_eq!(found.full_url, "https://first.example");
    }

    #[tokio::test]
    async fn test_find_missing() {
        let repo = MemoryLinkRepository::new();

        assert!(repo.is_empty());
        assert!(repo.find_by_code("zzzzzz").await.unwrap().is_none());
        assert!(repo.find_by_full_url("https://x").await.unwrap().is_none());
    }
}
