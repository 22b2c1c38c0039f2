#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Router, routing::get};
use chrono::{SubsecRound, TimeDelta, Utc};
use std::sync::Arc;

use shortgate::api::handlers::redirect_handler;
use shortgate::api::routes::api_routes;
use shortgate::application::services::ServiceSettings;
use shortgate::domain::entities::{LinkRecord, NewLinkRecord};
use shortgate::domain::repositories::{CounterStore, LinkRepository};
use shortgate::error::AppError;
use shortgate::infrastructure::counters::MemoryCounterStore;
use shortgate::infrastructure::persistence::MemoryLinkRepository;
use shortgate::state::AppState;
use shortgate::utils::code_generator::generate_code;

/// State wired on in-memory stores, with handles to inspect them.
pub struct TestContext {
    pub state: AppState,
    pub links: Arc<MemoryLinkRepository>,
    pub counters: Arc<MemoryCounterStore>,
}

pub fn create_test_state() -> TestContext {
    create_test_state_with(ServiceSettings::default())
}

pub fn create_test_state_with(settings: ServiceSettings) -> TestContext {
    let links = Arc::new(MemoryLinkRepository::new());
    let counters = Arc::new(MemoryCounterStore::new());
    let state = AppState::new(links.clone(), counters.clone(), settings);

    TestContext {
        state,
        links,
        counters,
    }
}

/// Same routes as the server, without the outer middleware.
pub fn test_router(state: AppState) -> Router {
    Router::new()
        .merge(api_routes())
        .route("/{code}", get(redirect_handler))
        .with_state(state)
}

/// Stores a record for `url` whose last write happened `age` ago.
pub async fn seed_link(links: &MemoryLinkRepository, url: &str, age: TimeDelta) -> LinkRecord {
    links
        .save(NewLinkRecord {
            full_url: url.to_string(),
            short_code: generate_code(url),
            created_at: (Utc::now() - age).trunc_subsecs(0),
        })
        .await
        .unwrap()
}

/// Current value of a counter, treating an absent key as zero.
pub async fn counter_value(counters: &MemoryCounterStore, key: &str) -> i64 {
    counters.get(key).await.unwrap().unwrap_or(0)
}

/// Link repository whose every call fails.
pub struct FailingLinkRepository;

#[async_trait]
impl LinkRepository for FailingLinkRepository {
    async fn find_by_full_url(&self, _full_url: &str) -> Result<Option<LinkRecord>, AppError> {
        Err(AppError::Internal("connection refused".into()))
    }

    async fn find_by_code(&self, _code: &str) -> Result<Option<LinkRecord>, AppError> {
        Err(AppError::Internal("connection refused".into()))
    }

    async fn save(&self, _record: NewLinkRecord) -> Result<LinkRecord, AppError> {
        Err(AppError::Internal("connection refused".into()))
    }

    async fn health_check(&self) -> bool {
        false
    }
}
