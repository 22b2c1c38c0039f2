mod common;

use axum_test::TestServer;
use chrono::TimeDelta;
use serde_json::json;
use shortgate::application::services::{
    AdmissionLimits, GLOBAL_COUNTER_KEY, ServiceSettings, user_counter_key,
};
use shortgate::utils::code_generator::generate_code;
use std::sync::Arc;
use tokio::task::JoinSet;

#[tokio::test]
async fn test_generate_creates_then_fetches() {
    let ctx = common::create_test_state();
    let server = TestServer::new(common::test_router(ctx.state.clone())).unwrap();

    let body = json!({ "full_url": "https://example.com/a", "user_id": "42" });

    let first = server.post("/generate").json(&body).await;
    assert_eq!(first.status_code(), 201);
    let code = first.json::<serde_json::Value>()["short_url"]
        .as_str()
        .unwrap()
        .to_string();
    assert_eq!(code, generate_code("https://example.com/a"));
    assert_eq!(code.len(), 6);

    let second = server.post("/generate").json(&body).await;
    assert_eq!(second.status_code(), 200);
    assert_eq!(second.json::<serde_json::Value>()["short_url"], code);

    assert_eq!(ctx.links.len(), 1);
}

#[tokio::test]
async fn test_generate_releases_counters() {
    let ctx = common::create_test_state();
    let server = TestServer::new(common::test_router(ctx.state.clone())).unwrap();

    for i in 0..5 {
        let response = server
            .post("/generate")
            .json(&json!({ "full_url": format!("https://example.com/{i}"), "user_id": "7" }))
            .await;
        assert_eq!(response.status_code(), 201);
    }

    assert_eq!(
        common::counter_value(&ctx.counters, &user_counter_key("7")).await,
        0
    );
    assert_eq!(
        common::counter_value(&ctx.counters, GLOBAL_COUNTER_KEY).await,
        0
    );
}

#[tokio::test]
async fn test_generate_refreshes_expired_link() {
    let ctx = common::create_test_state();
    let seeded =
        common::seed_link(&ctx.links, "https://example.com/old", TimeDelta::minutes(11)).await;
    let server = TestServer::new(common::test_router(ctx.state.clone())).unwrap();

    let response = server
        .post("/generate")
        .json(&json!({ "full_url": "https://example.com/old", "user_id": "42" }))
        .await;

    assert_eq!(response.status_code(), 201);
    assert_eq!(
        response.json::<serde_json::Value>()["short_url"],
        seeded.short_code
    );
    assert_eq!(ctx.links.len(), 1);

    let inspect = server.get(&format!("/get/{}", seeded.short_code)).await;
    assert_eq!(inspect.status_code(), 200);
}

#[tokio::test]
async fn test_generate_missing_user_id() {
    let ctx = common::create_test_state();
    let server = TestServer::new(common::test_router(ctx.state.clone())).unwrap();

    let response = server
        .post("/generate")
        .json(&json!({ "full_url": "https://example.com" }))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<serde_json::Value>()["error"],
        "user_id is required"
    );
    assert!(ctx.links.is_empty());
}

#[tokio::test]
async fn test_generate_missing_url() {
    let ctx = common::create_test_state();
    let server = TestServer::new(common::test_router(ctx.state.clone())).unwrap();

    let response = server
        .post("/generate")
        .json(&json!({ "full_url": "", "user_id": "42" }))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<serde_json::Value>()["error"],
        "URL is required"
    );
}

#[tokio::test]
async fn test_generate_user_id_checked_first() {
    let ctx = common::create_test_state();
    let server = TestServer::new(common::test_router(ctx.state.clone())).unwrap();

    let response = server.post("/generate").json(&json!({})).await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<serde_json::Value>()["error"],
        "user_id is required"
    );
}

#[tokio::test]
async fn test_generate_malformed_body() {
    let ctx = common::create_test_state();
    let server = TestServer::new(common::test_router(ctx.state.clone())).unwrap();

    let response = server.post("/generate").text("not json").await;

    assert_eq!(response.status_code(), 400);
    assert!(response.json::<serde_json::Value>()["error"].is_string());
}

#[tokio::test]
async fn test_generate_rate_limited() {
    let settings = ServiceSettings {
        admission: AdmissionLimits {
            max_per_user: 0,
            ..AdmissionLimits::default()
        },
        ..ServiceSettings::default()
    };
    let ctx = common::create_test_state_with(settings);
    let server = TestServer::new(common::test_router(ctx.state.clone())).unwrap();

    let response = server
        .post("/generate")
        .json(&json!({ "full_url": "https://example.com", "user_id": "42" }))
        .await;

    assert_eq!(response.status_code(), 429);
    assert_eq!(
        response.json::<serde_json::Value>()["error"],
        "Too many concurrent requests. Please try again later."
    );
    assert!(ctx.links.is_empty());

    // Rejected attempts are released too.
    assert_eq!(
        common::counter_value(&ctx.counters, &user_counter_key("42")).await,
        0
    );
    assert_eq!(
        common::counter_value(&ctx.counters, GLOBAL_COUNTER_KEY).await,
        0
    );
}

#[tokio::test]
async fn test_generate_store_failure() {
    let counters = Arc::new(shortgate::infrastructure::counters::MemoryCounterStore::new());
    let state = shortgate::state::AppState::new(
        Arc::new(common::FailingLinkRepository),
        counters.clone(),
        ServiceSettings::default(),
    );
    let server = TestServer::new(common::test_router(state)).unwrap();

    let response = server
        .post("/generate")
        .json(&json!({ "full_url": "https://example.com", "user_id": "42" }))
        .await;

    assert_eq!(response.status_code(), 500);
    assert_eq!(
        response.json::<serde_json::Value>()["error"],
        "An error occurred"
    );
    assert_eq!(common::counter_value(&counters, GLOBAL_COUNTER_KEY).await, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_generate_for_one_url_keeps_one_record() {
    let ctx = common::create_test_state();
    let url = "https://example.com/popular";

    let mut calls = JoinSet::new();
    for i in 0..50 {
        let service = Arc::clone(&ctx.state.resolution_service);
        calls.spawn(async move {
            let user_id = format!("user-{}", i % 10);
            service.create_or_fetch(Some(url), Some(&user_id)).await
        });
    }

    let mut created = 0;
    while let Some(result) = calls.join_next().await {
        let outcome = result.unwrap().unwrap();
        assert_eq!(outcome.code, generate_code(url));
        if outcome.created {
            created += 1;
        }
    }

    assert!(created >= 1);
    assert_eq!(ctx.links.len(), 1);
    assert_eq!(
        common::counter_value(&ctx.counters, GLOBAL_COUNTER_KEY).await,
        0
    );
    for i in 0..10 {
        let key = user_counter_key(&format!("user-{i}"));
        assert_eq!(common::counter_value(&ctx.counters, &key).await, 0);
    }
}
