use chrono::{TimeZone, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use shortgate::domain::entities::NewLinkRecord;
use shortgate::domain::repositories::LinkRepository;
use shortgate::infrastructure::persistence::PgLinkRepository;

fn new_record(url: &str, code: &str, hour: u32) -> NewLinkRecord {
    NewLinkRecord {
        full_url: url.to_string(),
        short_code: code.to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 6, 1, hour, 0, 0).unwrap(),
    }
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_save_inserts_record(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let record = repo
        .save(new_record("https://example.com", "100680", 10))
        .await
        .unwrap();

    assert!(record.id > 0);
    assert_eq!(record.full_url, "https://example.com");
    assert_eq!(record.short_code, "100680");
    assert_eq!(
        record.created_at,
        Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap()
    );
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_save_upserts_on_full_url(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool.clone()));

    let first = repo
        .save(new_record("https://example.com", "100680", 10))
        .await
        .unwrap();
    let second = repo
        .save(new_record("https://example.com", "100680", 12))
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(
        second.created_at,
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    );

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url_map")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_find_by_full_url(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.save(new_record("https://example.com/a", "aaaaaa", 10))
        .await
        .unwrap();

    let found = repo.find_by_full_url("https://example.com/a").await.unwrap();
    assert_eq!(found.unwrap().short_code, "aaaaaa");

    let missing = repo.find_by_full_url("https://example.com/b").await.unwrap();
    assert!(missing.is_none());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_find_by_code_prefers_oldest_row(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    let older = repo
        .save(new_record("https://example.com/one", "c0ffee", 10))
        .await
        .unwrap();
    repo.save(new_record("https://example.com/two", "c0ffee", 11))
        .await
        .unwrap();

    let found = repo.find_by_code("c0ffee").await.unwrap().unwrap();

    assert_eq!(found.id, older.id);
    assert_eq!(found.full_url, "https://example.com/one");
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_find_by_code_not_found(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let result = repo.find_by_code("zzzzzz").await.unwrap();

    assert!(result.is_none());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_health_check(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.health_check().await);
}
