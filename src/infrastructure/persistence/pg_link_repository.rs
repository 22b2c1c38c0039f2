//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{LinkRecord, NewLinkRecord, format_created_at, parse_created_at};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Row layout of the `url_map` table.
#[derive(Debug, sqlx::FromRow)]
struct UrlMapRow {
    id: i64,
    full_url: String,
    short_url: String,
    created_at: String,
}

impl TryFrom<UrlMapRow> for LinkRecord {
    type Error = AppError;

    fn try_from(row: UrlMapRow) -> Result<Self, Self::Error> {
        let created_at = parse_created_at(&row.created_at).map_err(|e| {
            AppError::internal(format_args!(
                "invalid created_at {:?} in url_map row {}: {e}",
                row.created_at, row.id
            ))
        })?;

        Ok(LinkRecord::new(
            row.id,
            row.full_url,
            row.short_url,
            created_at,
        ))
    }
}

/// PostgreSQL repository for link records.
///
/// The `UNIQUE (full_url)` constraint together with `ON CONFLICT DO UPDATE`
/// makes [`LinkRepository::save`] a single atomic statement.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn find_by_full_url(&self, full_url: &str) -> Result<Option<LinkRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlMapRow>(
            r#"
            SELECT id, full_url, short_url, created_at
            FROM url_map
            WHERE full_url = $1
            "#,
        )
        .bind(full_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(LinkRecord::try_from).transpose()
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<LinkRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlMapRow>(
            r#"
            SELECT id, full_url, short_url, created_at
            FROM url_map
            WHERE short_url = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(LinkRecord::try_from).transpose()
    }

    async fn save(&self, record: NewLinkRecord) -> Result<LinkRecord, AppError> {
        let row = sqlx::query_as::<_, UrlMapRow>(
            r#"
            INSERT INTO url_map (full_url, short_url, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (full_url) DO UPDATE
            SET short_url = EXCLUDED.short_url,
                created_at = EXCLUDED.created_at
            RETURNING id, full_url, short_url, created_at
            "#,
        )
        .bind(&record.full_url)
        .bind(&record.short_code)
        .bind(format_created_at(record.created_at))
        .fetch_one(self.pool.as_ref())
        .await?;

        LinkRecord::try_from(row)
    }

    async fn health_check(&self) -> bool {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await
            .is_ok()
    }
}
