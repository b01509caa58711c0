//! SQLite implementation of the short URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::errors::StorageError;
use crate::domain::repositories::ShortUrlRepository;
use crate::utils::db_error::map_insert_error;

/// Row shape of the `short_urls` table.
#[derive(Debug, FromRow)]
struct ShortUrlRow {
    code: String,
    original_url: String,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
    clicks: i64,
}

impl From<ShortUrlRow> for ShortUrl {
    fn from(row: ShortUrlRow) -> Self {
        ShortUrl::new(
            row.code,
            row.original_url,
            row.created_at,
            row.expires_at,
            row.clicks,
        )
    }
}

/// SQLite repository for short URL storage.
///
/// Code uniqueness is guaranteed by the `UNIQUE` constraint on `short_urls.code`,
/// so concurrent inserts of the same code cannot both succeed.
pub struct SqliteShortUrlRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteShortUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShortUrlRepository for SqliteShortUrlRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortUrl>, StorageError> {
        let row = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            SELECT code, original_url, created_at, expires_at, clicks
            FROM short_urls
            WHERE code = ?1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShortUrl::from))
    }

    async fn find_by_original_url(
        &self,
        original_url: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<ShortUrl>, StorageError> {
        // Expiry is checked on decoded timestamps, not with a SQL comparison of TEXT values.
        let rows = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            SELECT code, original_url, created_at, expires_at, clicks
            FROM short_urls
            WHERE original_url = ?1
            ORDER BY id DESC
            "#,
        )
        .bind(original_url)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(ShortUrl::from)
            .find(|url| !url.is_expired_at(now)))
    }

    async fn insert_if_unique(&self, new_url: NewShortUrl) -> Result<ShortUrl, StorageError> {
        sqlx::query(
            r#"
            INSERT INTO short_urls (code, original_url, created_at, expires_at, clicks)
            VALUES (?1, ?2, ?3, ?4, 0)
            "#,
        )
        .bind(&new_url.code)
        .bind(&new_url.original_url)
        .bind(new_url.created_at)
        .bind(new_url.expires_at)
        .execute(self.pool.as_ref())
        .await
        .map_err(map_insert_error)?;

        Ok(new_url.into_record())
    }

    async fn increment_clicks(&self, code: &str) -> Result<bool, StorageError> {
        let result = sqlx::query("UPDATE short_urls SET clicks = clicks + 1 WHERE code = ?1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
