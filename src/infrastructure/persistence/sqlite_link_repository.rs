//! SQLite implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

const LINK_COLUMNS: &str = "id, url, short_code, created_at, updated_at, access_count";

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    url: String,
    short_code: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    access_count: i64,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link::new(
            r.id,
            r.url,
            r.short_code,
            r.created_at,
            r.updated_at,
            r.access_count,
        )
    }
}

/// SQLite repository for link storage and retrieval.
///
/// `id` and `short_code` are both unique in the schema, so a plain `INSERT`
/// is the atomic insert-if-absent the domain contract asks for.
pub struct SqliteLinkRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for SqliteLinkRepository {
    async fn insert(&self, new_link: &NewLink) -> Result<Link, AppError> {
        sqlx::query(
            r#"
            INSERT INTO links (id, short_code, url, created_at, updated_at, access_count)
            VALUES (?, ?, ?, ?, ?, 0)
            "#,
        )
        .bind(new_link.id)
        .bind(&new_link.short_code)
        .bind(&new_link.url)
        .bind(new_link.created_at)
        .bind(new_link.created_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(Link::from(new_link.clone()))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE short_code = ?"
        ))
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn exists(&self, code: &str) -> Result<bool, AppError> {
        let exists: i64 =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM links WHERE short_code = ?)")
                .bind(code)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists != 0)
    }

    async fn next_id(&self) -> Result<i64, AppError> {
        // sqlite_sequence keeps the highest id ever handed out, so ids of
        // deleted links are not reissued.
        let next: i64 = sqlx::query_scalar(
            r#"
            SELECT MAX(
                COALESCE((SELECT seq FROM sqlite_sequence WHERE name = 'links'), 0),
                COALESCE((SELECT MAX(id) FROM links), 0)
            ) + 1
            "#,
        )
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(next)
    }

    async fn update_url(
        &self,
        code: &str,
        url: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "UPDATE links SET url = ?, updated_at = ? WHERE short_code = ? RETURNING {LINK_COLUMNS}"
        ))
        .bind(url)
        .bind(updated_at)
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn remove_by_code(&self, code: &str) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE short_code = ?")
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected())
    }

    async fn increment_access(
        &self,
        code: &str,
        touched_at: Option<DateTime<Utc>>,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE links
            SET access_count = access_count + 1,
                updated_at = COALESCE(?, updated_at)
            WHERE short_code = ?
            "#,
        )
        .bind(touched_at)
        .bind(code)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {LINK_COLUMNS} FROM links ORDER BY id ASC LIMIT ? OFFSET ?"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn total_accesses(&self) -> Result<i64, AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(access_count), 0) FROM links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(total)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
