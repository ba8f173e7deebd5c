use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool, QueryBuilder};

use crate::config::AppConfig;
use crate::models::{Bookmark, BookmarkPatch, NewBookmark};

use super::store::{BookmarkStore, StoreError};

/// Postgres-backed store. Holds the one shared pool, created at startup and
/// reused across all requests.
///
/// Expected table:
/// `bookmarks(id BIGSERIAL PRIMARY KEY, title TEXT NOT NULL, url TEXT NOT NULL,
/// description TEXT NOT NULL DEFAULT '', rating DOUBLE PRECISION NOT NULL)`
pub struct PgBookmarkStore {
    pool: PgPool,
}

impl PgBookmarkStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &AppConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await?;
        tracing::info!("connected to database");
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl BookmarkStore for PgBookmarkStore {
    async fn list_all(&self) -> Result<Vec<Bookmark>, StoreError> {
        let rows = sqlx::query_as::<_, Bookmark>(
            "SELECT id, title, url, description, rating FROM bookmarks",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Bookmark>, StoreError> {
        let row = sqlx::query_as::<_, Bookmark>(
            "SELECT id, title, url, description, rating FROM bookmarks WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn create(&self, bookmark: NewBookmark) -> Result<Bookmark, StoreError> {
        let row = sqlx::query_as::<_, Bookmark>(
            "INSERT INTO bookmarks (title, url, description, rating) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, title, url, description, rating",
        )
        .bind(&bookmark.title)
        .bind(&bookmark.url)
        .bind(&bookmark.description)
        .bind(bookmark.rating)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i64, patch: BookmarkPatch) -> Result<u64, StoreError> {
        if patch.is_empty() {
            return Ok(0);
        }

        let mut query = QueryBuilder::new("UPDATE bookmarks SET ");
        let mut fields = query.separated(", ");
        if let Some(title) = &patch.title {
            fields.push("title = ").push_bind_unseparated(title);
        }
        if let Some(url) = &patch.url {
            fields.push("url = ").push_bind_unseparated(url);
        }
        if let Some(description) = &patch.description {
            fields.push("description = ").push_bind_unseparated(description);
        }
        if let Some(rating) = patch.rating {
            fields.push("rating = ").push_bind_unseparated(rating);
        }
        query.push(" WHERE id = ").push_bind(id);

        let result = query.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
