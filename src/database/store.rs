use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Bookmark, BookmarkPatch, NewBookmark};

/// Errors surfaced by a bookmark store. Storage failures are passed through
/// opaquely; nothing here retries or reinterprets them.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// The five operations against the bookmarks table. A missing row is represented
/// as absence (`Ok(None)` or a zero affected-row count), never as an error.
#[async_trait]
pub trait BookmarkStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Bookmark>, StoreError>;

    async fn get_by_id(&self, id: i64) -> Result<Option<Bookmark>, StoreError>;

    /// Inserts and returns the stored record, including the assigned id.
    async fn create(&self, bookmark: NewBookmark) -> Result<Bookmark, StoreError>;

    /// Applies the patch to the row matching `id`; returns the affected-row
    /// count (0 means no such id).
    async fn update(&self, id: i64, patch: BookmarkPatch) -> Result<u64, StoreError>;

    /// Removes the row matching `id`; returns the affected-row count.
    async fn delete(&self, id: i64) -> Result<u64, StoreError>;
}
