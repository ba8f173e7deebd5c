//! In-process store used by the test suite: insertion-ordered rows, a call
//! counter for asserting that storage was never touched, and failure injection
//! for exercising the error normalizer.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::models::{Bookmark, BookmarkPatch, NewBookmark};

use super::store::{BookmarkStore, StoreError};

#[derive(Default)]
pub struct MemoryBookmarkStore {
    inner: Mutex<Inner>,
    calls: AtomicUsize,
    fail: AtomicBool,
}

#[derive(Default)]
struct Inner {
    rows: Vec<Bookmark>,
    last_id: i64,
}

impl MemoryBookmarkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store operations performed so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// When set, every operation fails as if the backing storage were down.
    pub fn fail_storage(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Raw rows as stored, without any sanitization.
    pub fn snapshot(&self) -> Vec<Bookmark> {
        self.lock().rows.clone()
    }

    /// A panic mid-operation leaves usable data behind, so a poisoned lock is
    /// recovered rather than propagated.
    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn enter(&self) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("storage offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl BookmarkStore for MemoryBookmarkStore {
    async fn list_all(&self) -> Result<Vec<Bookmark>, StoreError> {
        self.enter()?;
        Ok(self.lock().rows.clone())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Bookmark>, StoreError> {
        self.enter()?;
        Ok(self.lock().rows.iter().find(|b| b.id == id).cloned())
    }

    async fn create(&self, bookmark: NewBookmark) -> Result<Bookmark, StoreError> {
        self.enter()?;
        let mut inner = self.lock();
        inner.last_id += 1;
        let stored = Bookmark {
            id: inner.last_id,
            title: bookmark.title,
            url: bookmark.url,
            description: bookmark.description,
            rating: bookmark.rating,
        };
        inner.rows.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: i64, patch: BookmarkPatch) -> Result<u64, StoreError> {
        self.enter()?;
        let mut inner = self.lock();
        match inner.rows.iter_mut().find(|b| b.id == id) {
            Some(row) => {
                if let Some(title) = patch.title {
                    row.title = title;
                }
                if let Some(url) = patch.url {
                    row.url = url;
                }
                if let Some(description) = patch.description {
                    row.description = description;
                }
                if let Some(rating) = patch.rating {
                    row.rating = rating;
                }
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i64) -> Result<u64, StoreError> {
        self.enter()?;
        let mut inner = self.lock();
        let before = inner.rows.len();
        inner.rows.retain(|b| b.id != id);
        Ok((before - inner.rows.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_bookmark(title: &str) -> NewBookmark {
        NewBookmark {
            title: title.to_string(),
            url: "https://example.com".to_string(),
            description: String::new(),
            rating: 3.0,
        }
    }

    #[tokio::test]
    async fn assigns_increasing_ids() {
        let store = MemoryBookmarkStore::new();
        let first = store.create(new_bookmark("one")).await.unwrap();
        let second = store.create(new_bookmark("two")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn ids_are_never_reused() {
        let store = MemoryBookmarkStore::new();
        let first = store.create(new_bookmark("one")).await.unwrap();
        assert_eq!(store.delete(first.id).await.unwrap(), 1);
        let second = store.create(new_bookmark("two")).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn update_reports_missing_rows() {
        let store = MemoryBookmarkStore::new();
        let patch = BookmarkPatch {
            title: Some("changed".to_string()),
            ..Default::default()
        };
        assert_eq!(store.update(42, patch).await.unwrap(), 0);
    }

    #[test]
    fn lock_recovers_after_poisoning() {
        let store = MemoryBookmarkStore::new();
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = store.inner.lock().unwrap();
            panic!("poison the lock");
        }));
        assert!(store.inner.is_poisoned());
        assert!(store.snapshot().is_empty());
    }

    #[tokio::test]
    async fn failure_injection() {
        let store = MemoryBookmarkStore::new();
        store.fail_storage(true);
        assert!(matches!(
            store.list_all().await,
            Err(StoreError::Unavailable(_))
        ));
        assert_eq!(store.call_count(), 1);
    }
}
