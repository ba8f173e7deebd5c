use serde::Serialize;
use sqlx::FromRow;

/// A persisted bookmark. `id` is assigned by the store on creation and never
/// changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Bookmark {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub description: String,
    pub rating: f64,
}

/// A validated creation payload, ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBookmark {
    pub title: String,
    pub url: String,
    pub description: String,
    pub rating: f64,
}

/// Field subset applied by a partial update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookmarkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub rating: Option<f64>,
}

impl BookmarkPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.url.is_none() && self.description.is_none() && self.rating.is_none()
    }
}
