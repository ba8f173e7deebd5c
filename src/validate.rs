//! Typed request bodies and the validation rules applied before any store call.

use serde::Deserialize;
use thiserror::Error;

use crate::error::ApiError;
use crate::models::{BookmarkPatch, NewBookmark};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Creation payload missing a required field or with an out-of-range rating.
    #[error("Data must contain title, url and rating that falls in range 0 - 5")]
    InvalidData,

    /// Update payload with no usable field.
    #[error("update payload carries no recognized field")]
    EmptyUpdate,
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidData => ApiError::InvalidData,
            ValidationError::EmptyUpdate => ApiError::BadRequest,
        }
    }
}

/// Rating as received on the wire: clients send either a JSON number or a
/// numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RatingField {
    Number(f64),
    Text(String),
}

impl RatingField {
    fn parse(&self) -> Option<f64> {
        match self {
            RatingField::Number(n) => Some(*n),
            RatingField::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// POST body. Unrecognized fields are silently ignored by deserialization.
#[derive(Debug, Default, Deserialize)]
pub struct CreateBookmarkBody {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rating: Option<RatingField>,
}

/// PATCH body. Any subset of the four recognized fields.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBookmarkBody {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rating: Option<RatingField>,
}

/// Creation rules: title and url non-empty, rating present and within `[0, 5]`
/// inclusive. Description is optional and defaults to empty.
pub fn validate_create(body: CreateBookmarkBody) -> Result<NewBookmark, ValidationError> {
    let title = body.title.filter(|t| !t.is_empty()).ok_or(ValidationError::InvalidData)?;
    let url = body.url.filter(|u| !u.is_empty()).ok_or(ValidationError::InvalidData)?;
    let rating = body
        .rating
        .and_then(|r| r.parse())
        .filter(|r| (0.0..=5.0).contains(r))
        .ok_or(ValidationError::InvalidData)?;

    Ok(NewBookmark {
        title,
        url,
        description: body.description.unwrap_or_default(),
        rating,
    })
}

/// Update rules: at least one recognized field must carry a usable value
/// (non-empty string, or a rating that parses to a non-zero number). Fields that
/// are present but empty still enter the patch once that bar is met, matching
/// the historical behavior. Note the asymmetry with creation: no range check is
/// applied to `rating` here.
pub fn validate_update(body: UpdateBookmarkBody) -> Result<BookmarkPatch, ValidationError> {
    let rating = body.rating.as_ref().and_then(RatingField::parse);

    let has_value = body.title.as_deref().is_some_and(|t| !t.is_empty())
        || body.url.as_deref().is_some_and(|u| !u.is_empty())
        || body.description.as_deref().is_some_and(|d| !d.is_empty())
        || rating.is_some_and(|r| r != 0.0);

    if !has_value {
        return Err(ValidationError::EmptyUpdate);
    }

    Ok(BookmarkPatch {
        title: body.title,
        url: body.url,
        description: body.description,
        rating,
    })
}
