//! Bookmark resource handlers: per-route orchestration of validation, store
//! access and response sanitization.

use axum::{
    extract::{Path, Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Extension, Json,
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::models::Bookmark;
use crate::sanitize::sanitize_bookmark;
use crate::validate::{validate_create, validate_update, CreateBookmarkBody, UpdateBookmarkBody};

pub const BOOKMARKS_PATH: &str = "/api/bookmarks";

/// GET /api/bookmarks - all bookmarks, sanitized, empty array when none.
pub async fn bookmark_list(State(state): State<AppState>) -> Result<Json<Vec<Bookmark>>, ApiError> {
    let bookmarks = state.store.list_all().await.map_err(|e| state.storage_failure(e))?;
    Ok(Json(bookmarks.into_iter().map(sanitize_bookmark).collect()))
}

/// POST /api/bookmarks - validate, insert, respond 201 with a Location header
/// and the sanitized created record.
///
/// An absent or unreadable body is treated as an empty payload so the
/// validator, not the extractor, decides the failure response.
pub async fn bookmark_create(
    State(state): State<AppState>,
    body: Option<Json<CreateBookmarkBody>>,
) -> Result<Response, ApiError> {
    let body = body.map(|Json(b)| b).unwrap_or_default();
    let new_bookmark = validate_create(body).map_err(|e| {
        tracing::error!("{e}");
        ApiError::from(e)
    })?;

    let created = state
        .store
        .create(new_bookmark)
        .await
        .map_err(|e| state.storage_failure(e))?;
    tracing::info!(id = created.id, "new bookmark created");

    let location = format!("{}/{}", BOOKMARKS_PATH, created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(sanitize_bookmark(created)),
    )
        .into_response())
}

/// Shared resolve-then-dispatch step for the item routes: look the id up once,
/// 404 before any verb-specific logic when it is absent, and stash the resolved
/// record in request extensions so GET can reuse it without a second lookup.
pub async fn resolve_bookmark(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let bookmark = state
        .store
        .get_by_id(id)
        .await
        .map_err(|e| state.storage_failure(e))?
        .ok_or_else(|| {
            tracing::error!(id, "bookmark not found");
            ApiError::NotFound
        })?;

    request.extensions_mut().insert(bookmark);
    Ok(next.run(request).await)
}

/// GET /api/bookmarks/:id - the record resolved by `resolve_bookmark`, sanitized.
pub async fn bookmark_get(Extension(bookmark): Extension<Bookmark>) -> Json<Bookmark> {
    Json(sanitize_bookmark(bookmark))
}

/// DELETE /api/bookmarks/:id - remove and respond 204.
pub async fn bookmark_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.store.delete(id).await.map_err(|e| state.storage_failure(e))?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/bookmarks/:id - apply a validated field subset and respond 204.
/// An absent body validates like an empty payload.
pub async fn bookmark_patch(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Option<Json<UpdateBookmarkBody>>,
) -> Result<StatusCode, ApiError> {
    let patch = validate_update(body.map(|Json(b)| b).unwrap_or_default())?;
    state
        .store
        .update(id, patch)
        .await
        .map_err(|e| state.storage_failure(e))?;
    Ok(StatusCode::NO_CONTENT)
}
