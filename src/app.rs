//! Application state and router composition.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue},
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::database::{BookmarkStore, StoreError};
use crate::error::ApiError;
use crate::handlers::bookmarks::{self, BOOKMARKS_PATH};
use crate::middleware::require_bearer;

/// Shared request context: the startup configuration and the one store handle.
/// Handlers hold no other state across requests.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn BookmarkStore>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn BookmarkStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    /// Convergence point for unexpected storage failures: logs the detail and
    /// decides, from the deployment mode, whether the client may see it.
    pub fn storage_failure(&self, err: StoreError) -> ApiError {
        ApiError::internal(err, self.config.environment)
    }
}

/// Build the router. Layer order matters: the bearer gate wraps every route,
/// and the item routes additionally carry the resolve-then-dispatch lookup.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route(
            BOOKMARKS_PATH,
            get(bookmarks::bookmark_list).post(bookmarks::bookmark_create),
        )
        .route(
            &format!("{BOOKMARKS_PATH}/:id"),
            get(bookmarks::bookmark_get)
                .delete(bookmarks::bookmark_delete)
                .patch(bookmarks::bookmark_patch)
                .layer(from_fn_with_state(state.clone(), bookmarks::resolve_bookmark)),
        )
        .layer(from_fn_with_state(state.clone(), require_bearer))
        .layer(CorsLayer::permissive())
        // Baseline security headers on every response, 401s included.
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_XSS_PROTECTION,
            HeaderValue::from_static("0"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> &'static str {
    "Hello, world!"
}
