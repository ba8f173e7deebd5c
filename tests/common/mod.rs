use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use bookmarks_api::app::{app, AppState};
use bookmarks_api::config::{AppConfig, Environment};
use bookmarks_api::database::MemoryBookmarkStore;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const TOKEN: &str = "test-api-token";

pub fn test_config(environment: Environment) -> AppConfig {
    AppConfig {
        environment,
        api_token: TOKEN.to_string(),
        database_url: "postgres://unused".to_string(),
        port: 0,
        max_connections: 1,
    }
}

/// Router wired to a fresh in-memory store, development mode.
pub fn test_app() -> (Router, Arc<MemoryBookmarkStore>) {
    test_app_in(Environment::Development)
}

pub fn test_app_in(environment: Environment) -> (Router, Arc<MemoryBookmarkStore>) {
    let store = Arc::new(MemoryBookmarkStore::new());
    let state = AppState::new(test_config(environment), store.clone());
    (app(state), store)
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Authenticated request with the test token.
pub fn authed(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    request(method, uri, Some(TOKEN), body)
}

pub async fn send(app: &Router, req: Request<Body>) -> Response<axum::body::Body> {
    app.clone().oneshot(req).await.unwrap()
}

pub async fn body_text(response: Response<axum::body::Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<axum::body::Body>) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}
