// HTTP API error types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::config::Environment;

/// Uniform error responses for the request pipeline. Every failure a handler can
/// hit maps onto one of these; `IntoResponse` is the single place the wire shape
/// of each is decided.
#[derive(Debug)]
pub enum ApiError {
    /// 401 - missing, malformed or incorrect bearer credential.
    Unauthorized,

    /// 400 - creation payload violated the required-field or rating-range rules.
    InvalidData,

    /// 400 - update payload carried no usable field.
    BadRequest,

    /// 404 - no row for the requested id.
    NotFound,

    /// 500 - anything unexpected, typically a storage failure. `expose` decides
    /// whether the detail reaches the client or is replaced by a generic body.
    Internal { detail: String, expose: bool },
}

impl ApiError {
    /// Normalize an unexpected failure. The detail is always logged; it only
    /// appears in the response outside of production.
    pub fn internal(detail: impl std::fmt::Display, environment: Environment) -> Self {
        let detail = detail.to_string();
        tracing::error!("unhandled failure: {detail}");
        ApiError::Internal {
            detail,
            expose: !environment.is_production(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::InvalidData | ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Unauthorized => write!(f, "Unauthorized request!"),
            ApiError::InvalidData => write!(f, "Invalid data"),
            ApiError::BadRequest => write!(f, "Bad Request"),
            ApiError::NotFound => write!(f, "404 Not Found"),
            ApiError::Internal { detail, .. } => write!(f, "{detail}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        match self {
            ApiError::Unauthorized => {
                (status, Json(json!({ "error": "Unauthorized request!" }))).into_response()
            }
            ApiError::InvalidData => (status, "Invalid data").into_response(),
            ApiError::BadRequest => (status, "Bad Request").into_response(),
            ApiError::NotFound => (status, "404 Not Found").into_response(),
            ApiError::Internal { detail, expose } => {
                let message = if expose { detail } else { "server error!".to_string() };
                (status, Json(json!({ "error": { "message": message } }))).into_response()
            }
        }
    }
}
