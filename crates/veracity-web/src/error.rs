//! Error types for the HTTP surface.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use veracity_facts::FactError;
use veracity_store::StoreError;

/// Errors that can occur while serving a request.
#[derive(Debug, Error)]
pub enum WebError {
    /// Fact pipeline error.
    #[error(transparent)]
    Fact(#[from] FactError),

    /// Store error.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Request carried no usable `Authorization: Bearer` header.
    #[error("missing bearer token")]
    MissingToken,
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            WebError::Fact(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            WebError::Store(StoreError::DuplicateUsername) => (
                StatusCode::CONFLICT,
                "username already taken, please choose another".to_string(),
            ),
            WebError::Store(StoreError::Validation(m)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, m.clone())
            }
            WebError::Store(StoreError::Unauthorized(_)) => (
                StatusCode::UNAUTHORIZED,
                "invalid or expired session".to_string(),
            ),
            WebError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            WebError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "missing bearer token".to_string(),
            ),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
