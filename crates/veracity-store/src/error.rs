//! Error types for the store client.

use thiserror::Error;

/// Errors that can occur when interacting with the profile store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store rejected the request.
    #[error("store error ({status}): {message}")]
    Store { status: u16, message: String },

    /// Username uniqueness violation on write.
    #[error("username already taken")]
    DuplicateUsername,

    /// Rejected before any network call.
    #[error("validation error: {0}")]
    Validation(String),

    /// The caller's session token was missing, expired, or invalid.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Response could not be interpreted.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
