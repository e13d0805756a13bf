/**
 * Backend Error Types
 *
 * This module defines error types specific to the backend server.
 * These errors are used in HTTP handlers and can be converted to HTTP responses.
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Raised by handlers and the policy layer:
 * - Missing or invalid credentials (401)
 * - Policy denials (403)
 * - Unknown users, communities, posts (404)
 *
 * ## Store Errors
 *
 * - `NotFound` maps to 404
 * - `Conflict` (duplicate username, email or community name) maps to 409
 * - Database failures map to 500 and are never echoed to the client
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::store::StoreError;
use crate::shared::validation::capitalize;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// Each variant includes relevant context and can be converted to an HTTP response.
///
/// # Usage
///
/// ```rust
/// use townsquare::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid request");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
///
/// let err = BackendError::forbidden("Only moderators can ban users");
/// assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g., missing headers, invalid request)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Storage layer error
    #[error(transparent)]
    StoreError(#[from] StoreError),

    /// Shared error (from shared module)
    ///
    /// Wraps validation and serialization errors from the shared module.
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// JWT error
    #[error("Token error: {0}")]
    TokenError(#[from] jsonwebtoken::errors::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl BackendError {
    /// Create a new handler error with a status code
    ///
    /// # Arguments
    ///
    /// * `status` - HTTP status code
    /// * `message` - Error message
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::CONFLICT, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `StoreError` - 404 / 409 / 500 by kind
    /// - `SharedError` - 400 for validation errors, 500 otherwise
    /// - `TokenError` - 401 Unauthorized
    /// - `SerializationError` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::StoreError(err) => match err {
                StoreError::NotFound => StatusCode::NOT_FOUND,
                StoreError::Conflict(_) => StatusCode::CONFLICT,
                StoreError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::SharedError(err) => match err {
                SharedError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            },
            Self::TokenError(_) => StatusCode::UNAUTHORIZED,
            Self::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing error message
    ///
    /// Internal errors answer with a generic message; the detail is logged
    /// when the response is built.
    pub fn message(&self) -> String {
        if self.status_code() == StatusCode::INTERNAL_SERVER_ERROR {
            return "Internal server error".to_string();
        }
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::StoreError(StoreError::Conflict(field)) => format!("{} already exists", capitalize(field)),
            Self::StoreError(err) => err.to_string(),
            Self::SharedError(SharedError::ValidationError { message, .. }) => message.clone(),
            Self::SharedError(err) => err.to_string(),
            Self::TokenError(_) => "Invalid or expired token".to_string(),
            Self::SerializationError(err) => err.to_string(),
        }
    }
}
