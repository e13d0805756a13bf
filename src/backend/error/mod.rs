//! Backend Error Module
//!
//! This module defines error types specific to the backend server.
//! These errors are used in HTTP handlers and can be converted to HTTP responses.
//!
//! # Architecture
//!
//! The error module is organized into focused submodules:
//!
//! - **`types`** - Error type definitions and constructors
//! - **`conversion`** - Error conversion implementations (IntoResponse, From impls)
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - Error conversion implementations
//! ```
//!
//! # Error Types
//!
//! - `HandlerError` - Errors raised directly by handlers, with a status code
//! - `StoreError` - Errors from the storage layer
//! - `SharedError` - Validation and encoding errors from the shared module
//! - `TokenError` - JWT encoding or verification failures
//! - `SerializationError` - JSON serialization errors
//!
//! # HTTP Response Conversion
//!
//! All backend errors implement `IntoResponse` from Axum, allowing them to be
//! returned directly from handlers. The error is converted to an appropriate
//! HTTP status code and JSON response body.
//!
//! # Example
//!
//! ```rust,no_run
//! use townsquare::backend::error::BackendError;
//!
//! async fn handler() -> Result<String, BackendError> {
//!     Err(BackendError::not_found("Community not found"))
//! }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
