//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the server and its clients. These types travel as JSON over the REST API
//! and the chat WebSocket.
//!
//! # Overview
//!
//! The shared module provides platform-agnostic types that can be used
//! in both server and client code:
//!
//! - **`forum`** - Request/response DTOs and chat frames
//! - **`pagination`** - Page requests and paged responses
//! - **`validation`** - Input rules for usernames, titles, bodies, etc.
//! - **`error`** - Shared error type

/// Shared error types
pub mod error;

/// Input validation rules
pub mod validation;

/// Paging types
pub mod pagination;

/// Forum and chat DTOs
pub mod forum;

/// Re-export commonly used types for convenience
pub use error::SharedError;
pub use pagination::{Page, PageParams, PageRequest};
