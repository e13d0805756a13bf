//! Townsquare - Main Library
//!
//! Townsquare is a forum and social-networking backend built with Rust.
//! Users join communities, write posts and replies, follow each other and
//! exchange direct messages over WebSocket. Community admins and moderators
//! keep order through bans.
//!
//! # Module Structure
//!
//! The library is organized into two main modules:
//!
//! - **`shared`** - Types shared between server and clients
//!   - Request/response DTOs and WebSocket frames
//!   - Input validation and pagination
//!   - Error types
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server and routes
//!   - Authentication (JWT + bcrypt) and authorization policy
//!   - Storage layer (PostgreSQL via sqlx, or in-memory)
//!   - Direct-message chat hub
//!
//! # Feature Flags
//!
//! - **`ssr`** - Server build (enabled by default)
//!
//! # Usage
//!
//! ```rust,no_run
//! use townsquare::backend::server::{config::ServerConfig, init::create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::load()?;
//! let app = create_app(config).await?;
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! All server state is shared through `Arc`. The store is an
//! `Arc<dyn ForumStore>` and the chat hub clones cheaply.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
