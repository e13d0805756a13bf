//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//! Routes are organized by functionality into focused submodules.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation, layers, fallback
//! ├── api_routes.rs   - REST endpoints under /api
//! └── chat_routes.rs  - Chat REST endpoints and the WebSocket
//! ```
//!
//! # Route Types
//!
//! ## Auth and Users
//!
//! - `POST /api/auth/signup`, `POST /api/auth/login`, `GET /api/auth/me`
//! - `GET /api/users`, `GET /api/users/{username}`
//! - `PATCH|DELETE /api/users/me`, `DELETE /api/users/{username}`
//! - `PUT /api/users/{username}/admin`
//! - `POST|DELETE /api/users/{username}/follow`
//! - `GET /api/users/{username}/followers|following|posts`
//! - `GET /api/feed`
//!
//! ## Communities
//!
//! - `GET|POST /api/communities`
//! - `GET|PATCH|DELETE /api/communities/{name}`
//! - `POST|DELETE /api/communities/{name}/join`
//! - `GET /api/communities/{name}/members`
//! - `PUT|DELETE /api/communities/{name}/moderators/{username}`
//! - `GET|POST /api/communities/{name}/bans`, `DELETE .../bans/{username}`
//!
//! ## Posts and Replies
//!
//! - `GET|POST /api/communities/{name}/posts`
//! - `GET|PATCH|DELETE /api/posts/{id}`
//! - `GET|POST /api/posts/{id}/replies`
//! - `PATCH|DELETE /api/replies/{id}`
//!
//! ## Chat
//!
//! - `GET /api/chats`, `GET|POST /api/chats/{username}`
//! - `GET /ws/chat` - WebSocket

/// Main router creation
pub mod router;

/// REST endpoints
pub mod api_routes;

/// Chat endpoints
pub mod chat_routes;

pub use router::create_router;
