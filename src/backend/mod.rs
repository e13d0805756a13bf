//! Backend Module
//!
//! This module contains all server-side code for Townsquare: an Axum HTTP
//! server exposing a JSON REST API and a chat WebSocket, backed by
//! PostgreSQL or an in-memory store.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - Route configuration and router assembly
//! - **`error`** - `BackendError` and its JSON response
//! - **`auth`** - Signup, login, JWT sessions, password hashing
//! - **`middleware`** - `AuthUser` / `MaybeAuthUser` extractors
//! - **`policy`** - Every authorization rule
//! - **`store`** - Repository traits with PostgreSQL and memory backends
//! - **`users`** - Profiles, follows, feed, account management
//! - **`communities`** - Communities, membership, moderators, bans
//! - **`posts`** - Posts and replies
//! - **`chat`** - Direct messages over REST and WebSocket
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Config, state, init
//! ├── routes/         - Route configuration
//! ├── error/          - Error types
//! ├── auth/           - Authentication
//! ├── middleware/     - Request extractors
//! ├── policy.rs       - Authorization
//! ├── store/          - Persistence
//! ├── users/          - User handlers
//! ├── communities/    - Community handlers
//! ├── posts/          - Post and reply handlers
//! └── chat/           - Chat hub, service, socket, handlers
//! ```
//!
//! # State Management
//!
//! Handlers share an `AppState` holding the store (`Arc<dyn ForumStore>`),
//! the configuration, the JWT keys and the chat hub. `FromRef` lets a
//! handler extract just the part it needs.

/// Server initialization, state, configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication
pub mod auth;

/// Request extractors
pub mod middleware;

/// Authorization rules
pub mod policy;

/// Persistence
pub mod store;

/// User handlers
pub mod users;

/// Community handlers
pub mod communities;

/// Post and reply handlers
pub mod posts;

/// Direct-message chat
pub mod chat;

pub use error::BackendError;
pub use server::{create_app, AppState, ServerConfig};
