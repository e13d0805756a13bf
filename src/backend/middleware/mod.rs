//! Middleware Module
//!
//! Request processing that runs before handlers.
//!
//! - **`auth`** - `AuthUser` / `MaybeAuthUser` extractors and bearer-token parsing
//!
//! Request tracing (`tower_http::trace::TraceLayer`) and CORS are applied in
//! `routes::router`.

pub mod auth;

pub use auth::{authenticate, bearer_token, AuthUser, MaybeAuthUser};
