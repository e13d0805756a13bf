//! Integration tests
//!
//! - **`api`** - REST endpoints through the full router
//! - **`realtime`** - Chat WebSocket sessions
//! - **`database`** - PostgreSQL store (ignored unless `DATABASE_URL` is set)

pub mod api;
pub mod database;
pub mod realtime;
