//! Chat Backend Module
//!
//! Direct messages between users. Messages are persisted through the store
//! and pushed live to every open chat WebSocket of both participants.
//!
//! # Architecture
//!
//! - **`hub`** - Per-user broadcast channels (`ChatHub`)
//! - **`service`** - Validate, store and deliver one message; shared by the
//!   REST endpoint and the WebSocket
//! - **`socket`** - `GET /ws/chat` WebSocket session
//! - **`handlers`** - REST endpoints for conversations and history
//!
//! # Example
//!
//! ```rust
//! use townsquare::backend::chat::ChatHub;
//! use townsquare::shared::forum::ServerFrame;
//! use uuid::Uuid;
//!
//! let hub = ChatHub::new(16);
//! let user = Uuid::new_v4();
//! let _rx = hub.subscribe(user);
//! assert_eq!(hub.deliver(user, ServerFrame::Pong), 1);
//! ```

/// Per-user broadcast channels
pub mod hub;

/// Message sending shared by REST and WebSocket
pub mod service;

/// WebSocket session handler
pub mod socket;

/// REST handlers
pub mod handlers;

pub use handlers::{get_conversation, list_chats, post_message};
pub use hub::ChatHub;
pub use service::send_direct_message;
pub use socket::chat_socket;
