//! Chat Data Structures
//!
//! Direct messages between two users, plus the JSON frames exchanged on the
//! chat WebSocket. Frames are internally tagged on `"type"`:
//!
//! ```json
//! {"type": "send", "to": "bob", "content": "hi"}
//! {"type": "message", "id": "...", "from": "alice", "to": "bob", ...}
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored direct message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessageResponse {
    pub id: Uuid,
    pub from: String,
    pub to: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// `POST /api/chats/{username}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendChatRequest {
    pub content: String,
}

/// One entry of `GET /api/chats`: the latest message with each partner
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatSummary {
    pub partner: String,
    pub last_message: ChatMessageResponse,
    /// Whether the partner currently has a chat session open
    pub online: bool,
}

/// Frames sent by a client over the chat WebSocket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientFrame {
    /// Send a direct message to `to` (a username)
    Send { to: String, content: String },
    /// Liveness check, answered with `Pong`
    Ping,
}

/// Frames sent by the server over the chat WebSocket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerFrame {
    /// First frame after a successful handshake
    Welcome { username: String },
    /// A direct message addressed to or sent by this user
    Message(ChatMessageResponse),
    Pong,
    /// A client frame could not be processed; only sent to the offending session
    Error { message: String },
}

impl ServerFrame {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}
