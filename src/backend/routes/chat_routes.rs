/**
 * Chat Route Handlers
 *
 * - `GET /api/chats` - Conversation partners with the latest message
 * - `GET /api/chats/{username}` - Paged history with one user
 * - `POST /api/chats/{username}` - Send a message without a WebSocket
 * - `GET /ws/chat` - WebSocket session (token in `?token=`)
 */

use axum::{
    routing::get,
    Router,
};

use crate::backend::chat::{chat_socket, get_conversation, list_chats, post_message};
use crate::backend::server::state::AppState;

pub fn configure_chat_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/chats", get(list_chats))
        .route(
            "/api/chats/{username}",
            get(get_conversation).post(post_message),
        )
        .route("/ws/chat", get(chat_socket))
}
