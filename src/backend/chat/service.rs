//! Direct message sending
//!
//! Both `POST /api/chats/{username}` and the `send` WebSocket frame end up
//! in [`send_direct_message`], so validation, persistence and live delivery
//! behave identically on either path.

use crate::backend::chat::hub::ChatHub;
use crate::backend::error::BackendError;
use crate::backend::server::config::ServerConfig;
use crate::backend::store::{ForumStore, NewChatMessage, User};
use crate::shared::forum::{ChatMessageResponse, ServerFrame};
use crate::shared::validation::validate_chat_content;

/// Store a message from `sender` to `recipient_username` and push it to the
/// open sessions of both users
///
/// # Errors
///
/// * `400 Bad Request` - Messaging yourself, or empty/oversized content
/// * `404 Not Found` - The recipient does not exist
pub async fn send_direct_message(
    store: &dyn ForumStore,
    hub: &ChatHub,
    config: &ServerConfig,
    sender: &User,
    recipient_username: &str,
    content: &str,
) -> Result<ChatMessageResponse, BackendError> {
    if recipient_username == sender.username {
        return Err(BackendError::bad_request("You cannot message yourself"));
    }
    let content = validate_chat_content(content, config.chat.max_message_length)?;

    let recipient = store
        .user_by_username(recipient_username)
        .await?
        .ok_or_else(|| BackendError::not_found(format!("User '{}' not found", recipient_username)))?;

    let message = store
        .save_message(NewChatMessage {
            sender_id: sender.id,
            recipient_id: recipient.id,
            content: content.to_string(),
        })
        .await?;
    let response = ChatMessageResponse::from(message);

    let delivered = hub.deliver(recipient.id, ServerFrame::Message(response.clone()));
    hub.deliver(sender.id, ServerFrame::Message(response.clone()));
    tracing::debug!(
        "[Chat] {} -> {}: delivered to {} live session(s)",
        sender.username,
        recipient.username,
        delivered
    );

    Ok(response)
}
