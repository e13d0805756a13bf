//! Chat REST Handlers
//!
//! Conversation list, message history and sending without a WebSocket.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::chat::service::send_direct_message;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::backend::users::find_user;
use crate::shared::forum::{ChatMessageResponse, ChatSummary, SendChatRequest};
use crate::shared::{Page, PageRequest};

/// GET /api/chats
///
/// One entry per conversation partner, most recent conversation first.
pub async fn list_chats(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<ChatSummary>>, BackendError> {
    let summaries = state.store.recent_chats(user.id).await?;
    Ok(Json(
        summaries
            .into_iter()
            .map(|summary| ChatSummary {
                online: state.chat.online(summary.partner_id),
                partner: summary.partner_username,
                last_message: summary.last_message.into(),
            })
            .collect(),
    ))
}

/// GET /api/chats/{username}
///
/// Messages exchanged with `username`, newest first.
pub async fn get_conversation(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(username): Path<String>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Page<ChatMessageResponse>>, BackendError> {
    let partner = find_user(state.store.as_ref(), &username).await?;
    let params = state.config.pagination.resolve(&page);
    let messages = state.store.conversation(user.id, partner.id, params).await?;
    Ok(Json(messages.map(ChatMessageResponse::from)))
}

/// POST /api/chats/{username}
pub async fn post_message(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(username): Path<String>,
    Json(request): Json<SendChatRequest>,
) -> Result<(StatusCode, Json<ChatMessageResponse>), BackendError> {
    let message = send_direct_message(
        state.store.as_ref(),
        &state.chat,
        &state.config,
        &user,
        &username,
        &request.content,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(message)))
}
