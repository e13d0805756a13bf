/**
 * Chat WebSocket
 *
 * `GET /ws/chat?token=<jwt>` upgrades to a WebSocket carrying JSON
 * `ClientFrame`s in and `ServerFrame`s out. Browsers cannot set headers on
 * a WebSocket handshake, so the token travels in the query string; an
 * `Authorization: Bearer` header is accepted as well.
 *
 * # Session Lifecycle
 *
 * 1. The token is verified before the upgrade; a bad token is a plain 401
 * 2. The session subscribes to the user's hub channel
 * 3. A `welcome` frame is sent
 * 4. Client frames are handled until the socket closes
 *
 * Replies meant for this session only (`pong`, `error`) go through a local
 * queue that the writer drains ahead of hub traffic.
 */

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    http::HeaderMap,
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::{broadcast::error::RecvError, mpsc};

use crate::backend::chat::service::send_direct_message;
use crate::backend::error::BackendError;
use crate::backend::middleware::{authenticate, bearer_token};
use crate::backend::server::state::AppState;
use crate::backend::store::User;
use crate::shared::forum::{ClientFrame, ServerFrame};

#[derive(Debug, Default, Deserialize)]
pub struct SocketQuery {
    pub token: Option<String>,
}

/// GET /ws/chat
pub async fn chat_socket(
    State(state): State<AppState>,
    Query(query): Query<SocketQuery>,
    headers: HeaderMap,
    ws: WebSocketUpgrade,
) -> Result<Response, BackendError> {
    let token = query
        .token
        .as_deref()
        .filter(|token| !token.is_empty())
        .or_else(|| bearer_token(&headers))
        .ok_or_else(|| BackendError::unauthorized("Authentication required"))?;
    let user = authenticate(&state, token).await?;

    tracing::info!("[Chat] WebSocket session opening for {}", user.username);
    Ok(ws.on_upgrade(move |socket| run_session(state, user, socket)))
}

async fn run_session(state: AppState, user: User, socket: WebSocket) {
    let (mut sink, mut stream) = socket.split();
    let mut hub_rx = state.chat.subscribe(user.id);
    let (local_tx, mut local_rx) = mpsc::unbounded_channel::<ServerFrame>();

    // Queued before the writer starts, so it is always the first frame.
    let _ = local_tx.send(ServerFrame::Welcome {
        username: user.username.clone(),
    });

    let session_user = user.username.clone();
    let writer = tokio::spawn(async move {
        loop {
            let frame = tokio::select! {
                biased;
                local = local_rx.recv() => match local {
                    Some(frame) => frame,
                    None => break,
                },
                shared = hub_rx.recv() => match shared {
                    Ok(frame) => frame,
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!("[Chat] Session of {} lagged, skipped {} frames", session_user, skipped);
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                },
            };

            let text = match serde_json::to_string(&frame) {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!("[Chat] Failed to serialize frame: {:?}", e);
                    continue;
                }
            };
            if sink.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(incoming) = stream.next().await {
        let message = match incoming {
            Ok(message) => message,
            Err(e) => {
                tracing::debug!("[Chat] WebSocket error for {}: {:?}", user.username, e);
                break;
            }
        };

        let reply = match message {
            Message::Text(text) => handle_frame(&state, &user, text.as_str()).await,
            Message::Binary(_) => Some(ServerFrame::error("Binary frames are not supported")),
            Message::Close(_) => break,
            Message::Ping(_) | Message::Pong(_) => None,
        };

        if let Some(frame) = reply {
            if local_tx.send(frame).is_err() {
                break;
            }
        }
    }

    writer.abort();
    tracing::info!("[Chat] WebSocket session closed for {}", user.username);
}

/// Handle one text frame; returns the reply for this session, if any
async fn handle_frame(state: &AppState, user: &User, text: &str) -> Option<ServerFrame> {
    let frame = match serde_json::from_str::<ClientFrame>(text) {
        Ok(frame) => frame,
        Err(e) => return Some(ServerFrame::error(format!("Invalid frame: {}", e))),
    };

    match frame {
        ClientFrame::Ping => Some(ServerFrame::Pong),
        ClientFrame::Send { to, content } => {
            // On success the hub echoes the message to every session of the sender.
            send_direct_message(
                state.store.as_ref(),
                &state.chat,
                &state.config,
                user,
                &to,
                &content,
            )
            .await
            .err()
            .map(|e| ServerFrame::error(e.message()))
        }
    }
}
