/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container for the
 * application, holding:
 * - The storage backend (`Arc<dyn ForumStore>`)
 * - The loaded configuration
 * - JWT signing keys
 * - The chat hub
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow Axum handlers to extract specific
 * parts of the state without needing the entire `AppState`.
 *
 * # Example
 *
 * ```rust
 * use std::sync::Arc;
 * use axum::extract::State;
 * use townsquare::backend::store::ForumStore;
 *
 * async fn handler(State(store): State<Arc<dyn ForumStore>>) -> &'static str {
 *     store.backend_name()
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::sessions::TokenKeys;
use crate::backend::chat::ChatHub;
use crate::backend::server::config::ServerConfig;
use crate::backend::store::ForumStore;

/// Application state shared by every handler
///
/// # Fields
///
/// * `store` - Persistence backend (PostgreSQL or in-memory)
/// * `config` - Server configuration
/// * `tokens` - JWT keys derived from `auth.jwt_secret`
/// * `chat` - Per-user chat broadcast channels
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ForumStore>,
    pub config: Arc<ServerConfig>,
    pub tokens: TokenKeys,
    pub chat: ChatHub,
}

impl AppState {
    pub fn new(config: ServerConfig, store: Arc<dyn ForumStore>) -> Self {
        let tokens = TokenKeys::new(&config.auth.jwt_secret, config.auth.token_ttl_hours);
        let chat = ChatHub::new(config.chat.channel_capacity);
        Self {
            store,
            config: Arc::new(config),
            tokens,
            chat,
        }
    }
}

impl FromRef<AppState> for Arc<dyn ForumStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}

impl FromRef<AppState> for TokenKeys {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

/// Implement FromRef for ChatHub
///
/// This allows Axum handlers to extract the chat hub directly
/// from `AppState` using `State(ChatHub)`.
impl FromRef<AppState> for ChatHub {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.chat.clone()
    }
}
