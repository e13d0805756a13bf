/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including state creation, storage selection, and route configuration.
 *
 * # Initialization Process
 *
 * 1. Validate configuration
 * 2. Select the storage backend (PostgreSQL or in-memory)
 * 3. Build `AppState` (JWT keys, chat hub)
 * 4. Start the periodic chat channel cleanup task
 * 5. Create and configure the router
 */

use std::sync::Arc;
use std::time::Duration;

use axum::Router;

use crate::backend::chat::ChatHub;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_store, ConfigError, ServerConfig};
use crate::backend::server::state::AppState;
use crate::backend::store::ForumStore;

/// Create and configure the Axum application
///
/// # Error Handling
///
/// Only an invalid configuration is an error. A missing or unreachable
/// database falls back to the in-memory store, and migration failures are
/// logged without preventing startup.
pub async fn create_app(config: ServerConfig) -> Result<Router<()>, ConfigError> {
    tracing::info!("Initializing Townsquare backend server");
    config.validate()?;

    let store = load_store(&config).await;
    create_app_with_store(config, store)
}

/// Same as [`create_app`] with an already constructed store
///
/// Used by tests to run the full router on a `MemoryStore`.
pub fn create_app_with_store(
    config: ServerConfig,
    store: Arc<dyn ForumStore>,
) -> Result<Router<()>, ConfigError> {
    config.validate()?;
    tracing::info!("Using {} store", store.backend_name());

    let cleanup_every = Duration::from_secs(config.chat.cleanup_interval_secs.max(1));
    let app_state = AppState::new(config, store);

    let app = create_router(app_state.clone());

    spawn_channel_cleanup(app_state.chat.clone(), cleanup_every);
    tracing::info!("Router configured with periodic cleanup task");

    Ok(app)
}

/// Periodically drop chat channels whose sessions have all closed
fn spawn_channel_cleanup(hub: ChatHub, every: Duration) {
    // Outside a runtime (e.g. a plain #[test]) there is nothing to schedule on.
    let Ok(handle) = tokio::runtime::Handle::try_current() else {
        tracing::debug!("No Tokio runtime; chat channel cleanup not started");
        return;
    };

    handle.spawn(async move {
        let mut interval = tokio::time::interval(every);
        // The first tick completes immediately.
        interval.tick().await;
        loop {
            interval.tick().await;
            let removed = hub.cleanup_inactive_channels();
            tracing::debug!("Cleaned up {} inactive chat channel(s)", removed);
        }
    });
}
