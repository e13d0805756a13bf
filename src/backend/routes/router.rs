/**
 * Router Configuration
 *
 * Combines all route groups into a single Axum router and adds the
 * cross-cutting layers.
 *
 * # Layers
 *
 * - `TraceLayer` - One tracing span per request
 * - `CorsLayer` - Permissive CORS so browser clients on another origin can
 *   call the API
 *
 * Unknown paths answer with the same JSON error body as every handler.
 */

use axum::{http::StatusCode, response::Json, routing::get, Router};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::chat_routes::configure_chat_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Store, config, JWT keys and chat hub
///
/// # Returns
///
/// Router with its state applied, ready for `axum::serve`
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new().route("/health", get(health));

    let router = configure_api_routes(router);
    let router = configure_chat_routes(router);

    router
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(app_state)
}

/// GET /health
async fn health(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "store": state.store.backend_name(),
        })),
    )
}

async fn not_found() -> BackendError {
    BackendError::not_found("Route not found")
}
