/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /api/auth/login.
 *
 * # Authentication Process
 *
 * 1. Look up user by username, or by email when the identifier contains `@`
 * 2. Verify password using bcrypt
 * 3. Generate JWT token
 * 4. Return token and profile
 *
 * # Security
 *
 * - Unknown users and wrong passwords get the same 401 response
 * - Passwords are never logged or returned in responses
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::passwords::verify_password;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::backend::users::profile::user_profile;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - If user is not found or password is incorrect
/// * `500 Internal Server Error` - If the store or token generation fails
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    let identifier = request.username.trim();
    tracing::info!("Login request for: {}", identifier);

    let user = if identifier.contains('@') {
        state.store.user_by_email(&identifier.to_lowercase()).await?
    } else {
        state.store.user_by_username(identifier).await?
    };

    let user = user.ok_or_else(|| {
        tracing::warn!("User not found: {}", identifier);
        BackendError::unauthorized(INVALID_CREDENTIALS)
    })?;

    let valid = verify_password(&request.password, &user.password_hash).map_err(|e| {
        tracing::error!("Password verification error: {:?}", e);
        BackendError::internal("Password verification failed")
    })?;

    if !valid {
        tracing::warn!("Invalid password for user: {}", user.username);
        return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = state.tokens.create_token(user.id, &user.username).map_err(|e| {
        tracing::error!("Failed to create token: {:?}", e);
        BackendError::internal("Failed to create token")
    })?;

    tracing::info!("User logged in successfully: {}", user.username);

    let profile = user_profile(state.store.as_ref(), &user, true).await?;
    Ok(Json(AuthResponse { token, user: profile }))
}
