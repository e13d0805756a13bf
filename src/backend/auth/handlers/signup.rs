/**
 * Signup Handler
 *
 * This module implements the user registration handler for POST /api/auth/signup.
 *
 * # Registration Process
 *
 * 1. Validate username, email and password
 * 2. Check that username and email are free
 * 3. Hash password using bcrypt
 * 4. Create user (site admin if listed in `auth.site_admins`)
 * 5. Generate JWT token
 * 6. Return token and profile
 */

use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::handlers::types::{AuthResponse, SignupRequest};
use crate::backend::auth::passwords::hash_password;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::backend::store::NewUser;
use crate::backend::users::profile::user_profile;
use crate::shared::validation::{validate_email, validate_password, validate_username};

/// Sign up handler
///
/// # Errors
///
/// * `400 Bad Request` - If username, email or password is invalid
/// * `409 Conflict` - If the username or email is already registered
/// * `500 Internal Server Error` - If password hashing or token generation fails
///
/// # Example Request
///
/// ```http
/// POST /api/auth/signup HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "password": "securepassword123"
/// }
/// ```
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), BackendError> {
    tracing::info!("Signup request for username: {}", request.username);

    let username = validate_username(request.username.trim())?.to_string();
    let email = validate_email(request.email.trim())?.to_lowercase();
    validate_password(&request.password)?;

    if state.store.user_by_username(&username).await?.is_some() {
        tracing::warn!("Username already exists: {}", username);
        return Err(BackendError::conflict("Username already taken"));
    }
    if state.store.user_by_email(&email).await?.is_some() {
        tracing::warn!("Email already exists: {}", email);
        return Err(BackendError::conflict("Email already registered"));
    }

    let password_hash = hash_password(&request.password, state.config.auth.bcrypt_cost).map_err(|e| {
        tracing::error!("Failed to hash password: {:?}", e);
        BackendError::internal("Failed to hash password")
    })?;

    let is_admin = state.config.is_site_admin(&username);
    let user = state
        .store
        .create_user(NewUser {
            username,
            email,
            password_hash,
            is_admin,
        })
        .await?;

    let token = state.tokens.create_token(user.id, &user.username).map_err(|e| {
        tracing::error!("Failed to create token: {:?}", e);
        BackendError::internal("Failed to create token")
    })?;

    tracing::info!(
        "User created successfully: {}{}",
        user.username,
        if user.is_admin { " (site admin)" } else { "" }
    );

    let profile = user_profile(state.store.as_ref(), &user, true).await?;
    Ok((StatusCode::CREATED, Json(AuthResponse { token, user: profile })))
}
