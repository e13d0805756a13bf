/**
 * Get Current User Handler
 *
 * GET /api/auth/me returns the caller's own profile, including the email
 * address. Requires a valid JWT in the `Authorization` header.
 */

use std::sync::Arc;

use axum::{extract::State, response::Json};

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::store::ForumStore;
use crate::backend::users::profile::user_profile;
use crate::shared::forum::UserProfile;

/// Get current user handler
///
/// # Errors
///
/// * `401 Unauthorized` - If the token is missing, invalid, or its user is gone
pub async fn get_me(
    State(store): State<Arc<dyn ForumStore>>,
    AuthUser(user): AuthUser,
) -> Result<Json<UserProfile>, BackendError> {
    Ok(Json(user_profile(store.as_ref(), &user, true).await?))
}
