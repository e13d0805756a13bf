//! Moderator roster management
//!
//! Only the community admin (or a site admin) appoints and removes
//! moderators. A moderator must be a member; leaving or being banned drops
//! the role.

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::backend::communities::lookup::{community_access, community_response, find_community};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::policy;
use crate::backend::server::state::AppState;
use crate::backend::store::{Community, User};
use crate::backend::users::find_user;
use crate::shared::forum::CommunityResponse;

/// Resolve the community and the member the admin is acting on
async fn roster_target(
    state: &AppState,
    auth: &AuthUser,
    name: &str,
    username: &str,
) -> Result<(Community, User), BackendError> {
    let store = state.store.as_ref();
    let community = find_community(store, name).await?;
    let access = community_access(store, auth.0.id, &community).await?;
    policy::manage_community(&auth.actor(), &access)?;

    let target = find_user(store, username).await?;
    if target.id == community.admin_id {
        return Err(BackendError::bad_request(
            "The community admin already has every moderator permission",
        ));
    }
    if !store.is_member(community.id, target.id).await? {
        return Err(BackendError::not_found(format!(
            "{} is not a member of {}",
            target.username, community.name
        )));
    }
    Ok((community, target))
}

/// PUT /api/communities/{name}/moderators/{username}
pub async fn add_moderator(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((name, username)): Path<(String, String)>,
) -> Result<Json<CommunityResponse>, BackendError> {
    let (community, target) = roster_target(&state, &auth, &name, &username).await?;

    if state.store.add_moderator(community.id, target.id).await? {
        tracing::info!("{} is now a moderator of {}", target.username, community.name);
    }
    Ok(Json(community_response(state.store.as_ref(), community).await?))
}

/// DELETE /api/communities/{name}/moderators/{username}
pub async fn remove_moderator(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((name, username)): Path<(String, String)>,
) -> Result<Json<CommunityResponse>, BackendError> {
    let (community, target) = roster_target(&state, &auth, &name, &username).await?;

    if state.store.remove_moderator(community.id, target.id).await? {
        tracing::info!("{} is no longer a moderator of {}", target.username, community.name);
    }
    Ok(Json(community_response(state.store.as_ref(), community).await?))
}
