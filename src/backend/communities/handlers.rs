/**
 * Community Handlers
 *
 * Creation, listing, editing and deletion of communities, plus joining,
 * leaving and the member list.
 */

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::communities::lookup::{community_access, community_response, find_community};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::policy;
use crate::backend::server::state::AppState;
use crate::backend::store::NewCommunity;
use crate::shared::forum::{
    CommunityResponse, CreateCommunityRequest, UpdateCommunityRequest, UserSummary,
};
use crate::shared::validation::{validate_community_name, validate_description};
use crate::shared::{Page, PageRequest};

/// POST /api/communities
///
/// # Errors
///
/// * `400 Bad Request` - Invalid name or description
/// * `409 Conflict` - A community with this name already exists
pub async fn create_community(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<CreateCommunityRequest>,
) -> Result<(StatusCode, Json<CommunityResponse>), BackendError> {
    let name = validate_community_name(request.name.trim())?.to_string();
    let description = validate_description(&request.description)?.to_string();

    if state.store.community_by_name(&name).await?.is_some() {
        return Err(BackendError::conflict(format!("Community '{}' already exists", name)));
    }

    let community = state
        .store
        .create_community(NewCommunity {
            name,
            description,
            admin_id: user.id,
        })
        .await?;

    tracing::info!("Community {} created by {}", community.name, user.username);
    let response = community_response(state.store.as_ref(), community).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/communities
pub async fn list_communities(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Page<CommunityResponse>>, BackendError> {
    let params = state.config.pagination.resolve(&page);
    let communities = state.store.list_communities(params).await?;
    Ok(Json(communities.map(|community| community.into_response(Vec::new()))))
}

/// GET /api/communities/{name}
pub async fn get_community(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<CommunityResponse>, BackendError> {
    let community = find_community(state.store.as_ref(), &name).await?;
    Ok(Json(community_response(state.store.as_ref(), community).await?))
}

/// PATCH /api/communities/{name}
pub async fn update_community(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(name): Path<String>,
    Json(request): Json<UpdateCommunityRequest>,
) -> Result<Json<CommunityResponse>, BackendError> {
    let community = find_community(state.store.as_ref(), &name).await?;
    let access = community_access(state.store.as_ref(), auth.0.id, &community).await?;
    policy::manage_community(&auth.actor(), &access)?;

    let description = validate_description(&request.description)?;
    let updated = state.store.update_description(community.id, description).await?;
    Ok(Json(community_response(state.store.as_ref(), updated).await?))
}

/// DELETE /api/communities/{name}
///
/// Removes the community with all its posts, replies, memberships and bans.
pub async fn delete_community(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(name): Path<String>,
) -> Result<StatusCode, BackendError> {
    let community = find_community(state.store.as_ref(), &name).await?;
    let access = community_access(state.store.as_ref(), auth.0.id, &community).await?;
    policy::manage_community(&auth.actor(), &access)?;

    state.store.delete_community(community.id).await?;
    tracing::info!("Community {} deleted by {}", community.name, auth.0.username);
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/communities/{name}/join
///
/// Joining twice is not an error.
pub async fn join_community(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(name): Path<String>,
) -> Result<Json<CommunityResponse>, BackendError> {
    let community = find_community(state.store.as_ref(), &name).await?;
    let access = community_access(state.store.as_ref(), user.id, &community).await?;
    policy::join(&access)?;

    if state.store.add_member(community.id, user.id).await? {
        tracing::debug!("{} joined {}", user.username, community.name);
    }

    let refreshed = find_community(state.store.as_ref(), &name).await?;
    Ok(Json(community_response(state.store.as_ref(), refreshed).await?))
}

/// DELETE /api/communities/{name}/join
pub async fn leave_community(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(name): Path<String>,
) -> Result<Json<CommunityResponse>, BackendError> {
    let community = find_community(state.store.as_ref(), &name).await?;
    let access = community_access(state.store.as_ref(), user.id, &community).await?;
    policy::leave(&access).map_err(|denied| BackendError::bad_request(denied.reason))?;

    if state.store.remove_member(community.id, user.id).await? {
        tracing::debug!("{} left {}", user.username, community.name);
    }

    let refreshed = find_community(state.store.as_ref(), &name).await?;
    Ok(Json(community_response(state.store.as_ref(), refreshed).await?))
}

/// GET /api/communities/{name}/members
pub async fn list_members(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Page<UserSummary>>, BackendError> {
    let community = find_community(state.store.as_ref(), &name).await?;
    let params = state.config.pagination.resolve(&page);
    let members = state.store.members(community.id, params).await?;
    Ok(Json(members.map(|user| user.summary())))
}
