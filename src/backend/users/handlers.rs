/**
 * User Handlers
 *
 * HTTP handlers for profiles, account management, follows and the feed.
 * Permission checks go through `backend::policy`.
 */

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::error::BackendError;
use crate::backend::middleware::{AuthUser, MaybeAuthUser};
use crate::backend::policy;
use crate::backend::server::state::AppState;
use crate::backend::users::profile::{find_user, user_profile, viewer_profile};
use crate::shared::forum::{CommunityResponse, PostResponse, SetAdminRequest, UpdateProfileRequest, UserProfile, UserSummary};
use crate::shared::validation::validate_bio;
use crate::shared::{Page, PageRequest};

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Page<UserSummary>>, BackendError> {
    let params = state.config.pagination.resolve(&page);
    let users = state.store.list_users(params).await?;
    Ok(Json(users.map(|user| user.summary())))
}

/// GET /api/users/{username}
///
/// The email address is included only when the caller views their own profile.
pub async fn get_user(
    State(state): State<AppState>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    Path(username): Path<String>,
) -> Result<Json<UserProfile>, BackendError> {
    let user = find_user(state.store.as_ref(), &username).await?;
    let viewer = viewer.map(|viewer| viewer.id);
    Ok(Json(viewer_profile(state.store.as_ref(), &user, viewer).await?))
}

/// PATCH /api/users/me
pub async fn update_me(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<UserProfile>, BackendError> {
    let bio = validate_bio(&request.bio)?;
    let updated = state.store.update_bio(user.id, bio).await?;
    tracing::info!("Updated bio of {}", updated.username);
    Ok(Json(user_profile(state.store.as_ref(), &updated, true).await?))
}

/// DELETE /api/users/me
pub async fn delete_me(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<StatusCode, BackendError> {
    state.store.delete_user(user.id).await?;
    tracing::info!("User {} deleted their account", user.username);
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/users/{username}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(username): Path<String>,
) -> Result<StatusCode, BackendError> {
    let target = find_user(state.store.as_ref(), &username).await?;
    policy::manage_user(&auth.actor(), target.id)?;

    state.store.delete_user(target.id).await?;
    tracing::info!("User {} deleted by {}", target.username, auth.0.username);
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/users/{username}/admin
pub async fn set_admin(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(username): Path<String>,
    Json(request): Json<SetAdminRequest>,
) -> Result<Json<UserProfile>, BackendError> {
    policy::site_admin_only(&auth.actor())?;

    let target = find_user(state.store.as_ref(), &username).await?;
    if target.id == auth.0.id && !request.is_admin {
        return Err(BackendError::bad_request("You cannot revoke your own admin rights"));
    }

    let updated = state.store.set_site_admin(target.id, request.is_admin).await?;
    tracing::info!(
        "Site admin flag of {} set to {} by {}",
        updated.username,
        updated.is_admin,
        auth.0.username
    );
    Ok(Json(user_profile(state.store.as_ref(), &updated, false).await?))
}

/// POST /api/users/{username}/follow
///
/// Idempotent. Returns the followed user's profile.
pub async fn follow_user(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(username): Path<String>,
) -> Result<Json<UserProfile>, BackendError> {
    let target = find_user(state.store.as_ref(), &username).await?;
    if target.id == user.id {
        return Err(BackendError::bad_request("You cannot follow yourself"));
    }

    if state.store.follow(user.id, target.id).await? {
        tracing::debug!("{} now follows {}", user.username, target.username);
    }
    Ok(Json(viewer_profile(state.store.as_ref(), &target, Some(user.id)).await?))
}

/// DELETE /api/users/{username}/follow
pub async fn unfollow_user(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(username): Path<String>,
) -> Result<Json<UserProfile>, BackendError> {
    let target = find_user(state.store.as_ref(), &username).await?;
    state.store.unfollow(user.id, target.id).await?;
    Ok(Json(viewer_profile(state.store.as_ref(), &target, Some(user.id)).await?))
}

/// GET /api/users/{username}/followers
pub async fn list_followers(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Page<UserSummary>>, BackendError> {
    let user = find_user(state.store.as_ref(), &username).await?;
    let params = state.config.pagination.resolve(&page);
    let followers = state.store.followers(user.id, params).await?;
    Ok(Json(followers.map(|u| u.summary())))
}

/// GET /api/users/{username}/following
pub async fn list_following(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Page<UserSummary>>, BackendError> {
    let user = find_user(state.store.as_ref(), &username).await?;
    let params = state.config.pagination.resolve(&page);
    let following = state.store.following(user.id, params).await?;
    Ok(Json(following.map(|u| u.summary())))
}

/// GET /api/users/{username}/posts
pub async fn list_user_posts(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Page<PostResponse>>, BackendError> {
    let user = find_user(state.store.as_ref(), &username).await?;
    let params = state.config.pagination.resolve(&page);
    let posts = state.store.posts_by_author(user.id, params).await?;
    Ok(Json(posts.map(PostResponse::from)))
}

/// GET /api/users/{username}/communities
///
/// Every community the user belongs to, ordered by name.
pub async fn list_user_communities(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Vec<CommunityResponse>>, BackendError> {
    let user = find_user(state.store.as_ref(), &username).await?;
    let communities = state.store.communities_for_user(user.id).await?;
    Ok(Json(
        communities
            .into_iter()
            .map(|community| community.into_response(Vec::new()))
            .collect(),
    ))
}

/// GET /api/feed
pub async fn feed(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(page): Query<PageRequest>,
) -> Result<Json<Page<PostResponse>>, BackendError> {
    let params = state.config.pagination.resolve(&page);
    let posts = state.store.feed(user.id, params).await?;
    Ok(Json(posts.map(PostResponse::from)))
}
