/**
 * Post Handlers
 *
 * Listing and writing posts inside a community, and reading, editing and
 * deleting a single post by id.
 */

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;

use crate::backend::communities::lookup::{community_access, find_community, find_community_by_id};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::policy;
use crate::backend::posts::find_post;
use crate::backend::server::state::AppState;
use crate::backend::store::NewPost;
use crate::shared::forum::{CreatePostRequest, PostResponse, UpdatePostRequest};
use crate::shared::validation::{validate_body, validate_title};
use crate::shared::{Page, PageRequest};

/// GET /api/communities/{name}/posts
///
/// Newest first.
pub async fn list_community_posts(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Page<PostResponse>>, BackendError> {
    let community = find_community(state.store.as_ref(), &name).await?;
    let params = state.config.pagination.resolve(&page);
    let posts = state.store.posts_in_community(community.id, params).await?;
    Ok(Json(posts.map(PostResponse::from)))
}

/// POST /api/communities/{name}/posts
///
/// # Errors
///
/// * `400 Bad Request` - Empty or oversized title or body
/// * `403 Forbidden` - Not a member, or banned
/// * `404 Not Found` - Unknown community
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(name): Path<String>,
    Json(request): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), BackendError> {
    let community = find_community(state.store.as_ref(), &name).await?;
    let access = community_access(state.store.as_ref(), user.id, &community).await?;
    policy::create_post(&access)?;

    let title = validate_title(&request.title)?.to_string();
    let body = validate_body(&request.body)?.to_string();

    let post = state
        .store
        .create_post(NewPost {
            community_id: community.id,
            author_id: user.id,
            title,
            body,
        })
        .await?;

    tracing::debug!("{} posted {} in {}", user.username, post.id, community.name);
    Ok((StatusCode::CREATED, Json(post.into())))
}

/// GET /api/posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PostResponse>, BackendError> {
    Ok(Json(find_post(state.store.as_ref(), id).await?.into()))
}

/// PATCH /api/posts/{id}
///
/// Omitted fields keep their value; at least one must be present.
pub async fn update_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePostRequest>,
) -> Result<Json<PostResponse>, BackendError> {
    let post = find_post(state.store.as_ref(), id).await?;
    policy::edit_content(&auth.actor(), post.author_id)?;

    if request.title.is_none() && request.body.is_none() {
        return Err(BackendError::bad_request("Nothing to update"));
    }
    let title = match &request.title {
        Some(title) => validate_title(title)?,
        None => post.title.as_str(),
    };
    let body = match &request.body {
        Some(body) => validate_body(body)?,
        None => post.body.as_str(),
    };

    let updated = state.store.update_post(post.id, title, body).await?;
    Ok(Json(updated.into()))
}

/// DELETE /api/posts/{id}
///
/// Replies go with the post.
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, BackendError> {
    let store = state.store.as_ref();
    let post = find_post(store, id).await?;
    let community = find_community_by_id(store, post.community_id).await?;
    let access = community_access(store, auth.0.id, &community).await?;
    policy::delete_content(&auth.actor(), post.author_id, &access)?;

    store.delete_post(post.id).await?;
    if post.author_id != auth.0.id {
        tracing::info!("{} removed post {} from {}", auth.0.username, post.id, community.name);
    }
    Ok(StatusCode::NO_CONTENT)
}
