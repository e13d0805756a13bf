//! Reply handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;

use crate::backend::communities::lookup::{community_access, find_community_by_id};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::policy;
use crate::backend::posts::find_post;
use crate::backend::server::state::AppState;
use crate::backend::store::{ForumStore, NewReply, Reply};
use crate::shared::forum::{CreateReplyRequest, ReplyResponse, UpdateReplyRequest};
use crate::shared::validation::validate_body;
use crate::shared::{Page, PageRequest};

async fn find_reply(store: &dyn ForumStore, id: Uuid) -> Result<Reply, BackendError> {
    store
        .reply_by_id(id)
        .await?
        .ok_or_else(|| BackendError::not_found("Reply not found"))
}

/// GET /api/posts/{id}/replies
///
/// Oldest first, so a thread reads top to bottom.
pub async fn list_replies(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Page<ReplyResponse>>, BackendError> {
    let post = find_post(state.store.as_ref(), post_id).await?;
    let params = state.config.pagination.resolve(&page);
    let replies = state.store.replies_for_post(post.id, params).await?;
    Ok(Json(replies.map(ReplyResponse::from)))
}

/// POST /api/posts/{id}/replies
pub async fn create_reply(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(post_id): Path<Uuid>,
    Json(request): Json<CreateReplyRequest>,
) -> Result<(StatusCode, Json<ReplyResponse>), BackendError> {
    let store = state.store.as_ref();
    let post = find_post(store, post_id).await?;
    let community = find_community_by_id(store, post.community_id).await?;
    let access = community_access(store, user.id, &community).await?;
    policy::create_reply(&access)?;

    let body = validate_body(&request.body)?.to_string();
    let reply = store
        .create_reply(NewReply {
            post_id: post.id,
            author_id: user.id,
            body,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(reply.into())))
}

/// PATCH /api/replies/{id}
pub async fn update_reply(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateReplyRequest>,
) -> Result<Json<ReplyResponse>, BackendError> {
    let reply = find_reply(state.store.as_ref(), id).await?;
    policy::edit_content(&auth.actor(), reply.author_id)?;

    let body = validate_body(&request.body)?;
    let updated = state.store.update_reply(reply.id, body).await?;
    Ok(Json(updated.into()))
}

/// DELETE /api/replies/{id}
pub async fn delete_reply(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, BackendError> {
    let store = state.store.as_ref();
    let reply = find_reply(store, id).await?;
    let community = find_community_by_id(store, reply.community_id).await?;
    let access = community_access(store, auth.0.id, &community).await?;
    policy::delete_content(&auth.actor(), reply.author_id, &access)?;

    store.delete_reply(reply.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
