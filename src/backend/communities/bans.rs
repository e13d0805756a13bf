//! Community bans
//!
//! A ban removes the user from the community (and from the moderator
//! roster) and blocks joining, posting and replying until it expires or is
//! lifted. Banning an already banned user replaces the existing ban.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::{Duration, Utc};

use crate::backend::communities::lookup::{community_access, find_community};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::policy;
use crate::backend::server::state::AppState;
use crate::backend::store::NewBan;
use crate::backend::users::find_user;
use crate::shared::forum::{BanRequest, BanResponse};
use crate::shared::validation::{validate_ban_duration, validate_ban_reason};

/// POST /api/communities/{name}/bans
///
/// # Errors
///
/// * `400 Bad Request` - Reason too long, or a duration that is zero or too long
/// * `403 Forbidden` - Caller cannot moderate, or cannot ban this target
/// * `404 Not Found` - Unknown community or user
pub async fn ban_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(name): Path<String>,
    Json(request): Json<BanRequest>,
) -> Result<(StatusCode, Json<BanResponse>), BackendError> {
    let store = state.store.as_ref();
    let community = find_community(store, &name).await?;
    let access = community_access(store, auth.0.id, &community).await?;
    let actor = auth.actor();
    policy::moderate(&actor, &access)?;

    let target = find_user(store, &request.username).await?;
    let target_access = community_access(store, target.id, &community).await?;
    policy::ban_target(&actor, &access, &target_access)?;

    let reason = validate_ban_reason(&request.reason)?.to_string();
    let expires_at = match request.duration_hours {
        Some(hours) => {
            let hours = validate_ban_duration(hours)?;
            let expires = Utc::now()
                .checked_add_signed(Duration::hours(i64::from(hours)))
                .ok_or_else(|| BackendError::bad_request("duration_hours is too large"))?;
            Some(expires)
        }
        None => None,
    };

    let ban = store
        .upsert_ban(NewBan {
            community_id: community.id,
            user_id: target.id,
            banned_by: auth.0.id,
            reason,
            expires_at,
        })
        .await?;
    store.remove_member(community.id, target.id).await?;

    tracing::info!(
        "{} banned {} from {} (expires: {:?})",
        auth.0.username,
        target.username,
        community.name,
        ban.expires_at
    );
    Ok((StatusCode::CREATED, Json(ban.into_response(&community.name))))
}

/// GET /api/communities/{name}/bans
///
/// Active bans only, newest first.
pub async fn list_bans(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(name): Path<String>,
) -> Result<Json<Vec<BanResponse>>, BackendError> {
    let store = state.store.as_ref();
    let community = find_community(store, &name).await?;
    let access = community_access(store, auth.0.id, &community).await?;
    policy::moderate(&auth.actor(), &access)?;

    let bans = store.list_bans(community.id, Utc::now()).await?;
    Ok(Json(
        bans.into_iter()
            .map(|ban| ban.into_response(&community.name))
            .collect(),
    ))
}

/// DELETE /api/communities/{name}/bans/{username}
pub async fn unban_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((name, username)): Path<(String, String)>,
) -> Result<StatusCode, BackendError> {
    let store = state.store.as_ref();
    let community = find_community(store, &name).await?;
    let access = community_access(store, auth.0.id, &community).await?;
    policy::moderate(&auth.actor(), &access)?;

    let target = find_user(store, &username).await?;
    if !store.remove_ban(community.id, target.id).await? {
        return Err(BackendError::not_found(format!(
            "{} is not banned from {}",
            target.username, community.name
        )));
    }

    tracing::info!("{} unbanned {} from {}", auth.0.username, target.username, community.name);
    Ok(StatusCode::NO_CONTENT)
}
