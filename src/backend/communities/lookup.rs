//! Loading helpers shared by the community, post and reply handlers

use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::policy::CommunityAccess;
use crate::backend::store::{Community, ForumStore};
use crate::shared::forum::CommunityResponse;

/// Load a community by name or answer 404
pub async fn find_community(store: &dyn ForumStore, name: &str) -> Result<Community, BackendError> {
    store
        .community_by_name(name)
        .await?
        .ok_or_else(|| BackendError::not_found(format!("Community '{}' not found", name)))
}

pub async fn find_community_by_id(store: &dyn ForumStore, id: Uuid) -> Result<Community, BackendError> {
    store
        .community_by_id(id)
        .await?
        .ok_or_else(|| BackendError::not_found("Community not found"))
}

/// `user_id`'s standing in `community`
pub async fn community_access(
    store: &dyn ForumStore,
    user_id: Uuid,
    community: &Community,
) -> Result<CommunityAccess, BackendError> {
    Ok(CommunityAccess::load(store, user_id, community).await?)
}

/// Response view including moderator usernames
pub async fn community_response(
    store: &dyn ForumStore,
    community: Community,
) -> Result<CommunityResponse, BackendError> {
    let moderators = store
        .moderators(community.id)
        .await?
        .into_iter()
        .map(|user| user.username)
        .collect();
    Ok(community.into_response(moderators))
}
