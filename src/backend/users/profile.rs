//! Profile assembly and user lookup shared by the auth and users handlers

use crate::backend::error::BackendError;
use uuid::Uuid;

use crate::backend::store::{ForumStore, User};
use crate::shared::forum::UserProfile;

/// Load a user by username or answer 404
pub async fn find_user(store: &dyn ForumStore, username: &str) -> Result<User, BackendError> {
    store
        .user_by_username(username)
        .await?
        .ok_or_else(|| BackendError::not_found(format!("User '{}' not found", username)))
}

/// Build the public profile of `user`; `include_email` for the owner only
pub async fn user_profile(
    store: &dyn ForumStore,
    user: &User,
    include_email: bool,
) -> Result<UserProfile, BackendError> {
    let (follower_count, following_count) = store.follow_counts(user.id).await?;
    Ok(UserProfile {
        id: user.id,
        username: user.username.clone(),
        email: include_email.then(|| user.email.clone()),
        bio: user.bio.clone(),
        is_admin: user.is_admin,
        follower_count,
        following_count,
        followed_by_me: None,
        created_at: user.created_at,
    })
}

/// Profile of `user` as seen by `viewer`
///
/// The owner gets their email back; any other signed-in viewer learns
/// whether they follow the user.
pub async fn viewer_profile(
    store: &dyn ForumStore,
    user: &User,
    viewer: Option<Uuid>,
) -> Result<UserProfile, BackendError> {
    let own = viewer == Some(user.id);
    let mut profile = user_profile(store, user, own).await?;
    if let Some(viewer) = viewer.filter(|_| !own) {
        profile.followed_by_me = Some(store.is_following(viewer, user.id).await?);
    }
    Ok(profile)
}
