//! Posts and Replies
//!
//! Posts belong to a community and are written by its members. Replies
//! hang off a post; anyone who is not banned from the post's community may
//! reply. Authors edit their own content; authors and moderators delete it.

pub mod handlers;
pub mod replies;

pub use handlers::{create_post, delete_post, get_post, list_community_posts, update_post};
pub use replies::{create_reply, delete_reply, list_replies, update_reply};

use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::store::{ForumStore, Post};

/// Load a post or answer 404
pub async fn find_post(store: &dyn ForumStore, id: Uuid) -> Result<Post, BackendError> {
    store
        .post_by_id(id)
        .await?
        .ok_or_else(|| BackendError::not_found("Post not found"))
}
