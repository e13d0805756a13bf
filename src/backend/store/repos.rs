//! Repository Traits
//!
//! One trait per entity group. Handlers only see `Arc<dyn ForumStore>`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::models::*;
use super::StoreResult;
use crate::shared::{Page, PageParams};

#[async_trait]
pub trait UserRepo: Send + Sync {
    /// `Conflict("username")` or `Conflict("email")` on duplicates
    async fn create_user(&self, new: NewUser) -> StoreResult<User>;
    async fn user_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;
    async fn user_by_username(&self, username: &str) -> StoreResult<Option<User>>;
    async fn user_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    /// Ordered by username
    async fn list_users(&self, page: PageParams) -> StoreResult<Page<User>>;
    async fn update_bio(&self, id: Uuid, bio: &str) -> StoreResult<User>;
    async fn set_site_admin(&self, id: Uuid, is_admin: bool) -> StoreResult<User>;
    /// Removes the user and everything they own, including communities they admin
    async fn delete_user(&self, id: Uuid) -> StoreResult<bool>;
}

#[async_trait]
pub trait FollowRepo: Send + Sync {
    /// Returns `false` when the follow already existed
    async fn follow(&self, follower: Uuid, followee: Uuid) -> StoreResult<bool>;
    async fn unfollow(&self, follower: Uuid, followee: Uuid) -> StoreResult<bool>;
    async fn is_following(&self, follower: Uuid, followee: Uuid) -> StoreResult<bool>;
    /// Most recent followers first
    async fn followers(&self, user: Uuid, page: PageParams) -> StoreResult<Page<User>>;
    async fn following(&self, user: Uuid, page: PageParams) -> StoreResult<Page<User>>;
    /// `(followers, following)`
    async fn follow_counts(&self, user: Uuid) -> StoreResult<(u64, u64)>;
}

#[async_trait]
pub trait CommunityRepo: Send + Sync {
    /// The admin is enrolled as the first member
    async fn create_community(&self, new: NewCommunity) -> StoreResult<Community>;
    async fn community_by_name(&self, name: &str) -> StoreResult<Option<Community>>;
    async fn community_by_id(&self, id: Uuid) -> StoreResult<Option<Community>>;
    /// Ordered by name
    async fn list_communities(&self, page: PageParams) -> StoreResult<Page<Community>>;
    async fn update_description(&self, id: Uuid, description: &str) -> StoreResult<Community>;
    /// Cascades to members, moderators, bans, posts and replies
    async fn delete_community(&self, id: Uuid) -> StoreResult<bool>;
    async fn add_member(&self, community: Uuid, user: Uuid) -> StoreResult<bool>;
    /// Also drops moderator status
    async fn remove_member(&self, community: Uuid, user: Uuid) -> StoreResult<bool>;
    async fn is_member(&self, community: Uuid, user: Uuid) -> StoreResult<bool>;
    /// Ordered by join time
    async fn members(&self, community: Uuid, page: PageParams) -> StoreResult<Page<User>>;
    async fn add_moderator(&self, community: Uuid, user: Uuid) -> StoreResult<bool>;
    async fn remove_moderator(&self, community: Uuid, user: Uuid) -> StoreResult<bool>;
    async fn is_moderator(&self, community: Uuid, user: Uuid) -> StoreResult<bool>;
    /// Ordered by username
    async fn moderators(&self, community: Uuid) -> StoreResult<Vec<User>>;
    /// Communities the user belongs to, ordered by name
    async fn communities_for_user(&self, user: Uuid) -> StoreResult<Vec<Community>>;
}

#[async_trait]
pub trait BanRepo: Send + Sync {
    /// Replaces reason, issuer and expiry if the user already has a ban here
    async fn upsert_ban(&self, new: NewBan) -> StoreResult<Ban>;
    async fn remove_ban(&self, community: Uuid, user: Uuid) -> StoreResult<bool>;
    /// Expired bans are ignored
    async fn active_ban(
        &self,
        community: Uuid,
        user: Uuid,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<Ban>>;
    /// Active bans, newest first
    async fn list_bans(&self, community: Uuid, now: DateTime<Utc>) -> StoreResult<Vec<Ban>>;
}

#[async_trait]
pub trait PostRepo: Send + Sync {
    async fn create_post(&self, new: NewPost) -> StoreResult<Post>;
    async fn post_by_id(&self, id: Uuid) -> StoreResult<Option<Post>>;
    /// Newest first
    async fn posts_in_community(&self, community: Uuid, page: PageParams)
        -> StoreResult<Page<Post>>;
    /// Newest first
    async fn posts_by_author(&self, author: Uuid, page: PageParams) -> StoreResult<Page<Post>>;
    /// Posts in communities the user joined or by users they follow, newest first
    async fn feed(&self, user: Uuid, page: PageParams) -> StoreResult<Page<Post>>;
    async fn update_post(&self, id: Uuid, title: &str, body: &str) -> StoreResult<Post>;
    /// Cascades to replies
    async fn delete_post(&self, id: Uuid) -> StoreResult<bool>;
}

#[async_trait]
pub trait ReplyRepo: Send + Sync {
    async fn create_reply(&self, new: NewReply) -> StoreResult<Reply>;
    async fn reply_by_id(&self, id: Uuid) -> StoreResult<Option<Reply>>;
    /// Oldest first
    async fn replies_for_post(&self, post: Uuid, page: PageParams) -> StoreResult<Page<Reply>>;
    async fn update_reply(&self, id: Uuid, body: &str) -> StoreResult<Reply>;
    async fn delete_reply(&self, id: Uuid) -> StoreResult<bool>;
}

#[async_trait]
pub trait ChatRepo: Send + Sync {
    async fn save_message(&self, new: NewChatMessage) -> StoreResult<ChatMessage>;
    /// Messages between `a` and `b` in either direction, newest first
    async fn conversation(&self, a: Uuid, b: Uuid, page: PageParams)
        -> StoreResult<Page<ChatMessage>>;
    /// Latest message per partner, most recent conversation first
    async fn recent_chats(&self, user: Uuid) -> StoreResult<Vec<ChatSummary>>;
}

/// Everything the server needs from persistence
pub trait ForumStore:
    UserRepo + FollowRepo + CommunityRepo + BanRepo + PostRepo + ReplyRepo + ChatRepo
{
    /// Short name for logs (`"postgres"`, `"memory"`)
    fn backend_name(&self) -> &'static str;
}
