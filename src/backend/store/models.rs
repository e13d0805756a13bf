//! Store Records
//!
//! Row types returned by the store. Records that are shown next to other
//! entities carry the joined display fields (usernames, community name,
//! counters) so handlers never need a second round-trip to render them.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::shared::forum::{
    BanResponse, ChatMessageResponse, CommunityResponse, PostResponse, ReplyResponse, UserSummary,
};

/// User struct representing a row in `users`
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Username (unique, 3-30 chars, alphanumeric + underscore)
    pub username: String,
    /// User email address (unique)
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    pub bio: String,
    /// Site-wide administrator flag
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
            is_admin: self.is_admin,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Community {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub admin_id: Uuid,
    pub admin_username: String,
    pub member_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Community {
    pub fn into_response(self, moderators: Vec<String>) -> CommunityResponse {
        CommunityResponse {
            id: self.id,
            name: self.name,
            description: self.description,
            admin: self.admin_username,
            member_count: self.member_count.max(0) as u64,
            moderators,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewCommunity {
    pub name: String,
    pub description: String,
    pub admin_id: Uuid,
}

/// A ban of one user from one community. At most one row exists per pair.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Ban {
    pub id: Uuid,
    pub community_id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub banned_by: Uuid,
    pub banned_by_username: String,
    pub reason: String,
    pub created_at: DateTime<Utc>,
    /// `None` means permanent
    pub expires_at: Option<DateTime<Utc>>,
}

impl Ban {
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map_or(true, |expires| expires > now)
    }

    pub fn into_response(self, community: &str) -> BanResponse {
        BanResponse {
            id: self.id,
            community: community.to_string(),
            username: self.username,
            banned_by: self.banned_by_username,
            reason: self.reason,
            created_at: self.created_at,
            expires_at: self.expires_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewBan {
    pub community_id: Uuid,
    pub user_id: Uuid,
    pub banned_by: Uuid,
    pub reason: String,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub community_id: Uuid,
    pub community_name: String,
    pub author_id: Uuid,
    pub author_username: String,
    pub title: String,
    pub body: String,
    pub reply_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        PostResponse {
            id: post.id,
            community: post.community_name,
            author: post.author_username,
            title: post.title,
            body: post.body,
            reply_count: post.reply_count.max(0) as u64,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub community_id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Reply {
    pub id: Uuid,
    pub post_id: Uuid,
    /// Community of the parent post, needed for moderation checks
    pub community_id: Uuid,
    pub author_id: Uuid,
    pub author_username: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Reply> for ReplyResponse {
    fn from(reply: Reply) -> Self {
        ReplyResponse {
            id: reply.id,
            post_id: reply.post_id,
            author: reply.author_username,
            body: reply.body,
            created_at: reply.created_at,
            updated_at: reply.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewReply {
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ChatMessage {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub sender_username: String,
    pub recipient_id: Uuid,
    pub recipient_username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// The other participant from `user_id`'s point of view
    pub fn partner_of(&self, user_id: Uuid) -> (Uuid, &str) {
        if self.sender_id == user_id {
            (self.recipient_id, &self.recipient_username)
        } else {
            (self.sender_id, &self.sender_username)
        }
    }
}

impl From<ChatMessage> for ChatMessageResponse {
    fn from(message: ChatMessage) -> Self {
        ChatMessageResponse {
            id: message.id,
            from: message.sender_username,
            to: message.recipient_username,
            content: message.content,
            created_at: message.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewChatMessage {
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    pub content: String,
}

/// Latest message exchanged with one partner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSummary {
    pub partner_id: Uuid,
    pub partner_username: String,
    pub last_message: ChatMessage,
}
