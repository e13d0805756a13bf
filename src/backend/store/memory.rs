//! In-Memory Store
//!
//! A `ForumStore` backed by plain maps behind a single `tokio::sync::RwLock`.
//! Used when no `DATABASE_URL` is configured and by the test suite.
//!
//! Rows are kept normalised the same way the SQL schema keeps them; joined
//! display fields are filled in when a record leaves the store. Every insert
//! takes a sequence number so "newest first" ordering stays stable even when
//! two rows share a timestamp.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::*;
use super::repos::*;
use super::{StoreError, StoreResult};
use crate::shared::{Page, PageParams};

#[derive(Debug, Clone)]
struct CommunityRow {
    id: Uuid,
    name: String,
    description: String,
    admin_id: Uuid,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct BanRow {
    id: Uuid,
    seq: u64,
    banned_by: Uuid,
    reason: String,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
struct PostRow {
    id: Uuid,
    seq: u64,
    community_id: Uuid,
    author_id: Uuid,
    title: String,
    body: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct ReplyRow {
    id: Uuid,
    seq: u64,
    post_id: Uuid,
    author_id: Uuid,
    body: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct MessageRow {
    id: Uuid,
    sender_id: Uuid,
    recipient_id: Uuid,
    content: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Tables {
    seq: u64,
    users: HashMap<Uuid, User>,
    /// (follower, followee) -> seq
    follows: HashMap<(Uuid, Uuid), u64>,
    communities: HashMap<Uuid, CommunityRow>,
    /// (community, user) -> seq
    members: HashMap<(Uuid, Uuid), u64>,
    moderators: HashSet<(Uuid, Uuid)>,
    /// (community, user) -> ban
    bans: HashMap<(Uuid, Uuid), BanRow>,
    posts: HashMap<Uuid, PostRow>,
    replies: HashMap<Uuid, ReplyRow>,
    /// Append order is chronological
    messages: Vec<MessageRow>,
}

impl Tables {
    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    fn username(&self, id: Uuid) -> String {
        self.users
            .get(&id)
            .map(|u| u.username.clone())
            .unwrap_or_default()
    }

    fn community(&self, row: &CommunityRow) -> Community {
        let member_count = self
            .members
            .keys()
            .filter(|(community, _)| *community == row.id)
            .count();
        Community {
            id: row.id,
            name: row.name.clone(),
            description: row.description.clone(),
            admin_id: row.admin_id,
            admin_username: self.username(row.admin_id),
            member_count: member_count as i64,
            created_at: row.created_at,
        }
    }

    fn ban(&self, community_id: Uuid, user_id: Uuid, row: &BanRow) -> Ban {
        Ban {
            id: row.id,
            community_id,
            user_id,
            username: self.username(user_id),
            banned_by: row.banned_by,
            banned_by_username: self.username(row.banned_by),
            reason: row.reason.clone(),
            created_at: row.created_at,
            expires_at: row.expires_at,
        }
    }

    fn post(&self, row: &PostRow) -> Post {
        let reply_count = self
            .replies
            .values()
            .filter(|reply| reply.post_id == row.id)
            .count();
        Post {
            id: row.id,
            community_id: row.community_id,
            community_name: self
                .communities
                .get(&row.community_id)
                .map(|c| c.name.clone())
                .unwrap_or_default(),
            author_id: row.author_id,
            author_username: self.username(row.author_id),
            title: row.title.clone(),
            body: row.body.clone(),
            reply_count: reply_count as i64,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }

    fn reply(&self, row: &ReplyRow) -> Reply {
        Reply {
            id: row.id,
            post_id: row.post_id,
            community_id: self
                .posts
                .get(&row.post_id)
                .map(|p| p.community_id)
                .unwrap_or_default(),
            author_id: row.author_id,
            author_username: self.username(row.author_id),
            body: row.body.clone(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }

    fn message(&self, row: &MessageRow) -> ChatMessage {
        ChatMessage {
            id: row.id,
            sender_id: row.sender_id,
            sender_username: self.username(row.sender_id),
            recipient_id: row.recipient_id,
            recipient_username: self.username(row.recipient_id),
            content: row.content.clone(),
            created_at: row.created_at,
        }
    }

    /// Newest-first post page from any filter
    fn post_page(&self, params: PageParams, filter: impl Fn(&PostRow) -> bool) -> Page<Post> {
        let mut rows: Vec<&PostRow> = self.posts.values().filter(|row| filter(row)).collect();
        rows.sort_by(|a, b| b.seq.cmp(&a.seq));
        let posts: Vec<Post> = rows.into_iter().map(|row| self.post(row)).collect();
        Page::from_slice(&posts, params)
    }

    fn remove_post(&mut self, id: Uuid) -> bool {
        if self.posts.remove(&id).is_none() {
            return false;
        }
        self.replies.retain(|_, reply| reply.post_id != id);
        true
    }

    fn remove_community(&mut self, id: Uuid) -> bool {
        if self.communities.remove(&id).is_none() {
            return false;
        }
        self.members.retain(|(community, _), _| *community != id);
        self.moderators.retain(|(community, _)| *community != id);
        self.bans.retain(|(community, _), _| *community != id);
        let posts: Vec<Uuid> = self
            .posts
            .values()
            .filter(|post| post.community_id == id)
            .map(|post| post.id)
            .collect();
        for post in posts {
            self.remove_post(post);
        }
        true
    }
}

/// In-process store with the same semantics as [`PgStore`](super::PgStore)
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn create_user(&self, new: NewUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.username == new.username) {
            return Err(StoreError::Conflict("username".to_string()));
        }
        if tables.users.values().any(|u| u.email == new.email) {
            return Err(StoreError::Conflict("email".to_string()));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: new.username,
            email: new.email,
            password_hash: new.password_hash,
            bio: String::new(),
            is_admin: new.is_admin,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }

    async fn user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self, page: PageParams) -> StoreResult<Page<User>> {
        let tables = self.tables.read().await;
        let mut users: Vec<User> = tables.users.values().cloned().collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(Page::from_slice(&users, page))
    }

    async fn update_bio(&self, id: Uuid, bio: &str) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        let user = tables.users.get_mut(&id).ok_or(StoreError::NotFound)?;
        user.bio = bio.to_string();
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn set_site_admin(&self, id: Uuid, is_admin: bool) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        let user = tables.users.get_mut(&id).ok_or(StoreError::NotFound)?;
        user.is_admin = is_admin;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&id) {
            return Ok(false);
        }

        let owned: Vec<Uuid> = tables
            .communities
            .values()
            .filter(|c| c.admin_id == id)
            .map(|c| c.id)
            .collect();
        for community in owned {
            tables.remove_community(community);
        }

        let posts: Vec<Uuid> = tables
            .posts
            .values()
            .filter(|p| p.author_id == id)
            .map(|p| p.id)
            .collect();
        for post in posts {
            tables.remove_post(post);
        }

        tables.replies.retain(|_, r| r.author_id != id);
        tables.follows.retain(|(a, b), _| *a != id && *b != id);
        tables.members.retain(|(_, user), _| *user != id);
        tables.moderators.retain(|(_, user)| *user != id);
        tables
            .bans
            .retain(|(_, user), ban| *user != id && ban.banned_by != id);
        tables
            .messages
            .retain(|m| m.sender_id != id && m.recipient_id != id);
        tables.users.remove(&id);
        Ok(true)
    }
}

#[async_trait]
impl FollowRepo for MemoryStore {
    async fn follow(&self, follower: Uuid, followee: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.follows.contains_key(&(follower, followee)) {
            return Ok(false);
        }
        let seq = tables.next_seq();
        tables.follows.insert((follower, followee), seq);
        Ok(true)
    }

    async fn unfollow(&self, follower: Uuid, followee: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables.follows.remove(&(follower, followee)).is_some())
    }

    async fn is_following(&self, follower: Uuid, followee: Uuid) -> StoreResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.follows.contains_key(&(follower, followee)))
    }

    async fn followers(&self, user: Uuid, page: PageParams) -> StoreResult<Page<User>> {
        let tables = self.tables.read().await;
        let mut edges: Vec<(u64, Uuid)> = tables
            .follows
            .iter()
            .filter(|((_, followee), _)| *followee == user)
            .map(|((follower, _), seq)| (*seq, *follower))
            .collect();
        edges.sort_by(|a, b| b.0.cmp(&a.0));
        let users: Vec<User> = edges
            .into_iter()
            .filter_map(|(_, id)| tables.users.get(&id).cloned())
            .collect();
        Ok(Page::from_slice(&users, page))
    }

    async fn following(&self, user: Uuid, page: PageParams) -> StoreResult<Page<User>> {
        let tables = self.tables.read().await;
        let mut edges: Vec<(u64, Uuid)> = tables
            .follows
            .iter()
            .filter(|((follower, _), _)| *follower == user)
            .map(|((_, followee), seq)| (*seq, *followee))
            .collect();
        edges.sort_by(|a, b| b.0.cmp(&a.0));
        let users: Vec<User> = edges
            .into_iter()
            .filter_map(|(_, id)| tables.users.get(&id).cloned())
            .collect();
        Ok(Page::from_slice(&users, page))
    }

    async fn follow_counts(&self, user: Uuid) -> StoreResult<(u64, u64)> {
        let tables = self.tables.read().await;
        let followers = tables.follows.keys().filter(|(_, b)| *b == user).count();
        let following = tables.follows.keys().filter(|(a, _)| *a == user).count();
        Ok((followers as u64, following as u64))
    }
}

#[async_trait]
impl CommunityRepo for MemoryStore {
    async fn create_community(&self, new: NewCommunity) -> StoreResult<Community> {
        let mut tables = self.tables.write().await;
        if tables.communities.values().any(|c| c.name == new.name) {
            return Err(StoreError::Conflict("name".to_string()));
        }
        let row = CommunityRow {
            id: Uuid::new_v4(),
            name: new.name,
            description: new.description,
            admin_id: new.admin_id,
            created_at: Utc::now(),
        };
        let seq = tables.next_seq();
        tables.members.insert((row.id, row.admin_id), seq);
        tables.communities.insert(row.id, row.clone());
        Ok(tables.community(&row))
    }

    async fn community_by_name(&self, name: &str) -> StoreResult<Option<Community>> {
        let tables = self.tables.read().await;
        Ok(tables
            .communities
            .values()
            .find(|c| c.name == name)
            .map(|row| tables.community(row)))
    }

    async fn community_by_id(&self, id: Uuid) -> StoreResult<Option<Community>> {
        let tables = self.tables.read().await;
        Ok(tables.communities.get(&id).map(|row| tables.community(row)))
    }

    async fn list_communities(&self, page: PageParams) -> StoreResult<Page<Community>> {
        let tables = self.tables.read().await;
        let mut communities: Vec<Community> = tables
            .communities
            .values()
            .map(|row| tables.community(row))
            .collect();
        communities.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(Page::from_slice(&communities, page))
    }

    async fn update_description(&self, id: Uuid, description: &str) -> StoreResult<Community> {
        let mut tables = self.tables.write().await;
        let row = tables.communities.get_mut(&id).ok_or(StoreError::NotFound)?;
        row.description = description.to_string();
        let row = row.clone();
        Ok(tables.community(&row))
    }

    async fn delete_community(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.tables.write().await.remove_community(id))
    }

    async fn add_member(&self, community: Uuid, user: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.members.contains_key(&(community, user)) {
            return Ok(false);
        }
        let seq = tables.next_seq();
        tables.members.insert((community, user), seq);
        Ok(true)
    }

    async fn remove_member(&self, community: Uuid, user: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        tables.moderators.remove(&(community, user));
        Ok(tables.members.remove(&(community, user)).is_some())
    }

    async fn is_member(&self, community: Uuid, user: Uuid) -> StoreResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.members.contains_key(&(community, user)))
    }

    async fn members(&self, community: Uuid, page: PageParams) -> StoreResult<Page<User>> {
        let tables = self.tables.read().await;
        let mut joined: Vec<(u64, Uuid)> = tables
            .members
            .iter()
            .filter(|((c, _), _)| *c == community)
            .map(|((_, user), seq)| (*seq, *user))
            .collect();
        joined.sort_by_key(|(seq, _)| *seq);
        let users: Vec<User> = joined
            .into_iter()
            .filter_map(|(_, id)| tables.users.get(&id).cloned())
            .collect();
        Ok(Page::from_slice(&users, page))
    }

    async fn add_moderator(&self, community: Uuid, user: Uuid) -> StoreResult<bool> {
        Ok(self.tables.write().await.moderators.insert((community, user)))
    }

    async fn remove_moderator(&self, community: Uuid, user: Uuid) -> StoreResult<bool> {
        Ok(self.tables.write().await.moderators.remove(&(community, user)))
    }

    async fn is_moderator(&self, community: Uuid, user: Uuid) -> StoreResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.moderators.contains(&(community, user)))
    }

    async fn moderators(&self, community: Uuid) -> StoreResult<Vec<User>> {
        let tables = self.tables.read().await;
        let mut users: Vec<User> = tables
            .moderators
            .iter()
            .filter(|(c, _)| *c == community)
            .filter_map(|(_, id)| tables.users.get(id).cloned())
            .collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn communities_for_user(&self, user: Uuid) -> StoreResult<Vec<Community>> {
        let tables = self.tables.read().await;
        let mut communities: Vec<Community> = tables
            .members
            .keys()
            .filter(|(_, u)| *u == user)
            .filter_map(|(c, _)| tables.communities.get(c))
            .map(|row| tables.community(row))
            .collect();
        communities.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(communities)
    }
}

#[async_trait]
impl BanRepo for MemoryStore {
    async fn upsert_ban(&self, new: NewBan) -> StoreResult<Ban> {
        let mut tables = self.tables.write().await;
        let seq = tables.next_seq();
        let key = (new.community_id, new.user_id);
        let row = match tables.bans.get(&key) {
            Some(existing) => BanRow {
                id: existing.id,
                seq,
                banned_by: new.banned_by,
                reason: new.reason,
                created_at: Utc::now(),
                expires_at: new.expires_at,
            },
            None => BanRow {
                id: Uuid::new_v4(),
                seq,
                banned_by: new.banned_by,
                reason: new.reason,
                created_at: Utc::now(),
                expires_at: new.expires_at,
            },
        };
        tables.bans.insert(key, row.clone());
        Ok(tables.ban(new.community_id, new.user_id, &row))
    }

    async fn remove_ban(&self, community: Uuid, user: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables.bans.remove(&(community, user)).is_some())
    }

    async fn active_ban(
        &self,
        community: Uuid,
        user: Uuid,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<Ban>> {
        let tables = self.tables.read().await;
        Ok(tables
            .bans
            .get(&(community, user))
            .map(|row| tables.ban(community, user, row))
            .filter(|ban| ban.is_active(now)))
    }

    async fn list_bans(&self, community: Uuid, now: DateTime<Utc>) -> StoreResult<Vec<Ban>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<(&(Uuid, Uuid), &BanRow)> = tables
            .bans
            .iter()
            .filter(|((c, _), _)| *c == community)
            .collect();
        rows.sort_by(|a, b| b.1.seq.cmp(&a.1.seq));
        Ok(rows
            .into_iter()
            .map(|((c, u), row)| tables.ban(*c, *u, row))
            .filter(|ban| ban.is_active(now))
            .collect())
    }
}

#[async_trait]
impl PostRepo for MemoryStore {
    async fn create_post(&self, new: NewPost) -> StoreResult<Post> {
        let mut tables = self.tables.write().await;
        if !tables.communities.contains_key(&new.community_id) {
            return Err(StoreError::NotFound);
        }
        let now = Utc::now();
        let row = PostRow {
            id: Uuid::new_v4(),
            seq: tables.next_seq(),
            community_id: new.community_id,
            author_id: new.author_id,
            title: new.title,
            body: new.body,
            created_at: now,
            updated_at: now,
        };
        tables.posts.insert(row.id, row.clone());
        Ok(tables.post(&row))
    }

    async fn post_by_id(&self, id: Uuid) -> StoreResult<Option<Post>> {
        let tables = self.tables.read().await;
        Ok(tables.posts.get(&id).map(|row| tables.post(row)))
    }

    async fn posts_in_community(
        &self,
        community: Uuid,
        page: PageParams,
    ) -> StoreResult<Page<Post>> {
        let tables = self.tables.read().await;
        Ok(tables.post_page(page, |row| row.community_id == community))
    }

    async fn posts_by_author(&self, author: Uuid, page: PageParams) -> StoreResult<Page<Post>> {
        let tables = self.tables.read().await;
        Ok(tables.post_page(page, |row| row.author_id == author))
    }

    async fn feed(&self, user: Uuid, page: PageParams) -> StoreResult<Page<Post>> {
        let tables = self.tables.read().await;
        let joined: HashSet<Uuid> = tables
            .members
            .keys()
            .filter(|(_, u)| *u == user)
            .map(|(c, _)| *c)
            .collect();
        let followed: HashSet<Uuid> = tables
            .follows
            .keys()
            .filter(|(follower, _)| *follower == user)
            .map(|(_, followee)| *followee)
            .collect();
        Ok(tables.post_page(page, |row| {
            joined.contains(&row.community_id) || followed.contains(&row.author_id)
        }))
    }

    async fn update_post(&self, id: Uuid, title: &str, body: &str) -> StoreResult<Post> {
        let mut tables = self.tables.write().await;
        let row = tables.posts.get_mut(&id).ok_or(StoreError::NotFound)?;
        row.title = title.to_string();
        row.body = body.to_string();
        row.updated_at = Utc::now();
        let row = row.clone();
        Ok(tables.post(&row))
    }

    async fn delete_post(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.tables.write().await.remove_post(id))
    }
}

#[async_trait]
impl ReplyRepo for MemoryStore {
    async fn create_reply(&self, new: NewReply) -> StoreResult<Reply> {
        let mut tables = self.tables.write().await;
        if !tables.posts.contains_key(&new.post_id) {
            return Err(StoreError::NotFound);
        }
        let now = Utc::now();
        let row = ReplyRow {
            id: Uuid::new_v4(),
            seq: tables.next_seq(),
            post_id: new.post_id,
            author_id: new.author_id,
            body: new.body,
            created_at: now,
            updated_at: now,
        };
        tables.replies.insert(row.id, row.clone());
        Ok(tables.reply(&row))
    }

    async fn reply_by_id(&self, id: Uuid) -> StoreResult<Option<Reply>> {
        let tables = self.tables.read().await;
        Ok(tables.replies.get(&id).map(|row| tables.reply(row)))
    }

    async fn replies_for_post(&self, post: Uuid, page: PageParams) -> StoreResult<Page<Reply>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<&ReplyRow> = tables
            .replies
            .values()
            .filter(|row| row.post_id == post)
            .collect();
        rows.sort_by_key(|row| row.seq);
        let replies: Vec<Reply> = rows.into_iter().map(|row| tables.reply(row)).collect();
        Ok(Page::from_slice(&replies, page))
    }

    async fn update_reply(&self, id: Uuid, body: &str) -> StoreResult<Reply> {
        let mut tables = self.tables.write().await;
        let row = tables.replies.get_mut(&id).ok_or(StoreError::NotFound)?;
        row.body = body.to_string();
        row.updated_at = Utc::now();
        let row = row.clone();
        Ok(tables.reply(&row))
    }

    async fn delete_reply(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.tables.write().await.replies.remove(&id).is_some())
    }
}

#[async_trait]
impl ChatRepo for MemoryStore {
    async fn save_message(&self, new: NewChatMessage) -> StoreResult<ChatMessage> {
        let mut tables = self.tables.write().await;
        let row = MessageRow {
            id: Uuid::new_v4(),
            sender_id: new.sender_id,
            recipient_id: new.recipient_id,
            content: new.content,
            created_at: Utc::now(),
        };
        tables.messages.push(row.clone());
        Ok(tables.message(&row))
    }

    async fn conversation(
        &self,
        a: Uuid,
        b: Uuid,
        page: PageParams,
    ) -> StoreResult<Page<ChatMessage>> {
        let tables = self.tables.read().await;
        let messages: Vec<ChatMessage> = tables
            .messages
            .iter()
            .rev()
            .filter(|m| {
                (m.sender_id == a && m.recipient_id == b)
                    || (m.sender_id == b && m.recipient_id == a)
            })
            .map(|row| tables.message(row))
            .collect();
        Ok(Page::from_slice(&messages, page))
    }

    async fn recent_chats(&self, user: Uuid) -> StoreResult<Vec<ChatSummary>> {
        let tables = self.tables.read().await;
        let mut seen = HashSet::new();
        let mut summaries = Vec::new();
        for row in tables.messages.iter().rev() {
            if row.sender_id != user && row.recipient_id != user {
                continue;
            }
            let message = tables.message(row);
            let (partner_id, partner_username) = message.partner_of(user);
            if !seen.insert(partner_id) {
                continue;
            }
            let partner_username = partner_username.to_string();
            summaries.push(ChatSummary {
                partner_id,
                partner_username,
                last_message: message,
            });
        }
        Ok(summaries)
    }
}

impl ForumStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
