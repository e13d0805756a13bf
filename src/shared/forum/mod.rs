//! Forum Module
//!
//! This module contains the request and response types of the forum API:
//!
//! - `user` - Profiles, follows and admin flags
//! - `community` - Communities, moderators and bans
//! - `post` - Posts and replies
//! - `chat` - Direct messages and WebSocket frames
//!
//! # Usage
//!
//! ```rust
//! use townsquare::shared::forum::{CreatePostRequest, PostResponse};
//! ```

pub mod user;
pub mod community;
pub mod post;
pub mod chat;

// Re-export all types
pub use user::{SetAdminRequest, UpdateProfileRequest, UserProfile, UserSummary};
pub use community::{
    BanRequest, BanResponse, CommunityResponse, CreateCommunityRequest, UpdateCommunityRequest,
};
pub use post::{
    CreatePostRequest, CreateReplyRequest, PostResponse, ReplyResponse, UpdatePostRequest,
    UpdateReplyRequest,
};
pub use chat::{ChatMessageResponse, ChatSummary, ClientFrame, SendChatRequest, ServerFrame};
