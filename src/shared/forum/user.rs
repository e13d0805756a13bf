//! User Data Structures
//!
//! Public views of a user. None of these carry the email address or the
//! password hash; the email only appears on the caller's own profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Full profile returned by `GET /api/users/{username}` and `GET /api/auth/me`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    /// Only present when the caller is looking at their own profile
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub email: Option<String>,
    pub bio: String,
    pub is_admin: bool,
    pub follower_count: u64,
    pub following_count: u64,
    /// Whether the signed-in caller follows this user; absent for anonymous
    /// callers and on the caller's own profile
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub followed_by_me: Option<bool>,
    pub created_at: DateTime<Utc>,
}

/// Compact entry used in member, follower and user lists
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub is_admin: bool,
}

/// `PATCH /api/users/me`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub bio: String,
}

/// `PUT /api/users/{username}/admin`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetAdminRequest {
    pub is_admin: bool,
}
