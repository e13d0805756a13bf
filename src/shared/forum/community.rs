//! Community Data Structures
//!
//! Communities, their moderator roster and bans.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A community as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommunityResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Username of the community admin
    pub admin: String,
    pub member_count: u64,
    /// Moderator usernames; only filled on the single-community endpoint
    #[serde(default)]
    pub moderators: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// `POST /api/communities`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommunityRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// `PATCH /api/communities/{name}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCommunityRequest {
    pub description: String,
}

/// `POST /api/communities/{name}/bans`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BanRequest {
    pub username: String,
    #[serde(default)]
    pub reason: String,
    /// Omit for a permanent ban
    #[serde(default)]
    pub duration_hours: Option<u32>,
}

/// A ban as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BanResponse {
    pub id: Uuid,
    pub community: String,
    pub username: String,
    pub banned_by: String,
    pub reason: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}
