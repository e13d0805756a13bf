//! Users Module
//!
//! Profiles, account management, site-admin flags, follows and the
//! personal feed.
//!
//! # Endpoints
//!
//! - `GET /api/users` - Paged user list
//! - `GET /api/users/{username}` - Profile with follower counts
//! - `PATCH /api/users/me`, `DELETE /api/users/me` - Own account
//! - `DELETE /api/users/{username}` - Self or site admin
//! - `PUT /api/users/{username}/admin` - Grant or revoke site admin
//! - `POST|DELETE /api/users/{username}/follow`
//! - `GET /api/users/{username}/followers|following|posts|communities`
//! - `GET /api/feed` - Posts from joined communities and followed users

pub mod handlers;
pub mod profile;

pub use handlers::*;
pub use profile::{find_user, user_profile, viewer_profile};
