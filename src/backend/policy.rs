//! Authorization Policy
//!
//! Every permission rule in the forum lives here. Handlers load a
//! [`CommunityAccess`] snapshot for the requester and ask one of the decision
//! functions below; a [`Denied`] converts into a 403 response.
//!
//! # Roles
//!
//! - **site admin** - `users.is_admin`; may do anything
//! - **community admin** - the creator of a community
//! - **moderator** - appointed by the community admin
//! - **member** - joined the community
//!
//! An active ban overrides membership for posting, replying and joining.

use chrono::Utc;
use uuid::Uuid;

use crate::backend::store::{Community, ForumStore, StoreResult, User};

/// A refused action, with the reason shown to the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denied {
    pub reason: String,
}

impl Denied {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for Denied {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.reason)
    }
}

impl std::error::Error for Denied {}

pub type Decision = Result<(), Denied>;

fn allow_if(condition: bool, reason: &str) -> Decision {
    if condition {
        Ok(())
    } else {
        Err(Denied::new(reason))
    }
}

/// Whoever is making the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    pub site_admin: bool,
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            site_admin: user.is_admin,
        }
    }
}

/// One user's standing in one community
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommunityAccess {
    pub community_id: Uuid,
    pub user_id: Uuid,
    pub admin_id: Uuid,
    pub moderator: bool,
    pub member: bool,
    pub banned: bool,
}

impl CommunityAccess {
    pub async fn load(
        store: &dyn ForumStore,
        user_id: Uuid,
        community: &Community,
    ) -> StoreResult<Self> {
        let member = store.is_member(community.id, user_id).await?;
        let moderator = store.is_moderator(community.id, user_id).await?;
        let banned = store
            .active_ban(community.id, user_id, Utc::now())
            .await?
            .is_some();

        Ok(Self {
            community_id: community.id,
            user_id,
            admin_id: community.admin_id,
            moderator,
            member,
            banned,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.user_id == self.admin_id
    }
}

/// Edit or delete the community, appoint or remove moderators
pub fn manage_community(actor: &Actor, access: &CommunityAccess) -> Decision {
    allow_if(
        actor.site_admin || access.is_admin(),
        "Only the community admin can manage this community",
    )
}

/// Ban, unban, list bans and delete other people's content
pub fn moderate(actor: &Actor, access: &CommunityAccess) -> Decision {
    allow_if(
        actor.site_admin || access.is_admin() || access.moderator,
        "Only moderators can moderate this community",
    )
}

/// Whether `actor` may ban the user described by `target`.
/// Assumes [`moderate`] already passed.
pub fn ban_target(actor: &Actor, access: &CommunityAccess, target: &CommunityAccess) -> Decision {
    if target.user_id == actor.user_id {
        return Err(Denied::new("You cannot ban yourself"));
    }
    if target.is_admin() {
        return Err(Denied::new("The community admin cannot be banned"));
    }
    if target.moderator && !(actor.site_admin || access.is_admin()) {
        return Err(Denied::new("Only the community admin can ban a moderator"));
    }
    Ok(())
}

pub fn create_post(access: &CommunityAccess) -> Decision {
    if access.banned {
        return Err(Denied::new("You are banned from this community"));
    }
    allow_if(access.member, "Join the community before posting")
}

pub fn create_reply(access: &CommunityAccess) -> Decision {
    allow_if(!access.banned, "You are banned from this community")
}

pub fn join(access: &CommunityAccess) -> Decision {
    allow_if(!access.banned, "You are banned from this community")
}

/// The admin owns the community and cannot leave it
pub fn leave(access: &CommunityAccess) -> Decision {
    allow_if(!access.is_admin(), "The community admin cannot leave the community")
}

pub fn edit_content(actor: &Actor, author_id: Uuid) -> Decision {
    allow_if(actor.user_id == author_id, "Only the author can edit this")
}

pub fn delete_content(actor: &Actor, author_id: Uuid, access: &CommunityAccess) -> Decision {
    if actor.user_id == author_id {
        return Ok(());
    }
    moderate(actor, access).map_err(|_| Denied::new("Only the author or a moderator can delete this"))
}

/// Edit or delete a user account
pub fn manage_user(actor: &Actor, target_id: Uuid) -> Decision {
    allow_if(
        actor.site_admin || actor.user_id == target_id,
        "You can only manage your own account",
    )
}

pub fn site_admin_only(actor: &Actor) -> Decision {
    allow_if(actor.site_admin, "Site admin privileges required")
}
