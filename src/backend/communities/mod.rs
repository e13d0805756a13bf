//! Communities Module
//!
//! Communities are created by a user who becomes their admin and first
//! member. The admin appoints moderators from the member list; moderators
//! (and the admin) ban users, which also removes them from the community.
//!
//! # Module Structure
//!
//! ```text
//! communities/
//! ├── mod.rs         - Module exports and documentation
//! ├── lookup.rs      - Loading communities and access snapshots
//! ├── handlers.rs    - CRUD, join/leave, member list
//! ├── moderators.rs  - Appoint and remove moderators
//! └── bans.rs        - Ban, unban, list bans
//! ```

pub mod lookup;
pub mod handlers;
pub mod moderators;
pub mod bans;

pub use bans::{ban_user, list_bans, unban_user};
pub use handlers::{
    create_community, delete_community, get_community, join_community, leave_community,
    list_communities, list_members, update_community,
};
pub use lookup::{community_access, community_response, find_community};
pub use moderators::{add_moderator, remove_moderator};
