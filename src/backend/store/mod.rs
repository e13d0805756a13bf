//! Storage Module
//!
//! Persistence for every forum entity sits behind the [`ForumStore`] trait.
//! Two backends implement it:
//!
//! - **`PgStore`** - PostgreSQL through sqlx, schema under `migrations/`
//! - **`MemoryStore`** - in-process maps, used when no database is configured
//!   and throughout the test suite
//!
//! Both backends implement the same semantics: uniqueness violations become
//! [`StoreError::Conflict`], deletes cascade to dependent rows, and list
//! queries return [`Page`](crate::shared::Page)s ordered the same way.
//!
//! # Module Structure
//!
//! ```text
//! store/
//! ├── mod.rs        - StoreError and re-exports
//! ├── models.rs     - Row records and insert inputs
//! ├── repos.rs      - Repository traits and the ForumStore supertrait
//! ├── memory.rs     - In-memory backend
//! └── postgres/     - PostgreSQL backend, one file per entity group
//! ```

pub mod models;
pub mod repos;
pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use models::*;
pub use postgres::PgStore;
pub use repos::{
    BanRepo, ChatRepo, CommunityRepo, FollowRepo, ForumStore, PostRepo, ReplyRepo, UserRepo,
};

use thiserror::Error;

/// Errors surfaced by any store backend
#[derive(Debug, Error)]
pub enum StoreError {
    /// The row to update does not exist
    #[error("not found")]
    NotFound,

    /// A unique constraint was violated; carries the offending field
    #[error("{0} already exists")]
    Conflict(String),

    /// Any other database failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
