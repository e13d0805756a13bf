//! PostgreSQL Store
//!
//! `ForumStore` on a sqlx `PgPool`. Queries are written out by hand with
//! runtime binding; joined display fields come back from the same query as
//! the row itself.

mod chat;
mod communities;
mod posts;
mod users;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::repos::ForumStore;
use super::StoreError;

/// PostgreSQL-backed store
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a pool
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Apply the embedded migrations under `migrations/`
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!().run(&self.pool).await
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl ForumStore for PgStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}

/// Turn unique violations into `Conflict`, naming the column from the
/// constraint (`users_email_key` -> `email`).
pub(crate) fn conflict_or_db(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            let field = db
                .constraint()
                .map(constraint_field)
                .unwrap_or("value")
                .to_string();
            return StoreError::Conflict(field);
        }
    }
    StoreError::Database(err)
}

fn constraint_field(constraint: &str) -> &str {
    if constraint.contains("email") {
        "email"
    } else if constraint.contains("username") {
        "username"
    } else if constraint.contains("name") {
        "name"
    } else {
        "value"
    }
}

fn count(total: i64) -> u64 {
    total.max(0) as u64
}
