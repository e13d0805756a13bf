//! Users and follows

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{conflict_or_db, count, PgStore};
use crate::backend::store::models::{NewUser, User};
use crate::backend::store::repos::{FollowRepo, UserRepo};
use crate::backend::store::{StoreError, StoreResult};
use crate::shared::{Page, PageParams};

const USER_COLUMNS: &str =
    "u.id, u.username, u.email, u.password_hash, u.bio, u.is_admin, u.created_at, u.updated_at";

#[async_trait]
impl UserRepo for PgStore {
    async fn create_user(&self, new: NewUser) -> StoreResult<User> {
        let now = Utc::now();
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, email, password_hash, is_admin, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING id, username, email, password_hash, bio, is_admin, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.username)
        .bind(&new.email)
        .bind(&new.password_hash)
        .bind(new.is_admin)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(conflict_or_db)
    }

    async fn user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users u WHERE u.id = $1");
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users u WHERE u.username = $1");
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users u WHERE u.email = $1");
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn list_users(&self, page: PageParams) -> StoreResult<Page<User>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users u ORDER BY u.username LIMIT $1 OFFSET $2"
        );
        let users = sqlx::query_as::<_, User>(&sql)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;
        Ok(Page::new(users, page, count(total)))
    }

    async fn update_bio(&self, id: Uuid, bio: &str) -> StoreResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET bio = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, username, email, password_hash, bio, is_admin, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(bio)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn set_site_admin(&self, id: Uuid, is_admin: bool) -> StoreResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET is_admin = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, username, email, password_hash, bio, is_admin, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(is_admin)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl FollowRepo for PgStore {
    async fn follow(&self, follower: Uuid, followee: Uuid) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO follows (follower_id, followee_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(follower)
        .bind(followee)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn unfollow(&self, follower: Uuid, followee: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND followee_id = $2")
            .bind(follower)
            .bind(followee)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn is_following(&self, follower: Uuid, followee: Uuid) -> StoreResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM follows WHERE follower_id = $1 AND followee_id = $2)",
        )
        .bind(follower)
        .bind(followee)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn followers(&self, user: Uuid, page: PageParams) -> StoreResult<Page<User>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM follows WHERE followee_id = $1")
            .bind(user)
            .fetch_one(&self.pool)
            .await?;
        let sql = format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM follows f JOIN users u ON u.id = f.follower_id
            WHERE f.followee_id = $1
            ORDER BY f.created_at DESC, u.username
            LIMIT $2 OFFSET $3
            "#
        );
        let users = sqlx::query_as::<_, User>(&sql)
            .bind(user)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;
        Ok(Page::new(users, page, count(total)))
    }

    async fn following(&self, user: Uuid, page: PageParams) -> StoreResult<Page<User>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM follows WHERE follower_id = $1")
            .bind(user)
            .fetch_one(&self.pool)
            .await?;
        let sql = format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM follows f JOIN users u ON u.id = f.followee_id
            WHERE f.follower_id = $1
            ORDER BY f.created_at DESC, u.username
            LIMIT $2 OFFSET $3
            "#
        );
        let users = sqlx::query_as::<_, User>(&sql)
            .bind(user)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;
        Ok(Page::new(users, page, count(total)))
    }

    async fn follow_counts(&self, user: Uuid) -> StoreResult<(u64, u64)> {
        let (followers, following): (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM follows WHERE followee_id = $1),
                (SELECT COUNT(*) FROM follows WHERE follower_id = $1)
            "#,
        )
        .bind(user)
        .fetch_one(&self.pool)
        .await?;
        Ok((count(followers), count(following)))
    }
}
