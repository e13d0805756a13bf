//! Communities, membership, moderators and bans

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{conflict_or_db, count, PgStore};
use crate::backend::store::models::{Ban, Community, NewBan, NewCommunity, User};
use crate::backend::store::repos::{BanRepo, CommunityRepo};
use crate::backend::store::{StoreError, StoreResult};
use crate::shared::{Page, PageParams};

const COMMUNITY_SELECT: &str = r#"
    SELECT c.id, c.name, c.description, c.admin_id,
           a.username AS admin_username,
           (SELECT COUNT(*) FROM community_members m WHERE m.community_id = c.id) AS member_count,
           c.created_at
    FROM communities c
    JOIN users a ON a.id = c.admin_id
"#;

const BAN_SELECT: &str = r#"
    SELECT b.id, b.community_id, b.user_id, u.username,
           b.banned_by, i.username AS banned_by_username,
           b.reason, b.created_at, b.expires_at
    FROM community_bans b
    JOIN users u ON u.id = b.user_id
    JOIN users i ON i.id = b.banned_by
"#;

const MEMBER_COLUMNS: &str =
    "u.id, u.username, u.email, u.password_hash, u.bio, u.is_admin, u.created_at, u.updated_at";

#[async_trait]
impl CommunityRepo for PgStore {
    async fn create_community(&self, new: NewCommunity) -> StoreResult<Community> {
        let id = Uuid::new_v4();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO communities (id, name, description, admin_id, created_at)
            VALUES ($1, $2, $3, $4, NOW())
            "#,
        )
        .bind(id)
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.admin_id)
        .execute(&mut *tx)
        .await
        .map_err(conflict_or_db)?;

        sqlx::query("INSERT INTO community_members (community_id, user_id) VALUES ($1, $2)")
            .bind(id)
            .bind(new.admin_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        self.community_by_id(id).await?.ok_or(StoreError::NotFound)
    }

    async fn community_by_name(&self, name: &str) -> StoreResult<Option<Community>> {
        let sql = format!("{COMMUNITY_SELECT} WHERE c.name = $1");
        Ok(sqlx::query_as::<_, Community>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn community_by_id(&self, id: Uuid) -> StoreResult<Option<Community>> {
        let sql = format!("{COMMUNITY_SELECT} WHERE c.id = $1");
        Ok(sqlx::query_as::<_, Community>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn list_communities(&self, page: PageParams) -> StoreResult<Page<Community>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM communities")
            .fetch_one(&self.pool)
            .await?;
        let sql = format!("{COMMUNITY_SELECT} ORDER BY c.name LIMIT $1 OFFSET $2");
        let communities = sqlx::query_as::<_, Community>(&sql)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;
        Ok(Page::new(communities, page, count(total)))
    }

    async fn update_description(&self, id: Uuid, description: &str) -> StoreResult<Community> {
        let result = sqlx::query("UPDATE communities SET description = $2 WHERE id = $1")
            .bind(id)
            .bind(description)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        self.community_by_id(id).await?.ok_or(StoreError::NotFound)
    }

    async fn delete_community(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM communities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn add_member(&self, community: Uuid, user: Uuid) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO community_members (community_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(community)
        .bind(user)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn remove_member(&self, community: Uuid, user: Uuid) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM community_moderators WHERE community_id = $1 AND user_id = $2")
            .bind(community)
            .bind(user)
            .execute(&mut *tx)
            .await?;
        let result =
            sqlx::query("DELETE FROM community_members WHERE community_id = $1 AND user_id = $2")
                .bind(community)
                .bind(user)
                .execute(&mut *tx)
                .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn is_member(&self, community: Uuid, user: Uuid) -> StoreResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM community_members WHERE community_id = $1 AND user_id = $2)",
        )
        .bind(community)
        .bind(user)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn members(&self, community: Uuid, page: PageParams) -> StoreResult<Page<User>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM community_members WHERE community_id = $1")
                .bind(community)
                .fetch_one(&self.pool)
                .await?;
        let sql = format!(
            r#"
            SELECT {MEMBER_COLUMNS}
            FROM community_members m JOIN users u ON u.id = m.user_id
            WHERE m.community_id = $1
            ORDER BY m.joined_at, u.username
            LIMIT $2 OFFSET $3
            "#
        );
        let users = sqlx::query_as::<_, User>(&sql)
            .bind(community)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;
        Ok(Page::new(users, page, count(total)))
    }

    async fn add_moderator(&self, community: Uuid, user: Uuid) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO community_moderators (community_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(community)
        .bind(user)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn remove_moderator(&self, community: Uuid, user: Uuid) -> StoreResult<bool> {
        let result =
            sqlx::query("DELETE FROM community_moderators WHERE community_id = $1 AND user_id = $2")
                .bind(community)
                .bind(user)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn is_moderator(&self, community: Uuid, user: Uuid) -> StoreResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM community_moderators WHERE community_id = $1 AND user_id = $2)",
        )
        .bind(community)
        .bind(user)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn moderators(&self, community: Uuid) -> StoreResult<Vec<User>> {
        let sql = format!(
            r#"
            SELECT {MEMBER_COLUMNS}
            FROM community_moderators m JOIN users u ON u.id = m.user_id
            WHERE m.community_id = $1
            ORDER BY u.username
            "#
        );
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(community)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn communities_for_user(&self, user: Uuid) -> StoreResult<Vec<Community>> {
        let sql = format!(
            r#"{COMMUNITY_SELECT}
            WHERE EXISTS (
                SELECT 1 FROM community_members m
                WHERE m.community_id = c.id AND m.user_id = $1
            )
            ORDER BY c.name
            "#
        );
        Ok(sqlx::query_as::<_, Community>(&sql)
            .bind(user)
            .fetch_all(&self.pool)
            .await?)
    }
}

#[async_trait]
impl BanRepo for PgStore {
    async fn upsert_ban(&self, new: NewBan) -> StoreResult<Ban> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO community_bans (id, community_id, user_id, banned_by, reason, created_at, expires_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), $6)
            ON CONFLICT (community_id, user_id) DO UPDATE
            SET banned_by = EXCLUDED.banned_by,
                reason = EXCLUDED.reason,
                created_at = EXCLUDED.created_at,
                expires_at = EXCLUDED.expires_at
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.community_id)
        .bind(new.user_id)
        .bind(new.banned_by)
        .bind(&new.reason)
        .bind(new.expires_at)
        .fetch_one(&self.pool)
        .await?;

        let sql = format!("{BAN_SELECT} WHERE b.id = $1");
        sqlx::query_as::<_, Ban>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn remove_ban(&self, community: Uuid, user: Uuid) -> StoreResult<bool> {
        let result =
            sqlx::query("DELETE FROM community_bans WHERE community_id = $1 AND user_id = $2")
                .bind(community)
                .bind(user)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn active_ban(
        &self,
        community: Uuid,
        user: Uuid,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<Ban>> {
        let sql = format!(
            r#"{BAN_SELECT}
            WHERE b.community_id = $1 AND b.user_id = $2
              AND (b.expires_at IS NULL OR b.expires_at > $3)
            "#
        );
        Ok(sqlx::query_as::<_, Ban>(&sql)
            .bind(community)
            .bind(user)
            .bind(now)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn list_bans(&self, community: Uuid, now: DateTime<Utc>) -> StoreResult<Vec<Ban>> {
        let sql = format!(
            r#"{BAN_SELECT}
            WHERE b.community_id = $1
              AND (b.expires_at IS NULL OR b.expires_at > $2)
            ORDER BY b.created_at DESC
            "#
        );
        Ok(sqlx::query_as::<_, Ban>(&sql)
            .bind(community)
            .bind(now)
            .fetch_all(&self.pool)
            .await?)
    }
}
