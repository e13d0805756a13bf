//! Posts and replies

use async_trait::async_trait;
use uuid::Uuid;

use super::{count, PgStore};
use crate::backend::store::models::{NewPost, NewReply, Post, Reply};
use crate::backend::store::repos::{PostRepo, ReplyRepo};
use crate::backend::store::{StoreError, StoreResult};
use crate::shared::{Page, PageParams};

const POST_SELECT: &str = r#"
    SELECT p.id, p.community_id, c.name AS community_name,
           p.author_id, u.username AS author_username,
           p.title, p.body,
           (SELECT COUNT(*) FROM replies r WHERE r.post_id = p.id) AS reply_count,
           p.created_at, p.updated_at
    FROM posts p
    JOIN communities c ON c.id = p.community_id
    JOIN users u ON u.id = p.author_id
"#;

const REPLY_SELECT: &str = r#"
    SELECT r.id, r.post_id, p.community_id,
           r.author_id, u.username AS author_username,
           r.body, r.created_at, r.updated_at
    FROM replies r
    JOIN posts p ON p.id = r.post_id
    JOIN users u ON u.id = r.author_id
"#;

impl PgStore {
    async fn fetch_post(&self, id: Uuid) -> StoreResult<Option<Post>> {
        let sql = format!("{POST_SELECT} WHERE p.id = $1");
        Ok(sqlx::query_as::<_, Post>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn fetch_reply(&self, id: Uuid) -> StoreResult<Option<Reply>> {
        let sql = format!("{REPLY_SELECT} WHERE r.id = $1");
        Ok(sqlx::query_as::<_, Reply>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    /// Newest-first page of posts matching `filter`, which may reference `$1`
    async fn post_page(
        &self,
        filter: &str,
        key: Uuid,
        page: PageParams,
    ) -> StoreResult<Page<Post>> {
        let count_sql = format!("SELECT COUNT(*) FROM posts p WHERE {filter}");
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(key)
            .fetch_one(&self.pool)
            .await?;

        let sql = format!(
            "{POST_SELECT} WHERE {filter} ORDER BY p.created_at DESC, p.id DESC LIMIT $2 OFFSET $3"
        );
        let posts = sqlx::query_as::<_, Post>(&sql)
            .bind(key)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;
        Ok(Page::new(posts, page, count(total)))
    }
}

#[async_trait]
impl PostRepo for PgStore {
    async fn create_post(&self, new: NewPost) -> StoreResult<Post> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO posts (id, community_id, author_id, title, body, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            "#,
        )
        .bind(id)
        .bind(new.community_id)
        .bind(new.author_id)
        .bind(&new.title)
        .bind(&new.body)
        .execute(&self.pool)
        .await?;
        self.fetch_post(id).await?.ok_or(StoreError::NotFound)
    }

    async fn post_by_id(&self, id: Uuid) -> StoreResult<Option<Post>> {
        self.fetch_post(id).await
    }

    async fn posts_in_community(
        &self,
        community: Uuid,
        page: PageParams,
    ) -> StoreResult<Page<Post>> {
        self.post_page("p.community_id = $1", community, page).await
    }

    async fn posts_by_author(&self, author: Uuid, page: PageParams) -> StoreResult<Page<Post>> {
        self.post_page("p.author_id = $1", author, page).await
    }

    async fn feed(&self, user: Uuid, page: PageParams) -> StoreResult<Page<Post>> {
        self.post_page(
            r#"(
                p.community_id IN (SELECT community_id FROM community_members WHERE user_id = $1)
                OR p.author_id IN (SELECT followee_id FROM follows WHERE follower_id = $1)
            )"#,
            user,
            page,
        )
        .await
    }

    async fn update_post(&self, id: Uuid, title: &str, body: &str) -> StoreResult<Post> {
        let result =
            sqlx::query("UPDATE posts SET title = $2, body = $3, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(title)
                .bind(body)
                .execute(&self.pool)
                .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        self.fetch_post(id).await?.ok_or(StoreError::NotFound)
    }

    async fn delete_post(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ReplyRepo for PgStore {
    async fn create_reply(&self, new: NewReply) -> StoreResult<Reply> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO replies (id, post_id, author_id, body, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            "#,
        )
        .bind(id)
        .bind(new.post_id)
        .bind(new.author_id)
        .bind(&new.body)
        .execute(&self.pool)
        .await?;
        self.fetch_reply(id).await?.ok_or(StoreError::NotFound)
    }

    async fn reply_by_id(&self, id: Uuid) -> StoreResult<Option<Reply>> {
        self.fetch_reply(id).await
    }

    async fn replies_for_post(&self, post: Uuid, page: PageParams) -> StoreResult<Page<Reply>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM replies WHERE post_id = $1")
            .bind(post)
            .fetch_one(&self.pool)
            .await?;
        let sql = format!(
            "{REPLY_SELECT} WHERE r.post_id = $1 ORDER BY r.created_at, r.id LIMIT $2 OFFSET $3"
        );
        let replies = sqlx::query_as::<_, Reply>(&sql)
            .bind(post)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;
        Ok(Page::new(replies, page, count(total)))
    }

    async fn update_reply(&self, id: Uuid, body: &str) -> StoreResult<Reply> {
        let result = sqlx::query("UPDATE replies SET body = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(body)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        self.fetch_reply(id).await?.ok_or(StoreError::NotFound)
    }

    async fn delete_reply(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM replies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
