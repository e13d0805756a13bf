//! Direct messages

use async_trait::async_trait;
use uuid::Uuid;

use super::{count, PgStore};
use crate::backend::store::models::{ChatMessage, ChatSummary, NewChatMessage};
use crate::backend::store::repos::ChatRepo;
use crate::backend::store::{StoreError, StoreResult};
use crate::shared::{Page, PageParams};

const MESSAGE_SELECT: &str = r#"
    SELECT m.id, m.sender_id, s.username AS sender_username,
           m.recipient_id, r.username AS recipient_username,
           m.content, m.created_at
    FROM chat_messages m
    JOIN users s ON s.id = m.sender_id
    JOIN users r ON r.id = m.recipient_id
"#;

#[derive(sqlx::FromRow)]
struct SummaryRow {
    partner_id: Uuid,
    partner_username: String,
    #[sqlx(flatten)]
    message: ChatMessage,
}

#[async_trait]
impl ChatRepo for PgStore {
    async fn save_message(&self, new: NewChatMessage) -> StoreResult<ChatMessage> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO chat_messages (id, sender_id, recipient_id, content, created_at)
            VALUES ($1, $2, $3, $4, NOW())
            "#,
        )
        .bind(id)
        .bind(new.sender_id)
        .bind(new.recipient_id)
        .bind(&new.content)
        .execute(&self.pool)
        .await?;

        let sql = format!("{MESSAGE_SELECT} WHERE m.id = $1");
        sqlx::query_as::<_, ChatMessage>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn conversation(
        &self,
        a: Uuid,
        b: Uuid,
        page: PageParams,
    ) -> StoreResult<Page<ChatMessage>> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM chat_messages
            WHERE (sender_id = $1 AND recipient_id = $2)
               OR (sender_id = $2 AND recipient_id = $1)
            "#,
        )
        .bind(a)
        .bind(b)
        .fetch_one(&self.pool)
        .await?;

        let sql = format!(
            r#"{MESSAGE_SELECT}
            WHERE (m.sender_id = $1 AND m.recipient_id = $2)
               OR (m.sender_id = $2 AND m.recipient_id = $1)
            ORDER BY m.created_at DESC, m.id DESC
            LIMIT $3 OFFSET $4
            "#
        );
        let messages = sqlx::query_as::<_, ChatMessage>(&sql)
            .bind(a)
            .bind(b)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;
        Ok(Page::new(messages, page, count(total)))
    }

    async fn recent_chats(&self, user: Uuid) -> StoreResult<Vec<ChatSummary>> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT * FROM (
                SELECT DISTINCT ON (partner_id)
                       CASE WHEN m.sender_id = $1 THEN m.recipient_id ELSE m.sender_id END AS partner_id,
                       CASE WHEN m.sender_id = $1 THEN r.username ELSE s.username END AS partner_username,
                       m.id, m.sender_id, s.username AS sender_username,
                       m.recipient_id, r.username AS recipient_username,
                       m.content, m.created_at
                FROM chat_messages m
                JOIN users s ON s.id = m.sender_id
                JOIN users r ON r.id = m.recipient_id
                WHERE m.sender_id = $1 OR m.recipient_id = $1
                ORDER BY partner_id, m.created_at DESC, m.id DESC
            ) latest
            ORDER BY created_at DESC
            "#,
        )
        .bind(user)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| ChatSummary {
                partner_id: row.partner_id,
                partner_username: row.partner_username,
                last_message: row.message,
            })
            .collect())
    }
}
