// db/messagedb.rs
use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::messagemodel::{Message, MessageType};

#[async_trait]
pub trait MessageExt {
    async fn create_message(
        &self,
        job_id: Uuid,
        sender_id: Uuid,
        content: String,
        message_type: MessageType,
    ) -> Result<Message, Error>;

    async fn get_messages_for_job(
        &self,
        job_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Message>, Error>;
}

#[async_trait]
impl MessageExt for DBClient {
    async fn create_message(
        &self,
        job_id: Uuid,
        sender_id: Uuid,
        content: String,
        message_type: MessageType,
    ) -> Result<Message, Error> {
        sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (job_id, sender_id, content, message_type)
            VALUES ($1, $2, $3, $4)
            RETURNING id, job_id, sender_id, content, message_type,
                      read_at, deleted_at, created_at
            "#,
        )
        .bind(job_id)
        .bind(sender_id)
        .bind(content)
        .bind(message_type)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_messages_for_job(
        &self,
        job_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Message>, Error> {
        sqlx::query_as::<_, Message>(
            r#"
            SELECT id, job_id, sender_id, content, message_type,
                   read_at, deleted_at, created_at
            FROM messages
            WHERE job_id = $1 AND deleted_at IS NULL
            ORDER BY created_at ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(job_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }
}
