// db/notificationdb.rs
use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::notificationmodel::{Notification, NotificationType};

#[async_trait]
pub trait NotificationExt {
    #[allow(clippy::too_many_arguments)]
    async fn create_notification(
        &self,
        user_id: Uuid,
        actor_id: Option<Uuid>,
        notification_type: NotificationType,
        title: String,
        body: String,
        resource_id: Option<Uuid>,
        resource_url: Option<String>,
        metadata: Option<serde_json::Value>,
    ) -> Result<Notification, Error>;

    async fn get_notifications(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, Error>;

    async fn mark_notification_read(&self, notification_id: Uuid, user_id: Uuid)
        -> Result<u64, Error>;

    async fn unread_notification_count(&self, user_id: Uuid) -> Result<i64, Error>;
}

#[async_trait]
impl NotificationExt for DBClient {
    async fn create_notification(
        &self,
        user_id: Uuid,
        actor_id: Option<Uuid>,
        notification_type: NotificationType,
        title: String,
        body: String,
        resource_id: Option<Uuid>,
        resource_url: Option<String>,
        metadata: Option<serde_json::Value>,
    ) -> Result<Notification, Error> {
        sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications
            (user_id, actor_id, notification_type, title, body, resource_id, resource_url, metadata)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, user_id, actor_id, notification_type, title, body,
                      resource_id, resource_url, is_read, metadata, created_at
            "#,
        )
        .bind(user_id)
        .bind(actor_id)
        .bind(notification_type)
        .bind(title)
        .bind(body)
        .bind(resource_id)
        .bind(resource_url)
        .bind(metadata)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_notifications(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, Error> {
        sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, user_id, actor_id, notification_type, title, body,
                   resource_id, resource_url, is_read, metadata, created_at
            FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn mark_notification_read(
        &self,
        notification_id: Uuid,
        user_id: Uuid,
    ) -> Result<u64, Error> {
        let result = sqlx::query(
            r#"
            UPDATE notifications
            SET is_read = TRUE
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(notification_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn unread_notification_count(&self, user_id: Uuid) -> Result<i64, Error> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM notifications
            WHERE user_id = $1 AND is_read = FALSE
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }
}
