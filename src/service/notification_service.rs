// service/notification_service.rs
use std::sync::Arc;

use num_traits::ToPrimitive;
use uuid::Uuid;

use crate::{
    db::{db::DBClient, notificationdb::NotificationExt},
    models::{jobmodel::*, notificationmodel::NotificationType},
};

/// Writes notification rows as a side effect of marketplace events. Delivery
/// (push/email) and real-time fan-out are external collaborators; failing to
/// store a notification never fails the operation that triggered it.
#[derive(Debug, Clone)]
pub struct NotificationService {
    db_client: Arc<DBClient>,
}

impl NotificationService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    pub async fn notify_bid_placed(&self, job: &Job, bid: &Bid) {
        let amount = bid.amount.to_f64().unwrap_or(0.0);

        self.store(
            job.owner_id,
            Some(bid.bidder_id),
            NotificationType::Bid,
            "New bid received".to_string(),
            format!("A new bid of ₹{:.2} was placed on \"{}\"", amount, job.title),
            Some(job.id),
            Some(format!("/jobs/{}/bids", job.id)),
            Some(serde_json::json!({ "bid_id": bid.id, "amount": amount })),
        )
        .await;
    }

    pub async fn notify_bid_accepted(&self, job: &Job, bid: &Bid) {
        self.store(
            bid.bidder_id,
            Some(job.owner_id),
            NotificationType::JobUpdate,
            "You were hired".to_string(),
            format!("Your bid on \"{}\" was accepted", job.title),
            Some(job.id),
            Some(format!("/messages/{}", job.id)),
            None,
        )
        .await;
    }

    pub async fn notify_bids_rejected(&self, job: &Job, bidders: &[Uuid]) {
        for bidder_id in bidders {
            self.store(
                *bidder_id,
                Some(job.owner_id),
                NotificationType::JobUpdate,
                "Job filled".to_string(),
                format!("\"{}\" has been filled by other providers", job.title),
                Some(job.id),
                Some(format!("/jobs/{}", job.id)),
                None,
            )
            .await;
        }
    }

    pub async fn notify_job_completed(&self, job: &Job, providers: &[Uuid]) {
        for provider_id in providers {
            self.store(
                *provider_id,
                Some(job.owner_id),
                NotificationType::JobUpdate,
                "Job completed".to_string(),
                format!("\"{}\" was marked as {}", job.title, job.status.to_str()),
                Some(job.id),
                Some(format!("/jobs/{}", job.id)),
                None,
            )
            .await;
        }
    }

    pub async fn notify_message_sent(&self, job: &Job, recipient_id: Uuid, sender_id: Uuid) {
        self.store(
            recipient_id,
            Some(sender_id),
            NotificationType::Message,
            "New message".to_string(),
            format!("New message in \"{}\"", job.title),
            Some(job.id),
            Some(format!("/messages/{}", job.id)),
            None,
        )
        .await;
    }

    #[allow(clippy::too_many_arguments)]
    async fn store(
        &self,
        user_id: Uuid,
        actor_id: Option<Uuid>,
        notification_type: NotificationType,
        title: String,
        body: String,
        resource_id: Option<Uuid>,
        resource_url: Option<String>,
        metadata: Option<serde_json::Value>,
    ) {
        if let Err(e) = self
            .db_client
            .create_notification(
                user_id,
                actor_id,
                notification_type,
                title,
                body,
                resource_id,
                resource_url,
                metadata,
            )
            .await
        {
            tracing::warn!("failed to store notification for user {}: {}", user_id, e);
        }
    }
}
