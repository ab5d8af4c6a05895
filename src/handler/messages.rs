// handler/messages.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{biddb::BidExt, jobdb::JobExt, messagedb::MessageExt},
    dtos::jobdtos::ApiResponse,
    error::HttpError,
    middleware::JWTAuthMiddeware,
    models::{jobmodel::Job, messagemodel::MessageType},
    AppState,
};

pub fn message_handler() -> Router {
    Router::new().route("/:job_id", get(get_messages).post(send_message))
}

#[derive(Debug, Deserialize, Validate)]
pub struct SendMessageDto {
    #[validate(length(min = 1, max = 4000, message = "Message cannot be empty"))]
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Chat participants are the job owner and the hired (accepted-bid) providers.
async fn require_participant(
    app_state: &AppState,
    job_id: Uuid,
    user_id: Uuid,
) -> Result<(Job, Vec<Uuid>), HttpError> {
    let job = app_state
        .db_client
        .get_job_by_id(job_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Job not found"))?;

    let providers = app_state
        .db_client
        .get_accepted_provider_ids(job_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if job.owner_id != user_id && !providers.contains(&user_id) {
        return Err(HttpError::unauthorized(
            "You are not a participant in this conversation".to_string(),
        ));
    }

    Ok((job, providers))
}

pub async fn get_messages(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(job_id): Path<Uuid>,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, HttpError> {
    require_participant(&app_state, job_id, auth.user.id).await?;

    let limit = query.limit.unwrap_or(50).min(200) as i64;
    let offset = (query.page.unwrap_or(1).saturating_sub(1)) as i64 * limit;

    let messages = app_state
        .db_client
        .get_messages_for_job(job_id, limit, offset)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Messages retrieved successfully",
        messages,
    )))
}

pub async fn send_message(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(job_id): Path<Uuid>,
    Json(body): Json<SendMessageDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let content = body.content.trim().to_string();
    if content.is_empty() {
        return Err(HttpError::bad_request("Message cannot be empty".to_string()));
    }

    let (job, providers) = require_participant(&app_state, job_id, auth.user.id).await?;

    let message = app_state
        .db_client
        .create_message(job_id, auth.user.id, content, MessageType::Text)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    // Bump the job timestamp so the conversation bubbles to the top of the
    // list; not worth failing the send over.
    if let Err(e) = app_state.db_client.touch_job_updated_at(job_id).await {
        tracing::warn!("failed to touch job {} after message: {}", job_id, e);
    }

    for recipient in std::iter::once(job.owner_id)
        .chain(providers.iter().copied())
        .filter(|id| *id != auth.user.id)
    {
        app_state
            .notification_service
            .notify_message_sent(&job, recipient, auth.user.id)
            .await;
    }

    Ok(Json(ApiResponse::success("Message sent", message)))
}
