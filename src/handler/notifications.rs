// handler/notifications.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    routing::{get, put},
    Extension, Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::{
    db::notificationdb::NotificationExt,
    dtos::jobdtos::ApiResponse,
    error::HttpError,
    middleware::JWTAuthMiddeware,
    AppState,
};

pub fn notification_handler() -> Router {
    Router::new()
        .route("/", get(list_notifications))
        .route("/unread-count", get(unread_count))
        .route("/:notification_id/read", put(mark_read))
}

#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

pub async fn list_notifications(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let limit = query.limit.unwrap_or(20).min(100) as i64;
    let offset = (query.page.unwrap_or(1).saturating_sub(1)) as i64 * limit;

    let notifications = app_state
        .db_client
        .get_notifications(auth.user.id, limit, offset)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Notifications retrieved successfully",
        notifications,
    )))
}

pub async fn unread_count(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let count = app_state
        .db_client
        .unread_notification_count(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Unread count retrieved successfully",
        json!({ "count": count }),
    )))
}

pub async fn mark_read(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(notification_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let updated = app_state
        .db_client
        .mark_notification_read(notification_id, auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if updated == 0 {
        return Err(HttpError::not_found("Notification not found"));
    }

    Ok(Json(ApiResponse::success("Notification marked as read", ())))
}
