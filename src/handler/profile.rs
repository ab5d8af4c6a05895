// handler/profile.rs
use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{delete, get},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::profiledb::ProfileExt,
    dtos::{jobdtos::ApiResponse, profiledtos::*},
    error::HttpError,
    middleware::JWTAuthMiddeware,
    AppState,
};

pub fn profile_handler() -> Router {
    Router::new()
        .route("/", get(get_profile).put(update_profile))
        .route("/zones", get(list_zones).post(add_zone))
        .route("/zones/:zone_id", delete(delete_zone))
}

pub async fn get_profile(
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    Ok(Json(ApiResponse::success(
        "Profile retrieved successfully",
        auth.user,
    )))
}

pub async fn update_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<UpdateProfileDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let profile = app_state
        .db_client
        .update_profile(
            auth.user.id,
            body.full_name,
            body.avatar_url,
            body.role,
            body.preferences,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Profile updated successfully",
        profile,
    )))
}

pub async fn list_zones(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let zones = app_state
        .db_client
        .get_provider_locations(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Service zones retrieved successfully",
        zones,
    )))
}

pub async fn add_zone(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<AddZoneDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let zone = app_state
        .db_client
        .add_provider_location(auth.user.id, body.location_wkt(), body.radius_meters)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success("Service zone added", zone)))
}

pub async fn delete_zone(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(zone_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let deleted = app_state
        .db_client
        .delete_provider_location(zone_id, auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if deleted == 0 {
        return Err(HttpError::not_found("Service zone not found"));
    }

    Ok(Json(ApiResponse::success("Service zone deleted", ())))
}
