// handler/jobs.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{biddb::BidExt, jobdb::JobExt, reviewdb::{NewReview, ReviewExt}},
    dtos::jobdtos::*,
    error::{ErrorMessage, HttpError},
    middleware::JWTAuthMiddeware,
    models::profilemodel::UserRole,
    AppState,
};

pub fn job_handler() -> Router {
    Router::new()
        .route("/", post(create_job).get(list_open_jobs))
        .route("/relevant", get(list_relevant_jobs))
        .route("/mine", get(list_my_jobs))
        .route("/:job_id", get(get_job_details))
        .route("/:job_id/bids", post(place_bid).get(list_bids))
        .route("/:job_id/bids/:bid_id/accept", put(accept_bid))
        .route("/:job_id/complete", put(complete_job))
        .route("/:job_id/reviews", get(list_job_reviews))
}

pub async fn create_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateJobDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if auth.user.role != UserRole::Seeker {
        return Err(HttpError::new(
            ErrorMessage::PermissionDenied.to_string(),
            StatusCode::FORBIDDEN,
        ));
    }

    let location_wkt = body.location_wkt();
    let job = app_state
        .job_service
        .create_job(
            auth.user.id,
            body.title,
            body.description,
            body.budget,
            body.deadline,
            body.category,
            body.quantity,
            body.is_remote,
            location_wkt,
            body.radius_meters,
        )
        .await?;

    Ok(Json(ApiResponse::success("Job posted successfully", job)))
}

pub async fn list_open_jobs(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<JobListQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let limit = query.limit.unwrap_or(20).min(100) as i64;
    let offset = (query.page.unwrap_or(1).saturating_sub(1)) as i64 * limit;

    let jobs = app_state
        .db_client
        .get_open_jobs(query.category, limit, offset)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success("Jobs retrieved successfully", jobs)))
}

/// Jobs inside the provider's service zones, matched by the database-side
/// geospatial function.
pub async fn list_relevant_jobs(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let jobs = app_state
        .db_client
        .get_relevant_jobs(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success("Jobs retrieved successfully", jobs)))
}

pub async fn list_my_jobs(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let jobs = app_state
        .db_client
        .get_jobs_by_owner(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success("Jobs retrieved successfully", jobs)))
}

pub async fn get_job_details(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let job = app_state
        .db_client
        .get_job_by_id(job_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Job not found"))?;

    Ok(Json(ApiResponse::success("Job retrieved successfully", job)))
}

pub async fn place_bid(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(job_id): Path<Uuid>,
    Json(body): Json<PlaceBidDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let bid = app_state
        .job_service
        .place_bid(job_id, auth.user.id, body.amount, body.proposal_text)
        .await?;

    Ok(Json(ApiResponse::success("Bid placed successfully", bid)))
}

/// Owner-only review screen: bids joined with bidder profiles, cheapest first.
pub async fn list_bids(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let job = app_state
        .db_client
        .get_job_by_id(job_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Job not found"))?;

    if job.owner_id != auth.user.id {
        return Err(HttpError::unauthorized(
            "Only the job owner can view bids".to_string(),
        ));
    }

    let bids = app_state
        .db_client
        .get_bids_for_job(job_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success("Bids retrieved successfully", bids)))
}

pub async fn accept_bid(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path((job_id, bid_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, HttpError> {
    let result = app_state
        .job_service
        .accept_bid(job_id, bid_id, auth.user.id)
        .await?;

    let message = if result.job_full {
        "Bid accepted; the job is now fully hired"
    } else {
        "Bid accepted"
    };

    Ok(Json(ApiResponse::success(message, result)))
}

pub async fn complete_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(job_id): Path<Uuid>,
    Json(body): Json<CompleteJobDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let reviews: Vec<NewReview> = body
        .reviews
        .into_iter()
        .map(|r| NewReview {
            reviewee_id: r.provider_id,
            rating: r.rating,
            comment: r.comment,
        })
        .collect();

    let job = app_state
        .job_service
        .complete_job(job_id, auth.user.id, reviews)
        .await?;

    Ok(Json(ApiResponse::success("Job completed successfully", job)))
}

pub async fn list_job_reviews(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let reviews = app_state
        .db_client
        .get_job_reviews(job_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Reviews retrieved successfully",
        reviews,
    )))
}
