use thiserror::Error;
use uuid::Uuid;

use crate::{error::HttpError, models::jobmodel::JobStatus};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Job {0} not found")]
    JobNotFound(Uuid),

    #[error("Bid {0} not found")]
    BidNotFound(Uuid),

    #[error("User {0} is not authorized to perform this action on job {1}")]
    UnauthorizedJobAccess(Uuid, Uuid),

    #[error("You have already placed a bid on this job")]
    DuplicateBid { job_id: Uuid, bidder_id: Uuid },

    #[error("This job is no longer open for hiring")]
    JobNotOpen(Uuid, JobStatus),

    #[error("Hiring limit reached: job {job_id} already has {quantity} accepted bids")]
    HiringLimitReached { job_id: Uuid, quantity: i32 },

    #[error("Bid {0} is no longer pending")]
    BidNotPending(Uuid),

    #[error("This job has already been completed")]
    AlreadyCompleted(Uuid),

    #[error("Reviews do not match the hired providers: {0}")]
    ReviewMismatch(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::JobNotFound(_) | ServiceError::BidNotFound(_) => {
                HttpError::not_found(error.to_string())
            }

            ServiceError::UnauthorizedJobAccess(_, _) => HttpError::unauthorized(error.to_string()),

            ServiceError::JobNotOpen(_, _)
            | ServiceError::BidNotPending(_)
            | ServiceError::ReviewMismatch(_)
            | ServiceError::Validation(_) => HttpError::bad_request(error.to_string()),

            ServiceError::DuplicateBid { .. }
            | ServiceError::HiringLimitReached { .. }
            | ServiceError::AlreadyCompleted(_) => HttpError::conflict(error.to_string()),

            ServiceError::Database(ref db_err) => {
                tracing::error!("database error: {}", db_err);
                HttpError::server_error("Something went wrong. Please try again.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn maps_service_errors_to_http_statuses() {
        let id = Uuid::nil();

        let cases = [
            (
                HttpError::from(ServiceError::JobNotFound(id)),
                StatusCode::NOT_FOUND,
            ),
            (
                HttpError::from(ServiceError::UnauthorizedJobAccess(id, id)),
                StatusCode::UNAUTHORIZED,
            ),
            (
                HttpError::from(ServiceError::JobNotOpen(id, JobStatus::Completed)),
                StatusCode::BAD_REQUEST,
            ),
            (
                HttpError::from(ServiceError::HiringLimitReached {
                    job_id: id,
                    quantity: 2,
                }),
                StatusCode::CONFLICT,
            ),
            (
                HttpError::from(ServiceError::DuplicateBid {
                    job_id: id,
                    bidder_id: id,
                }),
                StatusCode::CONFLICT,
            ),
            (
                HttpError::from(ServiceError::AlreadyCompleted(id)),
                StatusCode::CONFLICT,
            ),
            (
                HttpError::from(ServiceError::Database(sqlx::Error::RowNotFound)),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.status, expected, "{}", err.message);
        }
    }

    #[test]
    fn database_detail_is_not_leaked_to_clients() {
        let err = HttpError::from(ServiceError::Database(sqlx::Error::PoolTimedOut));
        assert!(!err.message.to_lowercase().contains("pool"));
    }
}
