use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, PartialEq)]
pub enum ErrorMessage {
    TokenNotProvided,
    InvalidToken,
    UserNoLongerExist,
    UserNotAuthenticated,
    PermissionDenied,
    ServerError,
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ErrorMessage::TokenNotProvided => "You are not logged in, please provide a token",
            ErrorMessage::InvalidToken => "Authentication token is invalid or expired",
            ErrorMessage::UserNoLongerExist => "User belonging to this token no longer exists",
            ErrorMessage::UserNotAuthenticated => "Authentication required. Please log in.",
            ErrorMessage::PermissionDenied => "You are not allowed to perform this action",
            ErrorMessage::ServerError => "Server error. Please try again later",
        };
        write!(f, "{}", msg)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct HttpError {
    pub message: String,
    pub status: StatusCode,
}

impl HttpError {
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        HttpError {
            message: message.into(),
            status,
        }
    }

    pub fn server_error(message: impl Into<String>) -> Self {
        HttpError::new(message, StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        HttpError::new(message, StatusCode::BAD_REQUEST)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        HttpError::new(message, StatusCode::UNAUTHORIZED)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        HttpError::new(message, StatusCode::NOT_FOUND)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        HttpError::new(message, StatusCode::CONFLICT)
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HttpError: message: {}, status: {}",
            self.message, self.status
        )
    }
}

impl std::error::Error for HttpError {}

impl IntoResponse for HttpError {
    fn into_response(self) -> axum::response::Response {
        let status = if self.status.is_client_error() {
            "fail"
        } else {
            "error"
        };

        let body = Json(ErrorResponse {
            status: status.to_string(),
            message: self.message,
        });

        (self.status, body).into_response()
    }
}
