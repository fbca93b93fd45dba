//! HTTP error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rentbook_auth::AuthError;
use rentbook_core::error::RentbookError;
use serde_json::json;

/// A request-level error carrying its HTTP status and client-facing
/// message. Bodies use the `{"error": "..."}` shape.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<RentbookError> for ApiError {
    fn from(err: RentbookError) -> Self {
        match err {
            RentbookError::Validation { message } => Self::new(StatusCode::BAD_REQUEST, message),
            RentbookError::AuthenticationFailed { reason } => {
                Self::new(StatusCode::UNAUTHORIZED, reason)
            }
            // Absent and foreign-owned are reported identically.
            RentbookError::NotFound { entity, .. } => Self::new(
                StatusCode::NOT_FOUND,
                format!("{entity} not found or permission denied"),
            ),
            RentbookError::AlreadyExists { entity } => {
                Self::new(StatusCode::CONFLICT, format!("{entity} already exists"))
            }
            RentbookError::Database(_) | RentbookError::Internal(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::TokenMissing => Self::new(StatusCode::UNAUTHORIZED, "Token missing"),
            AuthError::TokenExpired | AuthError::TokenInvalid(_) => {
                Self::new(StatusCode::UNAUTHORIZED, "Token invalid or expired")
            }
            AuthError::InvalidCredentials => {
                Self::new(StatusCode::UNAUTHORIZED, err.to_string())
            }
            AuthError::Crypto(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}
