//! API error handling

use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use core_kernel::{FieldError, PortError};

use crate::auth::AuthError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        fields: Vec<FieldError>,
    },
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl ApiError {
    pub fn unauthorized() -> Self {
        ApiError::Unauthorized("Authentication credentials were not provided.".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message, details) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::Internal(msg) => {
                error!(%msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", "Internal server error".to_string(), None)
            }
            ApiError::Database(msg) => {
                error!(%msg, "Storage failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", "Storage unavailable".to_string(), None)
            }
            ApiError::Validation { message, fields } => {
                let details = fields.iter().map(ToString::to_string).collect();
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", message, Some(details))
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<PortError> for ApiError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { entity_type, .. } => ApiError::NotFound(format!("{} not found", entity_type)),
            PortError::Validation { message, fields } => ApiError::Validation { message, fields },
            PortError::Conflict { message } => ApiError::Conflict(message),
            PortError::Unauthorized { message } => ApiError::Unauthorized(message),
            PortError::Connection { message, .. } => ApiError::Database(message),
            PortError::Internal { message, .. } => ApiError::Internal(message),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Unauthorized(err.to_string())
    }
}

/// Malformed bodies, including bad dates, decimals and unknown statuses,
/// are reported as validation errors.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => {
                let message = e.body_text();
                ApiError::Validation {
                    fields: vec![FieldError::new("body", message.clone())],
                    message,
                }
            }
            other => ApiError::BadRequest(other.body_text()),
        }
    }
}

/// `Json` extractor whose rejections are [`ApiError`]s
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_errors_map_to_status() {
        let cases = [
            (PortError::not_found("Claim", "CLM-1"), StatusCode::NOT_FOUND),
            (PortError::conflict("taken"), StatusCode::CONFLICT),
            (PortError::validation_field("policy", "bad"), StatusCode::UNPROCESSABLE_ENTITY),
            (PortError::unauthorized("no"), StatusCode::UNAUTHORIZED),
            (PortError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR),
            (PortError::connection("down"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, status) in cases {
            assert_eq!(ApiError::from(error).into_response().status(), status);
        }
    }

    #[test]
    fn test_not_found_hides_the_id() {
        let ApiError::NotFound(message) = ApiError::from(PortError::not_found("Policy", "POL-123")) else {
            panic!("expected NotFound");
        };
        assert_eq!(message, "Policy not found");
    }
}
