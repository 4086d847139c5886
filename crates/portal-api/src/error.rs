//! API error type and its HTTP mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use portal_core::error::DomainError;

use crate::response::ErrorResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String, Option<Value>),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidPosition(_) => ApiError::InvalidPosition(
                "Invalid position. Must be: header, sidebar, or footer".to_string(),
            ),
            DomainError::ValidationError(msg) => ApiError::Validation(msg),
            DomainError::MenuNotFound(_) => ApiError::NotFound("Menu not found".to_string()),
            DomainError::FixedMenuProtected(_) => {
                ApiError::Forbidden("Cannot delete fixed menu".to_string(), None)
            }
            DomainError::FixedDescendantProtected { id, descendant_id } => ApiError::Forbidden(
                "Cannot delete menu with a fixed descendant".to_string(),
                Some(json!({ "id": id, "descendant_id": descendant_id })),
            ),
            DomainError::DatabaseError(msg) => ApiError::DatabaseError(msg),
            DomainError::InternalError(msg) => ApiError::InternalError(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            ApiError::InvalidPosition(msg) => {
                tracing::warn!("Invalid position: {}", msg);
                (StatusCode::BAD_REQUEST, "invalid_position", msg, None)
            }
            ApiError::Validation(msg) => {
                tracing::warn!("Validation error: {}", msg);
                (StatusCode::BAD_REQUEST, "validation_error", msg, None)
            }
            ApiError::InvalidId(msg) => {
                tracing::warn!("Invalid id: {}", msg);
                (StatusCode::BAD_REQUEST, "invalid_id", "Invalid menu ID".to_string(), None)
            }
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, "not_found", msg, None)
            }
            ApiError::Forbidden(msg, details) => {
                tracing::warn!("Forbidden: {}", msg);
                (StatusCode::FORBIDDEN, "forbidden", msg, details)
            }
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", msg, None)
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg, None)
            }
        };

        (status, Json(ErrorResponse::new(code, message, details))).into_response()
    }
}
