//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes:
//!
//! ```json
//! {"error": "not_found", "detail": "room '7' not found"}
//! ```

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Body, query or path could not be parsed (400)
    Malformed { message: String },

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Unique constraint violated (400)
    Duplicate { constraint: String },

    /// Request conflicts with current state, e.g. room already occupied (409)
    Conflict { message: String },

    /// Error reported by the database server (400)
    Storage(DbError),

    /// Pool, connection or other internal failure (500, logged)
    Internal(DbError),
}

impl ApiError {
    fn status_and_body(&self) -> (StatusCode, &'static str, String) {
        match self {
            Self::Validation(e) => (StatusCode::BAD_REQUEST, "validation_error", e.to_string()),
            Self::Malformed { message } => {
                (StatusCode::BAD_REQUEST, "validation_error", message.clone())
            }
            Self::NotFound { resource, id } if id.is_empty() => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("referenced {} not found", resource),
            ),
            Self::NotFound { resource, id } => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("{} '{}' not found", resource, id),
            ),
            Self::Duplicate { constraint } => (
                StatusCode::BAD_REQUEST,
                "duplicate",
                format!("a record with the same value already exists ({})", constraint),
            ),
            Self::Conflict { message } => (StatusCode::CONFLICT, "conflict", message.clone()),
            Self::Storage(e) => (StatusCode::BAD_REQUEST, "storage_error", e.to_string()),
            Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "an internal error occurred".to_owned(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Internal(e) => tracing::error!("Internal error: {}", e),
            Self::Storage(e) => tracing::warn!("Storage error: {}", e),
            _ => {}
        }

        let (status, kind, detail) = self.status_and_body();
        let body = json!({
            "error": kind,
            "detail": detail
        });

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::MissingReference { resource } => Self::NotFound {
                resource,
                id: String::new(),
            },
            DbError::Duplicate { constraint } => Self::Duplicate { constraint },
            DbError::RoomUnavailable { .. } => Self::Conflict {
                message: e.to_string(),
            },
            DbError::Invalid(v) => Self::Validation(v),
            e if e.is_database_reported() => Self::Storage(e),
            e => Self::Internal(e),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Malformed {
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Malformed {
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Malformed {
            message: rejection.body_text(),
        }
    }
}
