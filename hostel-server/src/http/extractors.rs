//! Custom Axum extractors
//!
//! Wrap the stock extractors so every rejection becomes an [`ApiError`]
//! with the usual JSON body instead of axum's plain-text default.

use axum::extract::{FromRequest, FromRequestParts, Path, Query};
use axum::http::request::Parts;
use axum::Json;

use super::error::ApiError;
use crate::models::ValidationError;

/// JSON body extractor with JSON error responses
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ValidJson<T>(pub T);

/// Query string extractor with JSON error responses
#[derive(FromRequestParts)]
#[from_request(via(Query), rejection(ApiError))]
pub struct ValidQuery<T>(pub T);

/// Extract and validate a numeric record id from path
pub struct ValidId(pub i64);

impl<S> FromRequestParts<S> for ValidId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state).await?;

        let id: i64 = id.trim().parse().map_err(|_| {
            ApiError::Validation(ValidationError::InvalidFormat {
                field: "id",
                reason: "must be a positive integer",
            })
        })?;

        if id <= 0 {
            return Err(ApiError::Validation(ValidationError::InvalidFormat {
                field: "id",
                reason: "must be a positive integer",
            }));
        }

        Ok(Self(id))
    }
}
