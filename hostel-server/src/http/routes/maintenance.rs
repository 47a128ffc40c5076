//! Maintenance request endpoints
//!
//! Status updates accept `status` and `resolved_date` from the query
//! string, a JSON body, or both. Body fields win when both are given.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use chrono::{NaiveDate, Utc};

use crate::db::MaintenanceRepo;
use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson, ValidQuery};
use crate::http::server::AppState;
use crate::models::{MaintenanceRequest, MaintenanceRequestCreate, MaintenanceUpdate};

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Parse an optional JSON body. Empty or whitespace-only bodies are absent.
fn update_from_body(body: &[u8]) -> Result<Option<MaintenanceUpdate>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| ApiError::Malformed {
            message: format!("Failed to parse the request body as JSON: {}", e),
        })
}

/// GET /maintenance - list requests, most recently reported first
async fn list_requests(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MaintenanceRequest>>, ApiError> {
    let requests = MaintenanceRepo::new(&state.pool).list().await?;
    Ok(Json(requests))
}

/// POST /maintenance - report an issue
async fn create_request(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<MaintenanceRequestCreate>,
) -> Result<(StatusCode, Json<MaintenanceRequest>), ApiError> {
    let request = req.validate(today())?;
    let created = MaintenanceRepo::new(&state.pool).create(request).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// PATCH /maintenance/{id} - change status and resolution date
async fn update_request(
    State(state): State<Arc<AppState>>,
    ValidId(request_id): ValidId,
    ValidQuery(query): ValidQuery<MaintenanceUpdate>,
    body: Bytes,
) -> Result<Json<MaintenanceRequest>, ApiError> {
    let update = match update_from_body(&body)? {
        Some(from_body) => query.merge(from_body),
        None => query,
    };
    let change = update.validate(today())?;

    let updated = MaintenanceRepo::new(&state.pool)
        .update_status(request_id, change)
        .await?;

    Ok(Json(updated))
}

/// Maintenance routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/maintenance", get(list_requests).post(create_request))
        .route("/maintenance/{id}", patch(update_request))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MaintenanceStatus;

    #[test]
    fn blank_body_is_absent() {
        assert!(update_from_body(b"").unwrap().is_none());
        assert!(update_from_body(b" \n ").unwrap().is_none());
    }

    #[test]
    fn json_body_parsed() {
        let update = update_from_body(br#"{"status": "In Progress"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(update.status, Some(MaintenanceStatus::InProgress));
        assert_eq!(update.resolved_date, None);
    }

    #[test]
    fn garbage_body_is_malformed() {
        assert!(matches!(
            update_from_body(b"status=Resolved"),
            Err(ApiError::Malformed { .. })
        ));
    }
}
