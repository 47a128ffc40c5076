//! Guest endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::db::GuestRepo;
use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson};
use crate::http::server::AppState;
use crate::models::{Guest, GuestCreate};

/// GET /guests - list all guests
async fn list_guests(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Guest>>, ApiError> {
    let guests = GuestRepo::new(&state.pool).list().await?;
    Ok(Json(guests))
}

/// POST /guests - register a guest
async fn create_guest(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<GuestCreate>,
) -> Result<(StatusCode, Json<Guest>), ApiError> {
    let guest = req.validate()?;
    let created = GuestRepo::new(&state.pool).create(guest).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /guests/{id} - get a single guest
async fn get_guest(
    State(state): State<Arc<AppState>>,
    ValidId(guest_id): ValidId,
) -> Result<Json<Guest>, ApiError> {
    let guest = GuestRepo::new(&state.pool).get(guest_id).await?;
    Ok(Json(guest))
}

/// Guest routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/guests", get(list_guests).post(create_guest))
        .route("/guests/{id}", get(get_guest))
}
