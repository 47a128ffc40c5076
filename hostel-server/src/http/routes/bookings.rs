//! Booking endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::db::BookingRepo;
use crate::http::error::ApiError;
use crate::http::extractors::ValidJson;
use crate::http::server::AppState;
use crate::models::{Booking, BookingCreate};

/// GET /bookings - list all bookings
async fn list_bookings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Booking>>, ApiError> {
    let bookings = BookingRepo::new(&state.pool).list().await?;
    Ok(Json(bookings))
}

/// POST /bookings - book an available room and mark it occupied
async fn create_booking(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<BookingCreate>,
) -> Result<(StatusCode, Json<Booking>), ApiError> {
    let booking = req.validate()?;
    let created = BookingRepo::new(&state.pool).create(booking).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Booking routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/bookings", get(list_bookings).post(create_booking))
}
