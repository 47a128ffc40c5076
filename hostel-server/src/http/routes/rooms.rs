//! Room endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::db::{BookingRepo, RoomRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson};
use crate::http::server::AppState;
use crate::models::{Booking, Room, RoomCreate};

/// GET /rooms - list all rooms
async fn list_rooms(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Room>>, ApiError> {
    let rooms = RoomRepo::new(&state.pool).list().await?;
    Ok(Json(rooms))
}

/// POST /rooms - add a room
async fn create_room(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<RoomCreate>,
) -> Result<(StatusCode, Json<Room>), ApiError> {
    let room = req.validate()?;
    let created = RoomRepo::new(&state.pool).create(room).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /rooms/{id} - get a single room
async fn get_room(
    State(state): State<Arc<AppState>>,
    ValidId(room_id): ValidId,
) -> Result<Json<Room>, ApiError> {
    let room = RoomRepo::new(&state.pool).get(room_id).await?;
    Ok(Json(room))
}

/// GET /rooms/{id}/bookings - booking history of a room
async fn room_bookings(
    State(state): State<Arc<AppState>>,
    ValidId(room_id): ValidId,
) -> Result<Json<Vec<Booking>>, ApiError> {
    // 404 for unknown rooms rather than an empty list
    RoomRepo::new(&state.pool).get(room_id).await?;
    let bookings = BookingRepo::new(&state.pool).list_for_room(room_id).await?;
    Ok(Json(bookings))
}

/// Room routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/rooms", get(list_rooms).post(create_room))
        .route("/rooms/{id}", get(get_room))
        .route("/rooms/{id}/bookings", get(room_bookings))
}
