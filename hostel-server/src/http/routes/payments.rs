//! Payment endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::db::PaymentRepo;
use crate::http::error::ApiError;
use crate::http::extractors::ValidJson;
use crate::http::server::AppState;
use crate::models::{Payment, PaymentCreate};

/// GET /payments - list payments, newest first
async fn list_payments(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Payment>>, ApiError> {
    let payments = PaymentRepo::new(&state.pool).list().await?;
    Ok(Json(payments))
}

/// POST /payments - record a payment against a booking
async fn create_payment(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<PaymentCreate>,
) -> Result<(StatusCode, Json<Payment>), ApiError> {
    let payment = req.validate()?;
    let created = PaymentRepo::new(&state.pool).create(payment).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Payment routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/payments", get(list_payments).post(create_payment))
}
