//! Route handlers organized by resource

use std::sync::Arc;

use axum::Router;

use super::server::AppState;

pub mod bookings;
pub mod guests;
pub mod maintenance;
pub mod payments;
pub mod root;
pub mod rooms;

/// Resource routes, nested under `/api`
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(guests::router())
        .merge(rooms::router())
        .merge(bookings::router())
        .merge(payments::router())
        .merge(maintenance::router())
}
