//! hostel-server: REST backend for a hostel management dashboard
//!
//! Records guests, rooms, bookings, payments and maintenance requests in
//! PostgreSQL and serves them as JSON.
//!
//! # Architecture
//!
//! - `models`: validated request types and stored records
//! - `db`: pool, transaction gateway, schema provisioning, repositories
//! - `http`: axum routes, extractors and error mapping
//! - `config`: database settings from the environment

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{ConfigError, DbConfig};
pub use db::{provision, DbError, SchemaError};
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
