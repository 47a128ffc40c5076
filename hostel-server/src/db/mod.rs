//! Database layer - connection pool, gateway, schema and repositories
//!
//! # Design Principles
//!
//! - Connection pool sized from config - no Arc<Mutex<Connection>>
//! - Every connection and transaction is scoped and released on all paths
//! - Rely on DB constraints, handle conflicts - no check-then-insert
//! - Transactions for multi-step operations

pub mod error;
pub mod gateway;
pub mod pool;
pub mod repos;
pub mod schema;

pub use error::DbError;
pub use gateway::{with_connection, with_transaction, Tx};
pub use pool::{create_lazy_pool, create_pool, server_version, PoolError};
pub use repos::*;
pub use schema::{create_tables, ensure_database, provision, SchemaError};
