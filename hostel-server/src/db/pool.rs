//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits taken from [`DbConfig`].

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::{ConfigError, DbConfig};

use super::error::DbError;
use super::gateway::with_connection;

/// Pool creation error
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to connect to database: {0}")]
    Connect(#[from] sqlx::Error),
}

/// Create a PostgreSQL connection pool.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the first
/// connection fails.
///
/// # Example
///
/// ```ignore
/// let config = DbConfig::from_env()?;
/// let pool = create_pool(&config).await?;
/// ```
pub async fn create_pool(config: &DbConfig) -> Result<PgPool, PoolError> {
    let options = config.connect_options()?;

    tracing::debug!(
        max_connections = config.max_connections,
        target = %config.display_masked(),
        "Creating connection pool"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Create a pool that connects on first use.
///
/// Nothing touches the network until a query runs.
pub fn create_lazy_pool(config: &DbConfig) -> Result<PgPool, ConfigError> {
    let options = config.connect_options()?;
    Ok(PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_lazy_with(options))
}

/// Report the connected server's version string.
pub async fn server_version(pool: &PgPool) -> Result<String, DbError> {
    with_connection(pool, |conn| {
        Box::pin(async move {
            let (version,): (String,) = sqlx::query_as("SHOW server_version")
                .fetch_one(&mut *conn)
                .await?;
            Ok::<_, DbError>(version)
        })
    })
    .await
}
