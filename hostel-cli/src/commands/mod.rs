//! Command implementations for hostelctl

pub mod check_db;
pub mod init_db;
pub mod serve;

use anyhow::{Context, Result};
use hostel_server::DbConfig;

pub use check_db::run_check_db;
pub use init_db::run_init_db;
pub use serve::run_serve;

/// Build the database config from the environment, with an optional URL override.
fn db_config(database_url: Option<String>) -> Result<DbConfig> {
    let config = DbConfig::from_env().context("Invalid database configuration")?;
    Ok(match database_url {
        Some(url) => config.with_url(url),
        None => config,
    })
}
