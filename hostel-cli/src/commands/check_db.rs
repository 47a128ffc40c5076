//! Database connectivity check
//!
//! Prints the effective connection settings (password masked), connects,
//! and reports the server version. Exits with code 2 on failure.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use hostel_server::db::{create_pool, server_version};
use hostel_server::DbConfig;

/// Exit code reported when the database cannot be reached
const FAILURE_EXIT_CODE: u8 = 2;

/// Arguments for the check-db command
#[derive(Parser, Debug)]
pub struct CheckDbArgs {
    /// Database URL (overrides the DB_* variables)
    #[arg(long)]
    pub database_url: Option<String>,
}

async fn connect_and_query(config: &DbConfig) -> Result<String> {
    let pool = create_pool(config)
        .await
        .context("Failed to connect")?;
    let version = server_version(&pool)
        .await
        .context("Failed to query server version")?;
    pool.close().await;
    Ok(version)
}

/// Run the connectivity check
pub async fn run_check_db(args: CheckDbArgs) -> Result<ExitCode> {
    let config = match super::db_config(args.database_url) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return Ok(ExitCode::from(FAILURE_EXIT_CODE));
        }
    };

    println!("Database config: {}", config.display_masked());

    match connect_and_query(&config).await {
        Ok(version) => {
            println!("Connection successful. PostgreSQL server version: {}", version);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::error!("Database check failed: {:#}", e);
            eprintln!("Connection failed: {:#}", e);
            Ok(ExitCode::from(FAILURE_EXIT_CODE))
        }
    }
}
