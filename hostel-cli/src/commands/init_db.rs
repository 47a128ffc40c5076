//! Database provisioning command

use anyhow::{Context, Result};
use clap::Parser;

use hostel_server::db::provision;

/// Arguments for the init-db command
#[derive(Parser, Debug)]
pub struct InitDbArgs {
    /// Database URL (overrides the DB_* variables)
    #[arg(long)]
    pub database_url: Option<String>,
}

/// Create the database and tables if missing, then exit
pub async fn run_init_db(args: InitDbArgs) -> Result<()> {
    let db_config = super::db_config(args.database_url)?;

    let pool = provision(&db_config)
        .await
        .with_context(|| format!("Failed to provision {}", db_config.display_masked()))?;
    pool.close().await;

    println!("Database ready: {}", db_config.display_masked());
    Ok(())
}
