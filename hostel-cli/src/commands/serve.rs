//! HTTP server command
//!
//! Provisions the database, then serves the API until shutdown.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use hostel_server::db::provision;
use hostel_server::http::{run_server, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Database URL (overrides the DB_* variables)
    #[arg(long)]
    pub database_url: Option<String>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let db_config = super::db_config(args.database_url)?;
    tracing::info!("Starting hostel server on {}", args.bind);

    // The server never starts against a half-provisioned database
    let pool = provision(&db_config)
        .await
        .with_context(|| format!("Failed to provision {}", db_config.display_masked()))?;

    let config = ServerConfig {
        bind_addr: args.bind,
        ..ServerConfig::default()
    };

    run_server(pool, config).await.context("Server error")?;

    Ok(())
}
