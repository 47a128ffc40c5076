//! hostelctl - command-line entry point for the hostel management backend
//!
//! - `serve`: provision the database and run the HTTP API
//! - `check-db`: verify database connectivity
//! - `init-db`: provision the database and exit

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use tracing_setup::{init_tracing, TracingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "hostelctl",
    author,
    version,
    about = "Hostel management API server and database tools"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Check database connectivity and report the server version
    CheckDb(commands::check_db::CheckDbArgs),
    /// Create the database and tables if missing, then exit
    InitDb(commands::init_db::InitDbArgs),
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    // Before tracing, so RUST_LOG from a .env file takes effect
    let dotenv = config::load_dotenv();
    init_tracing(&TracingConfig { debug: cli.debug }).ok();
    dotenv.log();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::CheckDb(args) => return commands::run_check_db(args).await,
        Commands::InitDb(args) => commands::run_init_db(args).await?,
    }
    Ok(ExitCode::SUCCESS)
}
