//! crm CLI - customer records over HTTP
//!
//! Entry point for the `crm` binary:
//! - `serve` runs the REST API against PostgreSQL (or in-memory storage)

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "crm",
    author,
    version,
    about = "Minimal CRM backend: CRUD over customer records",
    long_about = "Serve customer records stored in PostgreSQL as JSON over REST. \
                  Configuration comes from flags, the environment, or a local .env file."
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
    }
    Ok(())
}
