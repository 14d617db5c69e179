//! HTTP server command
//!
//! Opens and verifies the persistence handle, then runs the API until a
//! shutdown signal arrives. Any failure before the port is bound is fatal.

use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use crm_server::db::create_pool;
use crm_server::http::server::DEFAULT_PORT;
use crm_server::{
    run_server, AppState, CustomerRepository, InMemoryCustomerRepository, PgCustomerRepository,
    ServerConfig,
};

/// Connection string used when none is configured. Local development only.
pub const FALLBACK_DATABASE_URL: &str = "postgres://localhost/crm?sslmode=disable";

/// Where customer records live
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// PostgreSQL `customers` table
    Postgres,
    /// Process memory; lost on exit
    Memory,
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Interface to bind to
    #[arg(long, env = "CRM_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// PostgreSQL connection string (falls back to a local development database)
    #[arg(long, env = "CRM_DB_CONNECTION_STRING")]
    pub database_url: Option<String>,

    /// Storage backend
    #[arg(long, value_enum, env = "CRM_STORAGE", default_value_t = StorageBackend::Postgres)]
    pub storage: StorageBackend,
}

impl ServeArgs {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: SocketAddr::new(self.host, self.port),
        }
    }
}

/// Pick the configured connection string, or the development fallback.
fn resolve_database_url(configured: Option<String>) -> String {
    match configured.filter(|url| !url.trim().is_empty()) {
        Some(url) => url,
        None => {
            tracing::warn!(
                "CRM_DB_CONNECTION_STRING not set. Using fallback for local development."
            );
            FALLBACK_DATABASE_URL.to_string()
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.server_config();
    tracing::info!(storage = ?args.storage, "Starting crm server on {}", config.bind_addr);

    match args.storage {
        StorageBackend::Memory => {
            tracing::warn!("In-memory storage: all customer data is lost on exit");
            let state = AppState::new(InMemoryCustomerRepository::new());
            run_server(state, config).await.context("Server error")?;
        }
        StorageBackend::Postgres => {
            let database_url = resolve_database_url(args.database_url);

            let pool = create_pool(&database_url)
                .await
                .context("Failed to open database connection")?;
            let repo = PgCustomerRepository::new(pool.clone());
            repo.ping().await.context("Failed to ping database")?;
            tracing::info!("Successfully connected to database");

            let state = AppState::new(repo);
            let result = run_server(state, config).await;

            pool.close().await;
            tracing::info!("Database pool closed");

            result.context("Server error")?;
        }
    }

    Ok(())
}
