//! Database connection pool management
//!
//! Uses sqlx PgPool with a fixed connection limit. The pool is the process's
//! single persistence handle; it is shared by every request and closed once on
//! shutdown.

use sqlx::postgres::PgPoolOptions;
use sqlx::{Connection, PgConnection, PgPool};

/// Maximum connections for the pool.
const MAX_CONNECTIONS: u32 = 5;

/// Create a PostgreSQL connection pool.
///
/// Reachability is checked with one direct connection first. Unlike the
/// pool's own connect, that attempt is never retried, so an unreachable server
/// or bad credentials fail at once with the driver's error. The pool itself
/// then opens connections on demand.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/crm").await?;
/// verify(&pool).await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let mut conn = PgConnection::connect(database_url).await?;
    conn.ping().await?;
    conn.close().await?;

    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_lazy(database_url)
}

/// Check that the pool can hand out a live connection.
pub async fn verify(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut conn = pool.acquire().await?;
    conn.ping().await
}
