//! crm-server: HTTP service for customer records
//!
//! Maps REST requests onto parameterized SQL against a `customers` table:
//! route, decode, run the statement, encode the result as JSON.

pub mod db;
pub mod http;
pub mod models;
pub mod state;

pub use db::{CustomerRepository, DbError, InMemoryCustomerRepository, PgCustomerRepository};
pub use http::{build_router, run_server, ApiError, ErrorKind, ServerConfig, ServerError};
pub use models::{Customer, CustomerFields};
pub use state::AppState;
