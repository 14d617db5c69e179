//! Database layer - connection pool and the customer repository
//!
//! - One pool per process, opened and verified before the server binds
//! - Every statement is parameterized
//! - Batch updates run inside a single transaction

pub mod pool;
pub mod repos;

pub use pool::{create_pool, verify};
pub use repos::*;
