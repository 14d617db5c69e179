//! Repository implementations for customer storage
//!
//! [`CustomerRepository`] is the seam handlers talk to. Postgres is the
//! production backend; the in-memory backend mirrors its semantics for local
//! development and tests.

pub mod customers;
pub mod memory;

pub use customers::{CustomerRepository, DbError, PgCustomerRepository};
pub use memory::InMemoryCustomerRepository;
