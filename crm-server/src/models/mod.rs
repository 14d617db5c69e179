//! Domain models
//!
//! The service performs no business-rule validation; the storage column types
//! are the only constraints a record is held to.

pub mod customer;

pub use customer::{Customer, CustomerFields};
