//! Command implementations for the crm CLI

pub mod serve;

pub use serve::run_serve;
