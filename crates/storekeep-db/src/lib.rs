//! Storekeep Database — SurrealDB connection management and repository
//! implementations.
//!
//! This crate provides:
//! - Connection management ([`DbConfig`], [`DbManager`])
//! - Schema initialization and migrations ([`run_migrations`])
//! - SurrealDB implementations of every `storekeep-core` repository trait
//! - Error types ([`DbError`])

mod connection;
mod error;
pub mod repository;
mod schema;

pub use connection::{DbConfig, DbManager};
pub use error::DbError;
pub use schema::{run_migrations, schema_v1};
