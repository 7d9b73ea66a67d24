//! Storekeep Core — domain models and repository trait definitions for
//! the retail back-office configuration system.
//!
//! This crate has no I/O: it defines the entities (roles, locations,
//! cash registers, users, brand catalog), the fixed permission catalog,
//! the error taxonomy, and the async repository traits implemented by
//! `storekeep-db`.

pub mod error;
pub mod models;
pub mod repository;

pub use error::{StorekeepError, StorekeepResult};
