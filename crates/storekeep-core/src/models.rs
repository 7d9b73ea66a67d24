//! Domain models for Storekeep.
//!
//! These are the core types shared across all crates.

pub mod brand;
pub mod cash_register;
pub mod location;
pub mod permission;
pub mod role;
pub mod user;
