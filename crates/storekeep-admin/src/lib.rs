//! Storekeep Admin — the administrator service layer.
//!
//! Implements every mutation of the configuration model with write-time
//! validation (required fields, cross-entity referential checks, policy
//! enforcement), user-field defaulting and password hashing, plus the
//! pure scoping/derived-view rules in [`scoping`].

pub mod config;
pub mod error;
pub mod password;
pub mod scoping;
pub mod service;

pub use config::{AdminPolicy, PolicyMode};
pub use error::AdminError;
pub use service::{AdminService, UserDraft};
