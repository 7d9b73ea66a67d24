//! Administrator service configuration.

/// How a soft invariant is handled at write time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyMode {
    /// Reject the write with an error.
    Enforce,
    /// Accept the write but emit a structured warning.
    Warn,
}

/// Configuration for the administrator service.
#[derive(Debug, Clone)]
pub struct AdminPolicy {
    /// Whether duplicate usernames are rejected or only warned about.
    pub unique_usernames: PolicyMode,
    /// Whether an assigned cash register outside the user's allowed
    /// stores is rejected or only warned about.
    pub register_scope: PolicyMode,
    /// Optional pepper prepended to passwords before Argon2id hashing.
    pub pepper: Option<String>,
    /// Password used when an account is created or updated without one.
    pub placeholder_password: String,
}

impl Default for AdminPolicy {
    fn default() -> Self {
        Self {
            unique_usernames: PolicyMode::Enforce,
            register_scope: PolicyMode::Enforce,
            pepper: None,
            placeholder_password: "changeme".into(),
        }
    }
}
