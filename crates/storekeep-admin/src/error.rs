//! Administrator service error types.

use storekeep_core::error::StorekeepError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("required field is empty: {0}")]
    MissingField(&'static str),

    #[error("location {0} does not resolve to an existing store")]
    NotAStore(Uuid),

    #[error("location {0} does not resolve to an existing warehouse")]
    NotAWarehouse(Uuid),

    #[error("role {0} does not exist")]
    UnknownRole(Uuid),

    #[error("cash register {0} does not exist")]
    UnknownRegister(Uuid),

    #[error("cash register {register} belongs to store {store}, outside the user's allowed stores")]
    RegisterOutsideScope { register: Uuid, store: Uuid },

    #[error("username already taken: {0}")]
    UsernameTaken(String),

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AdminError> for StorekeepError {
    fn from(err: AdminError) -> Self {
        match err {
            AdminError::UsernameTaken(_) => StorekeepError::AlreadyExists {
                entity: "user".into(),
            },
            AdminError::Crypto(msg) => StorekeepError::Persistence(msg),
            other => StorekeepError::Validation {
                message: other.to_string(),
            },
        }
    }
}
