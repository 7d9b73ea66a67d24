//! SurrealDB repository implementations.

mod brand;
mod cash_register;
mod location;
mod role;
mod user;

pub use brand::SurrealBrandCatalogRepository;
pub use cash_register::SurrealCashRegisterRepository;
pub use location::SurrealLocationRepository;
pub use role::SurrealRoleRepository;
pub use user::SurrealUserRepository;

use crate::error::DbError;

/// Parse a stored UUID string, attributing the failure to `entity`.
fn parse_uuid(entity: &str, value: &str) -> Result<uuid::Uuid, DbError> {
    uuid::Uuid::parse_str(value)
        .map_err(|e| DbError::Migration(format!("invalid {entity} UUID: {e}")))
}
