//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings. Enum-like fields are stored as strings
//! with ASSERT constraints. Cross-entity references (store links, user
//! scopes, assigned registers) are plain string fields on purpose:
//! deletes do not cascade, and read sites tolerate dangling ids.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Roles
-- =======================================================================
DEFINE TABLE role SCHEMAFULL;
DEFINE FIELD name ON TABLE role TYPE string;
DEFINE FIELD permissions ON TABLE role TYPE array<string> DEFAULT [];
DEFINE FIELD created_at ON TABLE role TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE role TYPE datetime \
    DEFAULT time::now();

-- =======================================================================
-- Locations (warehouses and stores)
-- =======================================================================
DEFINE TABLE location SCHEMAFULL;
DEFINE FIELD name ON TABLE location TYPE string;
DEFINE FIELD kind ON TABLE location TYPE string \
    ASSERT $value IN ['Warehouse', 'Store'];
-- Only meaningful for stores; always [] for warehouses.
DEFINE FIELD linked_warehouse_ids ON TABLE location \
    TYPE array<string> DEFAULT [];
DEFINE FIELD created_at ON TABLE location TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE location TYPE datetime \
    DEFAULT time::now();

-- =======================================================================
-- Cash registers
-- =======================================================================
DEFINE TABLE cash_register SCHEMAFULL;
DEFINE FIELD name ON TABLE cash_register TYPE string;
DEFINE FIELD store_id ON TABLE cash_register TYPE string;
DEFINE FIELD brand ON TABLE cash_register TYPE option<string>;
DEFINE FIELD ip_address ON TABLE cash_register TYPE option<string>;
DEFINE FIELD created_at ON TABLE cash_register TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE cash_register TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_register_store ON TABLE cash_register COLUMNS store_id;

-- =======================================================================
-- Users (staff accounts)
-- =======================================================================
DEFINE TABLE user SCHEMAFULL;
DEFINE FIELD username ON TABLE user TYPE string;
DEFINE FIELD password_hash ON TABLE user TYPE string;
DEFINE FIELD role_id ON TABLE user TYPE string;
DEFINE FIELD first_name ON TABLE user TYPE string;
DEFINE FIELD last_name ON TABLE user TYPE option<string>;
DEFINE FIELD phone ON TABLE user TYPE option<string>;
DEFINE FIELD allowed_store_ids ON TABLE user \
    TYPE array<string> DEFAULT [];
DEFINE FIELD allowed_warehouse_ids ON TABLE user \
    TYPE array<string> DEFAULT [];
DEFINE FIELD assigned_cash_register_id ON TABLE user \
    TYPE option<string>;
DEFINE FIELD created_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
-- Non-unique: uniqueness is a service-level policy (Enforce or Warn).
DEFINE INDEX idx_user_username ON TABLE user COLUMNS username;

-- =======================================================================
-- Brand catalog
-- =======================================================================
DEFINE TABLE brand SCHEMAFULL;
DEFINE FIELD name ON TABLE brand TYPE string;
DEFINE FIELD created_at ON TABLE brand TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_brand_name ON TABLE brand COLUMNS name UNIQUE;
";

// -----------------------------------------------------------------------
// Runner
// -----------------------------------------------------------------------

/// Apply all pending migrations, recording each in the `_migration` table.
/// Safe to call repeatedly; already-applied versions are skipped.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(MIGRATION_TABLE_DDL)
        .await
        .map_err(DbError::from)?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    let mut result = db
        .query("SELECT version, name FROM _migration ORDER BY version ASC")
        .await
        .map_err(DbError::from)?;
    let applied: Vec<MigrationRecord> = result.take(0).map_err(DbError::from)?;
    let latest = applied.iter().map(|m| m.version).max().unwrap_or(0);

    for migration in MIGRATIONS.iter().filter(|m| m.version > latest) {
        info!(
            version = migration.version,
            name = migration.name,
            "Applying migration"
        );

        db.query(migration.sql)
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Migration(format!("{} failed: {e}", migration.name)))?;

        db.query("CREATE _migration SET version = $version, name = $name")
            .bind(("version", migration.version))
            .bind(("name", migration.name.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;
    }

    Ok(())
}

/// Exposed for testing with in-memory SurrealDB instances that
/// bypass the migration runner.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_v1_is_nonempty() {
        assert!(!SCHEMA_V1.is_empty());
    }

    #[test]
    fn migrations_are_ordered() {
        for window in MIGRATIONS.windows(2) {
            assert!(
                window[0].version < window[1].version,
                "Migrations must be in ascending version order"
            );
        }
    }

    #[test]
    fn schema_defines_every_entity_table() {
        for table in ["role", "location", "cash_register", "user", "brand"] {
            assert!(
                SCHEMA_V1.contains(&format!("DEFINE TABLE {table} SCHEMAFULL")),
                "missing table definition for {table}"
            );
        }
    }
}
