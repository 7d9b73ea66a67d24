//! SurrealDB implementation of [`RoleRepository`].

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use storekeep_core::error::StorekeepResult;
use storekeep_core::models::permission::Permission;
use storekeep_core::models::role::{CreateRole, Role, UpdateRole};
use storekeep_core::repository::RoleRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct RoleRow {
    name: String,
    permissions: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct RoleRowWithId {
    record_id: String,
    name: String,
    permissions: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Stored permission strings come back through the fixed catalog;
/// anything no longer in the catalog is skipped, not an error.
fn parse_permissions(raw: &[String]) -> BTreeSet<Permission> {
    raw.iter().filter_map(|s| Permission::parse(s)).collect()
}

fn permission_strings(set: &BTreeSet<Permission>) -> Vec<String> {
    set.iter().map(|p| p.as_str().to_string()).collect()
}

impl RoleRow {
    fn into_role(self, id: Uuid) -> Role {
        Role {
            id,
            name: self.name,
            permissions: parse_permissions(&self.permissions),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl RoleRowWithId {
    fn try_into_role(self) -> Result<Role, DbError> {
        let id = super::parse_uuid("role", &self.record_id)?;
        Ok(Role {
            id,
            name: self.name,
            permissions: parse_permissions(&self.permissions),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// SurrealDB implementation of the Role repository.
#[derive(Clone)]
pub struct SurrealRoleRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealRoleRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> RoleRepository for SurrealRoleRepository<C> {
    async fn create(&self, input: CreateRole) -> StorekeepResult<Role> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('role', $id) SET \
                 name = $name, permissions = $permissions",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("permissions", permission_strings(&input.permissions)))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<RoleRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "role".into(),
            id: id_str,
        })?;

        Ok(row.into_role(id))
    }

    async fn get_by_id(&self, id: Uuid) -> StorekeepResult<Role> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('role', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<RoleRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "role".into(),
            id: id_str,
        })?;

        Ok(row.into_role(id))
    }

    async fn update(&self, id: Uuid, input: UpdateRole) -> StorekeepResult<Role> {
        let id_str = id.to_string();

        // Full replace of name and permission set, never a merge.
        let result = self
            .db
            .query(
                "UPDATE type::record('role', $id) SET \
                 name = $name, permissions = $permissions, \
                 updated_at = time::now()",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("permissions", permission_strings(&input.permissions)))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<RoleRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "role".into(),
            id: id_str,
        })?;

        Ok(row.into_role(id))
    }

    async fn delete(&self, id: Uuid) -> StorekeepResult<()> {
        // No cascade: users referencing this role keep their role_id and
        // read sites resolve-or-skip.
        self.db
            .query("DELETE type::record('role', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn list(&self) -> StorekeepResult<Vec<Role>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM role \
                 ORDER BY created_at ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<RoleRowWithId> = result.take(0).map_err(DbError::from)?;

        let roles = rows
            .into_iter()
            .map(|row| row.try_into_role())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(roles)
    }
}
