//! SurrealDB implementation of [`UserRepository`].
//!
//! Stores only the Argon2id password hash; raw passwords are hashed in
//! the admin service before they reach this layer.

use chrono::{DateTime, Utc};
use storekeep_core::error::StorekeepResult;
use storekeep_core::models::user::{CreateUser, UpdateUser, User};
use storekeep_core::repository::UserRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct UserRow {
    username: String,
    password_hash: String,
    role_id: String,
    first_name: String,
    last_name: Option<String>,
    phone: Option<String>,
    allowed_store_ids: Vec<String>,
    allowed_warehouse_ids: Vec<String>,
    assigned_cash_register_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct UserRowWithId {
    record_id: String,
    username: String,
    password_hash: String,
    role_id: String,
    first_name: String,
    last_name: Option<String>,
    phone: Option<String>,
    allowed_store_ids: Vec<String>,
    allowed_warehouse_ids: Vec<String>,
    assigned_cash_register_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_id_list(entity: &str, raw: &[String]) -> Result<Vec<Uuid>, DbError> {
    raw.iter().map(|s| super::parse_uuid(entity, s)).collect()
}

impl UserRow {
    fn try_into_user(self, id: Uuid) -> Result<User, DbError> {
        Ok(User {
            id,
            username: self.username,
            password_hash: self.password_hash,
            role_id: super::parse_uuid("role", &self.role_id)?,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            allowed_store_ids: parse_id_list("store", &self.allowed_store_ids)?,
            allowed_warehouse_ids: parse_id_list("warehouse", &self.allowed_warehouse_ids)?,
            assigned_cash_register_id: self
                .assigned_cash_register_id
                .as_deref()
                .map(|s| super::parse_uuid("cash register", s))
                .transpose()?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl UserRowWithId {
    fn try_into_user(self) -> Result<User, DbError> {
        let id = super::parse_uuid("user", &self.record_id)?;
        let row = UserRow {
            username: self.username,
            password_hash: self.password_hash,
            role_id: self.role_id,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            allowed_store_ids: self.allowed_store_ids,
            allowed_warehouse_ids: self.allowed_warehouse_ids,
            assigned_cash_register_id: self.assigned_cash_register_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        row.try_into_user(id)
    }
}

fn id_strings(ids: &[Uuid]) -> Vec<String> {
    ids.iter().map(Uuid::to_string).collect()
}

/// SurrealDB implementation of the User repository.
#[derive(Clone)]
pub struct SurrealUserRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealUserRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> UserRepository for SurrealUserRepository<C> {
    async fn create(&self, input: CreateUser) -> StorekeepResult<User> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('user', $id) SET \
                 username = $username, password_hash = $password_hash, \
                 role_id = $role_id, first_name = $first_name, \
                 last_name = $last_name, phone = $phone, \
                 allowed_store_ids = $allowed_store_ids, \
                 allowed_warehouse_ids = $allowed_warehouse_ids, \
                 assigned_cash_register_id = $assigned_cash_register_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("username", input.username))
            .bind(("password_hash", input.password_hash))
            .bind(("role_id", input.role_id.to_string()))
            .bind(("first_name", input.first_name))
            .bind(("last_name", input.last_name))
            .bind(("phone", input.phone))
            .bind(("allowed_store_ids", id_strings(&input.allowed_store_ids)))
            .bind((
                "allowed_warehouse_ids",
                id_strings(&input.allowed_warehouse_ids),
            ))
            .bind((
                "assigned_cash_register_id",
                input.assigned_cash_register_id.map(|r| r.to_string()),
            ))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "user".into(),
            id: id_str,
        })?;

        Ok(row.try_into_user(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> StorekeepResult<User> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('user', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "user".into(),
            id: id_str,
        })?;

        Ok(row.try_into_user(id)?)
    }

    async fn get_by_username(&self, username: &str) -> StorekeepResult<Option<User>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM user \
                 WHERE username = $username LIMIT 1",
            )
            .bind(("username", username.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(DbError::from)?;
        let user = rows
            .into_iter()
            .next()
            .map(|row| row.try_into_user())
            .transpose()?;

        Ok(user)
    }

    async fn update(&self, id: Uuid, input: UpdateUser) -> StorekeepResult<User> {
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "UPDATE type::record('user', $id) SET \
                 username = $username, password_hash = $password_hash, \
                 role_id = $role_id, first_name = $first_name, \
                 last_name = $last_name, phone = $phone, \
                 allowed_store_ids = $allowed_store_ids, \
                 allowed_warehouse_ids = $allowed_warehouse_ids, \
                 assigned_cash_register_id = $assigned_cash_register_id, \
                 updated_at = time::now()",
            )
            .bind(("id", id_str.clone()))
            .bind(("username", input.username))
            .bind(("password_hash", input.password_hash))
            .bind(("role_id", input.role_id.to_string()))
            .bind(("first_name", input.first_name))
            .bind(("last_name", input.last_name))
            .bind(("phone", input.phone))
            .bind(("allowed_store_ids", id_strings(&input.allowed_store_ids)))
            .bind((
                "allowed_warehouse_ids",
                id_strings(&input.allowed_warehouse_ids),
            ))
            .bind((
                "assigned_cash_register_id",
                input.assigned_cash_register_id.map(|r| r.to_string()),
            ))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "user".into(),
            id: id_str,
        })?;

        Ok(row.try_into_user(id)?)
    }

    async fn delete(&self, id: Uuid) -> StorekeepResult<()> {
        // Users are leaves; nothing references them.
        self.db
            .query("DELETE type::record('user', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn list(&self) -> StorekeepResult<Vec<User>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM user \
                 ORDER BY created_at ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(DbError::from)?;

        let users = rows
            .into_iter()
            .map(|row| row.try_into_user())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(users)
    }
}
