//! User (staff account) domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A staff account with one role and scoped access to specific stores,
/// warehouses, and optionally one cash register.
///
/// Empty `allowed_store_ids` / `allowed_warehouse_ids` means the user is
/// not restricted to any particular location (permissive default).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// Argon2id hash; raw passwords never reach storage.
    pub password_hash: String,
    pub role_id: Uuid,
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub allowed_store_ids: Vec<Uuid>,
    pub allowed_warehouse_ids: Vec<Uuid>,
    pub assigned_cash_register_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Coarse access class, derived from the reserved [`Permission::Admin`]
/// entry of the user's role on every read. Never persisted.
///
/// [`Permission::Admin`]: super::permission::Permission::Admin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessLevel {
    Admin,
    Staff,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
    pub role_id: Uuid,
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub allowed_store_ids: Vec<Uuid>,
    pub allowed_warehouse_ids: Vec<Uuid>,
    pub assigned_cash_register_id: Option<Uuid>,
}

/// Full replacement; same shape as create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUser {
    pub username: String,
    pub password_hash: String,
    pub role_id: Uuid,
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub allowed_store_ids: Vec<Uuid>,
    pub allowed_warehouse_ids: Vec<Uuid>,
    pub assigned_cash_register_id: Option<Uuid>,
}
