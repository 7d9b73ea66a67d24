//! Role domain model.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::permission::Permission;

/// A named, administrator-defined set of permissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    pub permissions: BTreeSet<Permission>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateRole {
    pub name: String,
    #[serde(default)]
    pub permissions: BTreeSet<Permission>,
}

/// Full replacement of a role's name and permission set (not a merge).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRole {
    pub name: String,
    pub permissions: BTreeSet<Permission>,
}
