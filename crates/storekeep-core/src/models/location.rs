//! Location domain model: warehouses and stores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationKind {
    Warehouse,
    Store,
}

/// A physical site. Stores may link to the warehouses that supply them;
/// `linked_warehouse_ids` is always empty for warehouses (normalized on
/// write) and carries set semantics for stores (no meaningful duplicates).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: Uuid,
    pub name: String,
    pub kind: LocationKind,
    pub linked_warehouse_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Location {
    pub fn is_store(&self) -> bool {
        self.kind == LocationKind::Store
    }

    pub fn is_warehouse(&self) -> bool {
        self.kind == LocationKind::Warehouse
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLocation {
    pub name: String,
    pub kind: LocationKind,
    #[serde(default)]
    pub linked_warehouse_ids: Vec<Uuid>,
}

/// Full replacement; same shape and normalization rules as create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateLocation {
    pub name: String,
    pub kind: LocationKind,
    #[serde(default)]
    pub linked_warehouse_ids: Vec<Uuid>,
}
