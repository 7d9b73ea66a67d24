//! Cash register domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A point-of-sale device bound to exactly one store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashRegister {
    pub id: Uuid,
    pub name: String,
    pub store_id: Uuid,
    /// Expected (but not enforced) to name an entry of the brand catalog.
    pub brand: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCashRegister {
    pub name: String,
    pub store_id: Uuid,
    pub brand: Option<String>,
    pub ip_address: Option<String>,
}

/// Full replacement; same shape as create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCashRegister {
    pub name: String,
    pub store_id: Uuid,
    pub brand: Option<String>,
    pub ip_address: Option<String>,
}
