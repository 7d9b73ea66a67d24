//! SurrealDB implementation of [`LocationRepository`].

use chrono::{DateTime, Utc};
use storekeep_core::error::StorekeepResult;
use storekeep_core::models::location::{CreateLocation, Location, LocationKind, UpdateLocation};
use storekeep_core::repository::LocationRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct LocationRow {
    name: String,
    kind: String,
    linked_warehouse_ids: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct LocationRowWithId {
    record_id: String,
    name: String,
    kind: String,
    linked_warehouse_ids: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_kind(s: &str) -> Result<LocationKind, DbError> {
    match s {
        "Warehouse" => Ok(LocationKind::Warehouse),
        "Store" => Ok(LocationKind::Store),
        other => Err(DbError::Migration(format!(
            "unknown location kind: {other}"
        ))),
    }
}

fn kind_to_string(kind: LocationKind) -> &'static str {
    match kind {
        LocationKind::Warehouse => "Warehouse",
        LocationKind::Store => "Store",
    }
}

/// Linked-warehouse ids carry set semantics: duplicates dropped, first
/// occurrence keeps its position. Warehouses never store links.
fn normalize_links(kind: LocationKind, ids: Vec<Uuid>) -> Vec<String> {
    if kind == LocationKind::Warehouse {
        return Vec::new();
    }
    let mut seen = std::collections::BTreeSet::new();
    ids.into_iter()
        .filter(|id| seen.insert(*id))
        .map(|id| id.to_string())
        .collect()
}

fn parse_links(raw: &[String]) -> Result<Vec<Uuid>, DbError> {
    raw.iter()
        .map(|s| super::parse_uuid("warehouse link", s))
        .collect()
}

impl LocationRow {
    fn try_into_location(self, id: Uuid) -> Result<Location, DbError> {
        Ok(Location {
            id,
            name: self.name,
            kind: parse_kind(&self.kind)?,
            linked_warehouse_ids: parse_links(&self.linked_warehouse_ids)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl LocationRowWithId {
    fn try_into_location(self) -> Result<Location, DbError> {
        let id = super::parse_uuid("location", &self.record_id)?;
        Ok(Location {
            id,
            name: self.name,
            kind: parse_kind(&self.kind)?,
            linked_warehouse_ids: parse_links(&self.linked_warehouse_ids)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// SurrealDB implementation of the Location repository.
#[derive(Clone)]
pub struct SurrealLocationRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealLocationRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> LocationRepository for SurrealLocationRepository<C> {
    async fn create(&self, input: CreateLocation) -> StorekeepResult<Location> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let links = normalize_links(input.kind, input.linked_warehouse_ids);

        let result = self
            .db
            .query(
                "CREATE type::record('location', $id) SET \
                 name = $name, kind = $kind, \
                 linked_warehouse_ids = $links",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("kind", kind_to_string(input.kind).to_string()))
            .bind(("links", links))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<LocationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "location".into(),
            id: id_str,
        })?;

        Ok(row.try_into_location(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> StorekeepResult<Location> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('location', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<LocationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "location".into(),
            id: id_str,
        })?;

        Ok(row.try_into_location(id)?)
    }

    async fn update(&self, id: Uuid, input: UpdateLocation) -> StorekeepResult<Location> {
        let id_str = id.to_string();
        let links = normalize_links(input.kind, input.linked_warehouse_ids);

        let result = self
            .db
            .query(
                "UPDATE type::record('location', $id) SET \
                 name = $name, kind = $kind, \
                 linked_warehouse_ids = $links, \
                 updated_at = time::now()",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("kind", kind_to_string(input.kind).to_string()))
            .bind(("links", links))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<LocationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "location".into(),
            id: id_str,
        })?;

        Ok(row.try_into_location(id)?)
    }

    async fn delete(&self, id: Uuid) -> StorekeepResult<()> {
        // No cascade into other stores' links, user scopes, or registers;
        // read sites resolve-or-skip dangling location ids.
        self.db
            .query("DELETE type::record('location', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn list(&self) -> StorekeepResult<Vec<Location>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM location \
                 ORDER BY created_at ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<LocationRowWithId> = result.take(0).map_err(DbError::from)?;

        let locations = rows
            .into_iter()
            .map(|row| row.try_into_location())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(locations)
    }
}
