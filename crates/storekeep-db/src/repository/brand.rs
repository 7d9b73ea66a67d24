//! SurrealDB implementation of [`BrandCatalogRepository`].
//!
//! The brand catalog is a name-keyed set; the schema enforces name
//! uniqueness, and the repository checks it up front to report
//! `AlreadyExists` instead of an opaque index violation.

use chrono::{DateTime, Utc};
use storekeep_core::error::StorekeepResult;
use storekeep_core::models::brand::Brand;
use storekeep_core::repository::BrandCatalogRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct BrandRow {
    name: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct BrandRowWithId {
    record_id: String,
    name: String,
    created_at: DateTime<Utc>,
}

impl BrandRowWithId {
    fn try_into_brand(self) -> Result<Brand, DbError> {
        let id = super::parse_uuid("brand", &self.record_id)?;
        Ok(Brand {
            id,
            name: self.name,
            created_at: self.created_at,
        })
    }
}

/// SurrealDB implementation of the brand catalog.
#[derive(Clone)]
pub struct SurrealBrandCatalogRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealBrandCatalogRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Brand>, DbError> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM brand \
                 WHERE name = $name LIMIT 1",
            )
            .bind(("name", name.to_string()))
            .await?;

        let rows: Vec<BrandRowWithId> = result.take(0)?;
        rows.into_iter()
            .next()
            .map(|row| row.try_into_brand())
            .transpose()
    }
}

impl<C: Connection> BrandCatalogRepository for SurrealBrandCatalogRepository<C> {
    async fn add(&self, name: &str) -> StorekeepResult<Brand> {
        if self.find_by_name(name).await?.is_some() {
            return Err(DbError::AlreadyExists {
                entity: "brand".into(),
            }
            .into());
        }

        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query("CREATE type::record('brand', $id) SET name = $name")
            .bind(("id", id_str.clone()))
            .bind(("name", name.to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<BrandRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "brand".into(),
            id: id_str,
        })?;

        Ok(Brand {
            id,
            name: row.name,
            created_at: row.created_at,
        })
    }

    async fn rename(&self, old: &str, new: &str) -> StorekeepResult<Brand> {
        let brand = self
            .find_by_name(old)
            .await?
            .ok_or_else(|| DbError::NotFound {
                entity: "brand".into(),
                id: old.to_string(),
            })?;

        if old != new && self.find_by_name(new).await?.is_some() {
            return Err(DbError::AlreadyExists {
                entity: "brand".into(),
            }
            .into());
        }

        self.db
            .query("UPDATE type::record('brand', $id) SET name = $name")
            .bind(("id", brand.id.to_string()))
            .bind(("name", new.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        Ok(Brand {
            name: new.to_string(),
            ..brand
        })
    }

    async fn remove(&self, name: &str) -> StorekeepResult<()> {
        // Registers keep whatever brand string they carry.
        self.db
            .query("DELETE brand WHERE name = $name")
            .bind(("name", name.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn get_by_name(&self, name: &str) -> StorekeepResult<Option<Brand>> {
        Ok(self.find_by_name(name).await?)
    }

    async fn list(&self) -> StorekeepResult<Vec<Brand>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM brand \
                 ORDER BY created_at ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<BrandRowWithId> = result.take(0).map_err(DbError::from)?;

        let brands = rows
            .into_iter()
            .map(|row| row.try_into_brand())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(brands)
    }
}
