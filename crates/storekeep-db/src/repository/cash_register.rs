//! SurrealDB implementation of [`CashRegisterRepository`].

use chrono::{DateTime, Utc};
use storekeep_core::error::StorekeepResult;
use storekeep_core::models::cash_register::{CashRegister, CreateCashRegister, UpdateCashRegister};
use storekeep_core::repository::CashRegisterRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct CashRegisterRow {
    name: String,
    store_id: String,
    brand: Option<String>,
    ip_address: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct CashRegisterRowWithId {
    record_id: String,
    name: String,
    store_id: String,
    brand: Option<String>,
    ip_address: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CashRegisterRow {
    fn try_into_register(self, id: Uuid) -> Result<CashRegister, DbError> {
        Ok(CashRegister {
            id,
            name: self.name,
            store_id: super::parse_uuid("store", &self.store_id)?,
            brand: self.brand,
            ip_address: self.ip_address,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl CashRegisterRowWithId {
    fn try_into_register(self) -> Result<CashRegister, DbError> {
        let id = super::parse_uuid("cash register", &self.record_id)?;
        Ok(CashRegister {
            id,
            name: self.name,
            store_id: super::parse_uuid("store", &self.store_id)?,
            brand: self.brand,
            ip_address: self.ip_address,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// SurrealDB implementation of the CashRegister repository.
#[derive(Clone)]
pub struct SurrealCashRegisterRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealCashRegisterRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> CashRegisterRepository for SurrealCashRegisterRepository<C> {
    async fn create(&self, input: CreateCashRegister) -> StorekeepResult<CashRegister> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('cash_register', $id) SET \
                 name = $name, store_id = $store_id, \
                 brand = $brand, ip_address = $ip_address",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("store_id", input.store_id.to_string()))
            .bind(("brand", input.brand))
            .bind(("ip_address", input.ip_address))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<CashRegisterRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "cash_register".into(),
            id: id_str,
        })?;

        Ok(row.try_into_register(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> StorekeepResult<CashRegister> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('cash_register', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CashRegisterRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "cash_register".into(),
            id: id_str,
        })?;

        Ok(row.try_into_register(id)?)
    }

    async fn update(&self, id: Uuid, input: UpdateCashRegister) -> StorekeepResult<CashRegister> {
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "UPDATE type::record('cash_register', $id) SET \
                 name = $name, store_id = $store_id, \
                 brand = $brand, ip_address = $ip_address, \
                 updated_at = time::now()",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("store_id", input.store_id.to_string()))
            .bind(("brand", input.brand))
            .bind(("ip_address", input.ip_address))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<CashRegisterRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "cash_register".into(),
            id: id_str,
        })?;

        Ok(row.try_into_register(id)?)
    }

    async fn delete(&self, id: Uuid) -> StorekeepResult<()> {
        // Users holding this register as assigned_cash_register_id keep
        // the dangling id; read sites tolerate it.
        self.db
            .query("DELETE type::record('cash_register', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn list(&self) -> StorekeepResult<Vec<CashRegister>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM cash_register \
                 ORDER BY created_at ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CashRegisterRowWithId> = result.take(0).map_err(DbError::from)?;

        let registers = rows
            .into_iter()
            .map(|row| row.try_into_register())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(registers)
    }
}
