//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Collections here are small
//! administrator-managed configuration sets, so `list` returns the whole
//! collection as a snapshot ordered by creation time; the scoping rules in
//! `storekeep-admin` operate on those snapshots.

use uuid::Uuid;

use crate::error::StorekeepResult;
use crate::models::{
    brand::Brand,
    cash_register::{CashRegister, CreateCashRegister, UpdateCashRegister},
    location::{CreateLocation, Location, UpdateLocation},
    role::{CreateRole, Role, UpdateRole},
    user::{CreateUser, UpdateUser, User},
};

pub trait RoleRepository: Send + Sync {
    fn create(&self, input: CreateRole) -> impl Future<Output = StorekeepResult<Role>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = StorekeepResult<Role>> + Send;
    /// Full replace of name and permission set.
    fn update(
        &self,
        id: Uuid,
        input: UpdateRole,
    ) -> impl Future<Output = StorekeepResult<Role>> + Send;
    /// Hard delete. Users referencing the role keep their `role_id`;
    /// read sites tolerate the dangling reference.
    fn delete(&self, id: Uuid) -> impl Future<Output = StorekeepResult<()>> + Send;
    fn list(&self) -> impl Future<Output = StorekeepResult<Vec<Role>>> + Send;
}

pub trait LocationRepository: Send + Sync {
    fn create(
        &self,
        input: CreateLocation,
    ) -> impl Future<Output = StorekeepResult<Location>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = StorekeepResult<Location>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateLocation,
    ) -> impl Future<Output = StorekeepResult<Location>> + Send;
    /// Hard delete, no cascade into store links, user scopes, or registers.
    fn delete(&self, id: Uuid) -> impl Future<Output = StorekeepResult<()>> + Send;
    fn list(&self) -> impl Future<Output = StorekeepResult<Vec<Location>>> + Send;
}

pub trait CashRegisterRepository: Send + Sync {
    fn create(
        &self,
        input: CreateCashRegister,
    ) -> impl Future<Output = StorekeepResult<CashRegister>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = StorekeepResult<CashRegister>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateCashRegister,
    ) -> impl Future<Output = StorekeepResult<CashRegister>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = StorekeepResult<()>> + Send;
    fn list(&self) -> impl Future<Output = StorekeepResult<Vec<CashRegister>>> + Send;
}

pub trait UserRepository: Send + Sync {
    fn create(&self, input: CreateUser) -> impl Future<Output = StorekeepResult<User>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = StorekeepResult<User>> + Send;
    /// Lookup used by the username-uniqueness policy.
    fn get_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = StorekeepResult<Option<User>>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateUser,
    ) -> impl Future<Output = StorekeepResult<User>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = StorekeepResult<()>> + Send;
    fn list(&self) -> impl Future<Output = StorekeepResult<Vec<User>>> + Send;
}

/// The administrator-managed device-brand catalog. Operations are keyed
/// by name; names are unique within the catalog.
pub trait BrandCatalogRepository: Send + Sync {
    fn add(&self, name: &str) -> impl Future<Output = StorekeepResult<Brand>> + Send;
    fn rename(&self, old: &str, new: &str) -> impl Future<Output = StorekeepResult<Brand>> + Send;
    fn remove(&self, name: &str) -> impl Future<Output = StorekeepResult<()>> + Send;
    fn get_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = StorekeepResult<Option<Brand>>> + Send;
    fn list(&self) -> impl Future<Output = StorekeepResult<Vec<Brand>>> + Send;
}
