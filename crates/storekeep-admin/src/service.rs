//! Administrator service — validated CRUD over the configuration model.
//!
//! Every invariant is checked inside the mutation operation itself, so
//! the model stays correct no matter which caller invokes it: required
//! fields are validated before any persistence call, cross-entity
//! references (store kind for registers, warehouse kind for links, role
//! existence for users) are resolved at write time, and the two soft
//! invariants (username uniqueness, register-within-scope) follow the
//! configured [`AdminPolicy`].
//!
//! Generic over the repository traits so this crate has no dependency
//! on the database crate.

use storekeep_core::error::{StorekeepError, StorekeepResult};
use storekeep_core::models::brand::Brand;
use storekeep_core::models::cash_register::{
    CashRegister, CreateCashRegister, UpdateCashRegister,
};
use storekeep_core::models::location::{CreateLocation, Location, LocationKind, UpdateLocation};
use storekeep_core::models::permission::Permission;
use storekeep_core::models::role::{CreateRole, Role, UpdateRole};
use storekeep_core::models::user::{AccessLevel, CreateUser, UpdateUser, User};
use storekeep_core::repository::{
    BrandCatalogRepository, CashRegisterRepository, LocationRepository, RoleRepository,
    UserRepository,
};
use tracing::warn;
use uuid::Uuid;

use crate::config::{AdminPolicy, PolicyMode};
use crate::error::AdminError;
use crate::password;
use crate::scoping;

/// Administrator input for creating or fully replacing a user. Fields
/// not supplied are defaulted on write: the password falls back to the
/// configured placeholder before hashing, list fields to empty.
#[derive(Debug, Clone, Default)]
pub struct UserDraft {
    pub username: String,
    /// Raw password; hashed with Argon2id before storage.
    pub password: Option<String>,
    pub role_id: Uuid,
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub allowed_store_ids: Vec<Uuid>,
    pub allowed_warehouse_ids: Vec<Uuid>,
    pub assigned_cash_register_id: Option<Uuid>,
}

/// The administrator service.
pub struct AdminService<R, L, C, U, B> {
    role_repo: R,
    location_repo: L,
    register_repo: C,
    user_repo: U,
    brand_repo: B,
    policy: AdminPolicy,
}

fn require(field: &'static str, value: &str) -> Result<(), AdminError> {
    if value.trim().is_empty() {
        Err(AdminError::MissingField(field))
    } else {
        Ok(())
    }
}

fn is_not_found(err: &StorekeepError) -> bool {
    matches!(err, StorekeepError::NotFound { .. })
}

impl<R, L, C, U, B> AdminService<R, L, C, U, B>
where
    R: RoleRepository,
    L: LocationRepository,
    C: CashRegisterRepository,
    U: UserRepository,
    B: BrandCatalogRepository,
{
    pub fn new(
        role_repo: R,
        location_repo: L,
        register_repo: C,
        user_repo: U,
        brand_repo: B,
        policy: AdminPolicy,
    ) -> Self {
        Self {
            role_repo,
            location_repo,
            register_repo,
            user_repo,
            brand_repo,
            policy,
        }
    }

    // -------------------------------------------------------------------
    // Roles
    // -------------------------------------------------------------------

    pub async fn create_role(&self, input: CreateRole) -> StorekeepResult<Role> {
        require("name", &input.name)?;
        self.role_repo.create(input).await
    }

    pub async fn update_role(&self, id: Uuid, input: UpdateRole) -> StorekeepResult<Role> {
        require("name", &input.name)?;
        self.role_repo.update(id, input).await
    }

    pub async fn delete_role(&self, id: Uuid) -> StorekeepResult<()> {
        self.role_repo.delete(id).await
    }

    pub async fn roles(&self) -> StorekeepResult<Vec<Role>> {
        self.role_repo.list().await
    }

    // -------------------------------------------------------------------
    // Locations
    // -------------------------------------------------------------------

    pub async fn create_location(&self, input: CreateLocation) -> StorekeepResult<Location> {
        require("name", &input.name)?;
        self.check_warehouse_links(&input.linked_warehouse_ids, input.kind == LocationKind::Store)
            .await?;
        self.location_repo.create(input).await
    }

    pub async fn update_location(
        &self,
        id: Uuid,
        input: UpdateLocation,
    ) -> StorekeepResult<Location> {
        require("name", &input.name)?;
        self.check_warehouse_links(&input.linked_warehouse_ids, input.kind == LocationKind::Store)
            .await?;
        self.location_repo.update(id, input).await
    }

    pub async fn delete_location(&self, id: Uuid) -> StorekeepResult<()> {
        self.location_repo.delete(id).await
    }

    pub async fn locations(&self) -> StorekeepResult<Vec<Location>> {
        self.location_repo.list().await
    }

    /// Ordered warehouse names for a store's links, skipping any id that
    /// no longer resolves to a warehouse.
    pub async fn linked_warehouse_names(&self, store_id: Uuid) -> StorekeepResult<Vec<String>> {
        let store = self.location_repo.get_by_id(store_id).await?;
        let locations = self.location_repo.list().await?;
        Ok(scoping::resolve_linked_warehouse_names(&store, &locations))
    }

    /// Registers bound to the given store.
    pub async fn registers_for_store(&self, store_id: Uuid) -> StorekeepResult<Vec<CashRegister>> {
        let store = self.location_repo.get_by_id(store_id).await?;
        let registers = self.register_repo.list().await?;
        Ok(scoping::registers_for_store(&store, &registers)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Store links must point at existing warehouses. Links supplied for
    /// a warehouse are dropped by normalization, not validated.
    async fn check_warehouse_links(
        &self,
        linked: &[Uuid],
        is_store: bool,
    ) -> StorekeepResult<()> {
        if !is_store || linked.is_empty() {
            return Ok(());
        }
        let locations = self.location_repo.list().await?;
        for id in linked {
            let found = locations.iter().any(|l| l.id == *id && l.is_warehouse());
            if !found {
                return Err(AdminError::NotAWarehouse(*id).into());
            }
        }
        Ok(())
    }

    // -------------------------------------------------------------------
    // Cash registers & brand catalog
    // -------------------------------------------------------------------

    pub async fn create_register(
        &self,
        input: CreateCashRegister,
    ) -> StorekeepResult<CashRegister> {
        require("name", &input.name)?;
        self.check_store(input.store_id).await?;
        self.check_brand(input.brand.as_deref()).await?;
        self.register_repo.create(input).await
    }

    pub async fn update_register(
        &self,
        id: Uuid,
        input: UpdateCashRegister,
    ) -> StorekeepResult<CashRegister> {
        require("name", &input.name)?;
        self.check_store(input.store_id).await?;
        self.check_brand(input.brand.as_deref()).await?;
        self.register_repo.update(id, input).await
    }

    pub async fn delete_register(&self, id: Uuid) -> StorekeepResult<()> {
        self.register_repo.delete(id).await
    }

    pub async fn registers(&self) -> StorekeepResult<Vec<CashRegister>> {
        self.register_repo.list().await
    }

    pub async fn add_brand(&self, name: &str) -> StorekeepResult<Brand> {
        require("name", name)?;
        self.brand_repo.add(name).await
    }

    pub async fn rename_brand(&self, old: &str, new: &str) -> StorekeepResult<Brand> {
        require("name", new)?;
        self.brand_repo.rename(old, new).await
    }

    pub async fn remove_brand(&self, name: &str) -> StorekeepResult<()> {
        self.brand_repo.remove(name).await
    }

    pub async fn brands(&self) -> StorekeepResult<Vec<Brand>> {
        self.brand_repo.list().await
    }

    async fn check_store(&self, store_id: Uuid) -> StorekeepResult<()> {
        match self.location_repo.get_by_id(store_id).await {
            Ok(location) if location.is_store() => Ok(()),
            Ok(_) => Err(AdminError::NotAStore(store_id).into()),
            Err(e) if is_not_found(&e) => Err(AdminError::NotAStore(store_id).into()),
            Err(e) => Err(e),
        }
    }

    /// The brand constraint is soft: an unknown brand is accepted with a
    /// warning so registers survive catalog edits.
    async fn check_brand(&self, brand: Option<&str>) -> StorekeepResult<()> {
        if let Some(brand) = brand
            && self.brand_repo.get_by_name(brand).await?.is_none()
        {
            warn!(brand, "register brand is not in the brand catalog");
        }
        Ok(())
    }

    // -------------------------------------------------------------------
    // Users
    // -------------------------------------------------------------------

    pub async fn create_user(&self, draft: UserDraft) -> StorekeepResult<User> {
        self.validate_user_draft(&draft, None).await?;
        let password_hash = self.hash_draft_password(&draft)?;
        self.user_repo
            .create(CreateUser {
                username: draft.username,
                password_hash,
                role_id: draft.role_id,
                first_name: draft.first_name,
                last_name: draft.last_name,
                phone: draft.phone,
                allowed_store_ids: draft.allowed_store_ids,
                allowed_warehouse_ids: draft.allowed_warehouse_ids,
                assigned_cash_register_id: draft.assigned_cash_register_id,
            })
            .await
    }

    pub async fn update_user(&self, id: Uuid, draft: UserDraft) -> StorekeepResult<User> {
        self.validate_user_draft(&draft, Some(id)).await?;
        let password_hash = self.hash_draft_password(&draft)?;
        self.user_repo
            .update(
                id,
                UpdateUser {
                    username: draft.username,
                    password_hash,
                    role_id: draft.role_id,
                    first_name: draft.first_name,
                    last_name: draft.last_name,
                    phone: draft.phone,
                    allowed_store_ids: draft.allowed_store_ids,
                    allowed_warehouse_ids: draft.allowed_warehouse_ids,
                    assigned_cash_register_id: draft.assigned_cash_register_id,
                },
            )
            .await
    }

    pub async fn delete_user(&self, id: Uuid) -> StorekeepResult<()> {
        self.user_repo.delete(id).await
    }

    pub async fn users(&self) -> StorekeepResult<Vec<User>> {
        self.user_repo.list().await
    }

    /// Registers the user may be assigned, per their store scope. An
    /// empty scope returns every register.
    pub async fn eligible_cash_registers(
        &self,
        user_id: Uuid,
    ) -> StorekeepResult<Vec<CashRegister>> {
        let user = self.user_repo.get_by_id(user_id).await?;
        let registers = self.register_repo.list().await?;
        Ok(scoping::eligible_cash_registers(&user, &registers)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Whether the user's role grants `perm`; false if the role has been
    /// deleted since.
    pub async fn has_permission(&self, user_id: Uuid, perm: Permission) -> StorekeepResult<bool> {
        let user = self.user_repo.get_by_id(user_id).await?;
        let roles = self.role_repo.list().await?;
        Ok(scoping::has_permission(&user, &roles, perm))
    }

    /// Coarse access class, recomputed from the role's permissions.
    pub async fn access_level(&self, user_id: Uuid) -> StorekeepResult<AccessLevel> {
        let user = self.user_repo.get_by_id(user_id).await?;
        let roles = self.role_repo.list().await?;
        Ok(scoping::access_level(&user, &roles))
    }

    fn hash_draft_password(&self, draft: &UserDraft) -> StorekeepResult<String> {
        let raw = draft
            .password
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(&self.policy.placeholder_password);
        password::hash_password(raw, self.policy.pepper.as_deref()).map_err(StorekeepError::from)
    }

    async fn validate_user_draft(
        &self,
        draft: &UserDraft,
        existing_id: Option<Uuid>,
    ) -> StorekeepResult<()> {
        require("username", &draft.username)?;
        require("first_name", &draft.first_name)?;

        self.check_username(&draft.username, existing_id).await?;

        match self.role_repo.get_by_id(draft.role_id).await {
            Ok(_) => {}
            Err(e) if is_not_found(&e) => return Err(AdminError::UnknownRole(draft.role_id).into()),
            Err(e) => return Err(e),
        }

        let locations = self.location_repo.list().await?;
        for id in &draft.allowed_store_ids {
            if !locations.iter().any(|l| l.id == *id && l.is_store()) {
                return Err(AdminError::NotAStore(*id).into());
            }
        }
        for id in &draft.allowed_warehouse_ids {
            if !locations.iter().any(|l| l.id == *id && l.is_warehouse()) {
                return Err(AdminError::NotAWarehouse(*id).into());
            }
        }

        if let Some(register_id) = draft.assigned_cash_register_id {
            self.check_register_scope(register_id, &draft.allowed_store_ids)
                .await?;
        }

        Ok(())
    }

    async fn check_username(&self, username: &str, existing_id: Option<Uuid>) -> StorekeepResult<()> {
        let Some(holder) = self.user_repo.get_by_username(username).await? else {
            return Ok(());
        };
        if existing_id == Some(holder.id) {
            return Ok(());
        }
        match self.policy.unique_usernames {
            PolicyMode::Enforce => Err(AdminError::UsernameTaken(username.to_string()).into()),
            PolicyMode::Warn => {
                warn!(username, "username is already taken");
                Ok(())
            }
        }
    }

    /// An assigned register must exist; whether it must also lie inside
    /// the user's allowed stores depends on the policy. An empty store
    /// scope allows any register.
    async fn check_register_scope(
        &self,
        register_id: Uuid,
        allowed_store_ids: &[Uuid],
    ) -> StorekeepResult<()> {
        let register = match self.register_repo.get_by_id(register_id).await {
            Ok(register) => register,
            Err(e) if is_not_found(&e) => {
                return Err(AdminError::UnknownRegister(register_id).into());
            }
            Err(e) => return Err(e),
        };

        if allowed_store_ids.is_empty() || allowed_store_ids.contains(&register.store_id) {
            return Ok(());
        }

        match self.policy.register_scope {
            PolicyMode::Enforce => Err(AdminError::RegisterOutsideScope {
                register: register_id,
                store: register.store_id,
            }
            .into()),
            PolicyMode::Warn => {
                warn!(
                    register = %register_id,
                    store = %register.store_id,
                    "assigned register lies outside the user's allowed stores"
                );
                Ok(())
            }
        }
    }
}
