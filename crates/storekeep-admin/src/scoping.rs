//! Pure derived-view and access rules.
//!
//! Nothing here touches storage; every function takes current snapshots
//! and tolerates dangling references by skipping them (resolve-or-skip,
//! the uniform read-side policy: deletes never cascade).

use std::collections::BTreeSet;

use storekeep_core::models::cash_register::CashRegister;
use storekeep_core::models::location::Location;
use storekeep_core::models::permission::Permission;
use storekeep_core::models::role::Role;
use storekeep_core::models::user::{AccessLevel, User};

/// Return a new permission set with `perm` added if absent, removed if
/// present. Applying it twice with the same permission is a no-op.
pub fn toggle_permission(
    permissions: &BTreeSet<Permission>,
    perm: Permission,
) -> BTreeSet<Permission> {
    let mut next = permissions.clone();
    if !next.remove(&perm) {
        next.insert(perm);
    }
    next
}

/// Whether the user's role grants `perm`. A dangling `role_id` (the role
/// was deleted) yields `false` rather than an error.
pub fn has_permission(user: &User, roles: &[Role], perm: Permission) -> bool {
    roles
        .iter()
        .find(|r| r.id == user.role_id)
        .is_some_and(|r| r.permissions.contains(&perm))
}

/// Coarse access class, derived from the reserved admin permission on
/// every read. Never persisted.
pub fn access_level(user: &User, roles: &[Role]) -> AccessLevel {
    if has_permission(user, roles, Permission::Admin) {
        AccessLevel::Admin
    } else {
        AccessLevel::Staff
    }
}

/// Registers the user may be assigned: those in the user's allowed
/// stores. An empty store scope means no restriction, so every register
/// is eligible (an administrator without store restrictions can still be
/// assigned any register).
pub fn eligible_cash_registers<'a>(
    user: &User,
    registers: &'a [CashRegister],
) -> Vec<&'a CashRegister> {
    if user.allowed_store_ids.is_empty() {
        return registers.iter().collect();
    }
    registers
        .iter()
        .filter(|r| user.allowed_store_ids.contains(&r.store_id))
        .collect()
}

/// Registers bound to the given store. A derived view, never stored.
pub fn registers_for_store<'a>(
    store: &Location,
    registers: &'a [CashRegister],
) -> Vec<&'a CashRegister> {
    registers.iter().filter(|r| r.store_id == store.id).collect()
}

/// Ordered warehouse names for a store's linked-warehouse list. Ids that
/// no longer resolve to an existing warehouse are omitted, not errors.
pub fn resolve_linked_warehouse_names(store: &Location, locations: &[Location]) -> Vec<String> {
    store
        .linked_warehouse_ids
        .iter()
        .filter_map(|id| {
            locations
                .iter()
                .find(|l| l.id == *id && l.is_warehouse())
                .map(|l| l.name.clone())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use storekeep_core::models::location::LocationKind;
    use uuid::Uuid;

    fn location(name: &str, kind: LocationKind, links: Vec<Uuid>) -> Location {
        Location {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            linked_warehouse_ids: links,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn register(name: &str, store_id: Uuid) -> CashRegister {
        CashRegister {
            id: Uuid::new_v4(),
            name: name.into(),
            store_id,
            brand: None,
            ip_address: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn user(role_id: Uuid, allowed_store_ids: Vec<Uuid>) -> User {
        User {
            id: Uuid::new_v4(),
            username: "kasper".into(),
            password_hash: String::new(),
            role_id,
            first_name: "Kasper".into(),
            last_name: None,
            phone: None,
            allowed_store_ids,
            allowed_warehouse_ids: vec![],
            assigned_cash_register_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn role(permissions: &[Permission]) -> Role {
        Role {
            id: Uuid::new_v4(),
            name: "Cashier".into(),
            permissions: permissions.iter().copied().collect(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn toggle_is_its_own_inverse() {
        let original: BTreeSet<_> = [Permission::ViewPos].into_iter().collect();
        let once = toggle_permission(&original, Permission::ManageUsers);
        assert!(once.contains(&Permission::ManageUsers));
        let twice = toggle_permission(&once, Permission::ManageUsers);
        assert_eq!(twice, original);
    }

    #[test]
    fn toggle_removes_present_permission() {
        let original: BTreeSet<_> = [Permission::ViewPos].into_iter().collect();
        let toggled = toggle_permission(&original, Permission::ViewPos);
        assert!(toggled.is_empty());
    }

    #[test]
    fn empty_store_scope_is_permissive() {
        let s1 = Uuid::new_v4();
        let s2 = Uuid::new_v4();
        let regs = vec![register("Kassa 1", s1), register("Kassa 2", s2)];
        let unrestricted = user(Uuid::new_v4(), vec![]);
        assert_eq!(eligible_cash_registers(&unrestricted, &regs).len(), 2);
    }

    #[test]
    fn store_scope_filters_registers() {
        let s1 = Uuid::new_v4();
        let s2 = Uuid::new_v4();
        let regs = vec![register("Kassa 1", s1), register("Kassa 2", s2)];
        let scoped = user(Uuid::new_v4(), vec![s1]);
        let eligible = eligible_cash_registers(&scoped, &regs);
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].name, "Kassa 1");
    }

    #[test]
    fn dangling_role_grants_nothing() {
        let roles = vec![role(&[Permission::ViewPos])];
        let orphan = user(Uuid::new_v4(), vec![]);
        assert!(!has_permission(&orphan, &roles, Permission::ViewPos));
        assert_eq!(access_level(&orphan, &roles), AccessLevel::Staff);
    }

    #[test]
    fn admin_level_derives_from_reserved_permission() {
        let admin_role = role(&[Permission::Admin]);
        let staff_role = role(&[Permission::ViewPos, Permission::ManageUsers]);
        let roles = vec![admin_role.clone(), staff_role.clone()];

        let admin = user(admin_role.id, vec![]);
        let staff = user(staff_role.id, vec![]);
        assert_eq!(access_level(&admin, &roles), AccessLevel::Admin);
        assert_eq!(access_level(&staff, &roles), AccessLevel::Staff);
    }

    #[test]
    fn stale_warehouse_links_are_skipped() {
        let w1 = location("W1", LocationKind::Warehouse, vec![]);
        let gone = Uuid::new_v4();
        let store = location("S1", LocationKind::Store, vec![gone, w1.id]);
        let names = resolve_linked_warehouse_names(&store, &[w1, store.clone()]);
        assert_eq!(names, vec!["W1".to_string()]);
    }

    #[test]
    fn store_link_to_non_warehouse_is_skipped() {
        let other_store = location("S2", LocationKind::Store, vec![]);
        let store = location("S1", LocationKind::Store, vec![other_store.id]);
        let names = resolve_linked_warehouse_names(&store, &[other_store, store.clone()]);
        assert!(names.is_empty());
    }

    #[test]
    fn registers_for_store_matches_by_id() {
        let store = location("S1", LocationKind::Store, vec![]);
        let other = location("S2", LocationKind::Store, vec![]);
        let regs = vec![register("Kassa 1", store.id), register("Kassa 2", other.id)];
        let found = registers_for_store(&store, &regs);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Kassa 1");
    }
}
