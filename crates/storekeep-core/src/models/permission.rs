//! The fixed permission catalog.
//!
//! Permissions are shipped with the system and are not user-creatable;
//! roles reference them by name. The wire/storage form is the snake_case
//! string returned by [`Permission::as_str`].

use serde::{Deserialize, Serialize};

/// An atomic grantable capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewDashboard,
    ViewPos,
    ViewInventory,
    ViewReports,
    ManageProducts,
    ManageUsers,
    ManageRoles,
    ManageLocations,
    ManageRegisters,
    ManageCatalogs,
    /// Reserved marker permission: a role granting it makes its users
    /// administrators. The coarse admin/staff distinction is derived from
    /// this on every read and never stored.
    Admin,
}

impl Permission {
    /// The full catalog, in stable display order.
    pub const ALL: &'static [Permission] = &[
        Permission::ViewDashboard,
        Permission::ViewPos,
        Permission::ViewInventory,
        Permission::ViewReports,
        Permission::ManageProducts,
        Permission::ManageUsers,
        Permission::ManageRoles,
        Permission::ManageLocations,
        Permission::ManageRegisters,
        Permission::ManageCatalogs,
        Permission::Admin,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Permission::ViewDashboard => "view_dashboard",
            Permission::ViewPos => "view_pos",
            Permission::ViewInventory => "view_inventory",
            Permission::ViewReports => "view_reports",
            Permission::ManageProducts => "manage_products",
            Permission::ManageUsers => "manage_users",
            Permission::ManageRoles => "manage_roles",
            Permission::ManageLocations => "manage_locations",
            Permission::ManageRegisters => "manage_registers",
            Permission::ManageCatalogs => "manage_catalogs",
            Permission::Admin => "admin",
        }
    }

    /// Resolve a catalog member from its string form. `None` means the
    /// string is not a valid permission.
    pub fn parse(s: &str) -> Option<Permission> {
        Permission::ALL.iter().copied().find(|p| p.as_str() == s)
    }

    pub fn is_valid(s: &str) -> bool {
        Permission::parse(s).is_some()
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
