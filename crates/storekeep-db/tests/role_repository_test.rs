//! Integration tests for the Role repository using in-memory SurrealDB.

use storekeep_core::error::StorekeepError;
use storekeep_core::models::permission::Permission;
use storekeep_core::models::role::{CreateRole, UpdateRole};
use storekeep_core::repository::RoleRepository;
use storekeep_db::repository::SurrealRoleRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};

async fn setup() -> SurrealRoleRepository<Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    storekeep_db::run_migrations(&db).await.unwrap();
    SurrealRoleRepository::new(db)
}

#[tokio::test]
async fn create_and_get_role() {
    let repo = setup().await;

    let role = repo
        .create(CreateRole {
            name: "Cashier".into(),
            permissions: [Permission::ViewPos].into_iter().collect(),
        })
        .await
        .unwrap();

    assert_eq!(role.name, "Cashier");
    assert!(role.permissions.contains(&Permission::ViewPos));

    let fetched = repo.get_by_id(role.id).await.unwrap();
    assert_eq!(fetched.id, role.id);
    assert_eq!(fetched.permissions, role.permissions);
}

#[tokio::test]
async fn create_with_empty_permission_set() {
    let repo = setup().await;

    let role = repo
        .create(CreateRole {
            name: "Trainee".into(),
            permissions: Default::default(),
        })
        .await
        .unwrap();

    assert!(role.permissions.is_empty());
}

#[tokio::test]
async fn update_replaces_the_whole_permission_set() {
    let repo = setup().await;

    let role = repo
        .create(CreateRole {
            name: "Cashier".into(),
            permissions: [Permission::ViewDashboard, Permission::ManageUsers]
                .into_iter()
                .collect(),
        })
        .await
        .unwrap();

    let updated = repo
        .update(
            role.id,
            UpdateRole {
                name: "Senior Cashier".into(),
                permissions: [Permission::ViewPos].into_iter().collect(),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Senior Cashier");
    // Replace, not merge: the old permissions are gone.
    assert_eq!(
        updated.permissions,
        [Permission::ViewPos].into_iter().collect()
    );
}

#[tokio::test]
async fn lifecycle_leaves_no_entry_after_delete() {
    let repo = setup().await;

    let role = repo
        .create(CreateRole {
            name: "Cashier".into(),
            permissions: [Permission::ViewPos].into_iter().collect(),
        })
        .await
        .unwrap();

    let mut permissions = role.permissions.clone();
    permissions.insert(Permission::ViewReports);
    repo.update(
        role.id,
        UpdateRole {
            name: role.name.clone(),
            permissions,
        },
    )
    .await
    .unwrap();

    repo.delete(role.id).await.unwrap();

    let err = repo.get_by_id(role.id).await.unwrap_err();
    assert!(matches!(err, StorekeepError::NotFound { .. }));
    assert!(repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_is_ordered_by_creation() {
    let repo = setup().await;

    for name in ["First", "Second", "Third"] {
        repo.create(CreateRole {
            name: name.into(),
            permissions: Default::default(),
        })
        .await
        .unwrap();
    }

    let names: Vec<_> = repo
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, ["First", "Second", "Third"]);
}
