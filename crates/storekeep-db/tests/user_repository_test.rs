//! Integration tests for the User repository using in-memory SurrealDB.

use storekeep_core::error::StorekeepError;
use storekeep_core::models::user::{CreateUser, UpdateUser};
use storekeep_core::repository::UserRepository;
use storekeep_db::repository::SurrealUserRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

async fn setup() -> SurrealUserRepository<Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    storekeep_db::run_migrations(&db).await.unwrap();
    SurrealUserRepository::new(db)
}

fn sample_user(username: &str) -> CreateUser {
    CreateUser {
        username: username.into(),
        password_hash: "$argon2id$stub".into(),
        role_id: Uuid::new_v4(),
        first_name: "Anna".into(),
        last_name: Some("Berg".into()),
        phone: None,
        allowed_store_ids: vec![],
        allowed_warehouse_ids: vec![],
        assigned_cash_register_id: None,
    }
}

#[tokio::test]
async fn create_and_fetch_by_username() {
    let repo = setup().await;

    let user = repo.create(sample_user("anna")).await.unwrap();
    assert_eq!(user.username, "anna");
    assert!(user.allowed_store_ids.is_empty());

    let found = repo.get_by_username("anna").await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(user.id));

    assert!(repo.get_by_username("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn update_replaces_scope_lists() {
    let repo = setup().await;

    let store = Uuid::new_v4();
    let warehouse = Uuid::new_v4();
    let register = Uuid::new_v4();

    let user = repo.create(sample_user("anna")).await.unwrap();
    let updated = repo
        .update(
            user.id,
            UpdateUser {
                username: "anna".into(),
                password_hash: user.password_hash.clone(),
                role_id: user.role_id,
                first_name: "Anna".into(),
                last_name: None,
                phone: Some("+4620123456".into()),
                allowed_store_ids: vec![store],
                allowed_warehouse_ids: vec![warehouse],
                assigned_cash_register_id: Some(register),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.allowed_store_ids, vec![store]);
    assert_eq!(updated.allowed_warehouse_ids, vec![warehouse]);
    assert_eq!(updated.assigned_cash_register_id, Some(register));
    assert_eq!(updated.last_name, None);
    assert_eq!(updated.phone.as_deref(), Some("+4620123456"));
}

#[tokio::test]
async fn delete_removes_the_account() {
    let repo = setup().await;

    let user = repo.create(sample_user("anna")).await.unwrap();
    repo.delete(user.id).await.unwrap();

    let err = repo.get_by_id(user.id).await.unwrap_err();
    assert!(matches!(err, StorekeepError::NotFound { .. }));
    assert!(repo.list().await.unwrap().is_empty());
}
