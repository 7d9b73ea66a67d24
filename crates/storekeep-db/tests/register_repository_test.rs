//! Integration tests for the CashRegister repository and brand catalog
//! using in-memory SurrealDB.

use storekeep_core::error::StorekeepError;
use storekeep_core::models::cash_register::{CreateCashRegister, UpdateCashRegister};
use storekeep_core::repository::{BrandCatalogRepository, CashRegisterRepository};
use storekeep_db::repository::{SurrealBrandCatalogRepository, SurrealCashRegisterRepository};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

async fn setup() -> (
    SurrealCashRegisterRepository<Db>,
    SurrealBrandCatalogRepository<Db>,
) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    storekeep_db::run_migrations(&db).await.unwrap();
    (
        SurrealCashRegisterRepository::new(db.clone()),
        SurrealBrandCatalogRepository::new(db),
    )
}

#[tokio::test]
async fn register_crud_round_trip() {
    let (registers, _) = setup().await;
    let store_id = Uuid::new_v4();

    let reg = registers
        .create(CreateCashRegister {
            name: "Kassa 1".into(),
            store_id,
            brand: Some("Ingenico".into()),
            ip_address: Some("10.0.0.17".into()),
        })
        .await
        .unwrap();
    assert_eq!(reg.store_id, store_id);

    let updated = registers
        .update(
            reg.id,
            UpdateCashRegister {
                name: "Kassa 1b".into(),
                store_id,
                brand: None,
                ip_address: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Kassa 1b");
    assert_eq!(updated.brand, None);

    registers.delete(reg.id).await.unwrap();
    let err = registers.get_by_id(reg.id).await.unwrap_err();
    assert!(matches!(err, StorekeepError::NotFound { .. }));
}

#[tokio::test]
async fn list_returns_every_register() {
    let (registers, _) = setup().await;
    let store_id = Uuid::new_v4();

    for name in ["Kassa 1", "Kassa 2"] {
        registers
            .create(CreateCashRegister {
                name: name.into(),
                store_id,
                brand: None,
                ip_address: None,
            })
            .await
            .unwrap();
    }

    assert_eq!(registers.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn brand_names_are_unique() {
    let (_, brands) = setup().await;

    brands.add("Ingenico").await.unwrap();
    let err = brands.add("Ingenico").await.unwrap_err();
    assert!(matches!(err, StorekeepError::AlreadyExists { .. }));
}

#[tokio::test]
async fn brand_rename_and_remove() {
    let (_, brands) = setup().await;

    brands.add("Verifone").await.unwrap();
    let renamed = brands.rename("Verifone", "Verifone EU").await.unwrap();
    assert_eq!(renamed.name, "Verifone EU");

    assert!(brands.get_by_name("Verifone").await.unwrap().is_none());
    assert!(brands.get_by_name("Verifone EU").await.unwrap().is_some());

    brands.remove("Verifone EU").await.unwrap();
    assert!(brands.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn brand_rename_of_missing_entry_fails() {
    let (_, brands) = setup().await;

    let err = brands.rename("Nope", "Still Nope").await.unwrap_err();
    assert!(matches!(err, StorekeepError::NotFound { .. }));
}

#[tokio::test]
async fn brand_rename_onto_taken_name_fails() {
    let (_, brands) = setup().await;

    brands.add("Ingenico").await.unwrap();
    brands.add("Verifone").await.unwrap();
    let err = brands.rename("Verifone", "Ingenico").await.unwrap_err();
    assert!(matches!(err, StorekeepError::AlreadyExists { .. }));
}
