//! Integration tests for the Location repository using in-memory SurrealDB.

use storekeep_core::models::location::{CreateLocation, LocationKind, UpdateLocation};
use storekeep_core::repository::LocationRepository;
use storekeep_db::repository::SurrealLocationRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

async fn setup() -> SurrealLocationRepository<Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    storekeep_db::run_migrations(&db).await.unwrap();
    SurrealLocationRepository::new(db)
}

#[tokio::test]
async fn warehouse_never_stores_links() {
    let repo = setup().await;

    // Links supplied for a warehouse are silently dropped, not an error.
    let warehouse = repo
        .create(CreateLocation {
            name: "Central Warehouse".into(),
            kind: LocationKind::Warehouse,
            linked_warehouse_ids: vec![Uuid::new_v4(), Uuid::new_v4()],
        })
        .await
        .unwrap();
    assert!(warehouse.linked_warehouse_ids.is_empty());

    let updated = repo
        .update(
            warehouse.id,
            UpdateLocation {
                name: "Central Warehouse".into(),
                kind: LocationKind::Warehouse,
                linked_warehouse_ids: vec![Uuid::new_v4()],
            },
        )
        .await
        .unwrap();
    assert!(updated.linked_warehouse_ids.is_empty());
}

#[tokio::test]
async fn store_links_are_deduplicated() {
    let repo = setup().await;

    let w = repo
        .create(CreateLocation {
            name: "W1".into(),
            kind: LocationKind::Warehouse,
            linked_warehouse_ids: vec![],
        })
        .await
        .unwrap();

    let store = repo
        .create(CreateLocation {
            name: "S1".into(),
            kind: LocationKind::Store,
            linked_warehouse_ids: vec![w.id, w.id, w.id],
        })
        .await
        .unwrap();

    assert_eq!(store.linked_warehouse_ids, vec![w.id]);
}

#[tokio::test]
async fn delete_does_not_cascade_into_store_links() {
    let repo = setup().await;

    let w = repo
        .create(CreateLocation {
            name: "W1".into(),
            kind: LocationKind::Warehouse,
            linked_warehouse_ids: vec![],
        })
        .await
        .unwrap();
    let store = repo
        .create(CreateLocation {
            name: "S1".into(),
            kind: LocationKind::Store,
            linked_warehouse_ids: vec![w.id],
        })
        .await
        .unwrap();

    repo.delete(w.id).await.unwrap();

    // The store keeps the now-dangling link; read sites skip it.
    let fetched = repo.get_by_id(store.id).await.unwrap();
    assert_eq!(fetched.linked_warehouse_ids, vec![w.id]);
}

#[tokio::test]
async fn update_is_a_full_replace() {
    let repo = setup().await;

    let w1 = repo
        .create(CreateLocation {
            name: "W1".into(),
            kind: LocationKind::Warehouse,
            linked_warehouse_ids: vec![],
        })
        .await
        .unwrap();
    let w2 = repo
        .create(CreateLocation {
            name: "W2".into(),
            kind: LocationKind::Warehouse,
            linked_warehouse_ids: vec![],
        })
        .await
        .unwrap();
    let store = repo
        .create(CreateLocation {
            name: "S1".into(),
            kind: LocationKind::Store,
            linked_warehouse_ids: vec![w1.id],
        })
        .await
        .unwrap();

    let updated = repo
        .update(
            store.id,
            UpdateLocation {
                name: "S1 Renamed".into(),
                kind: LocationKind::Store,
                linked_warehouse_ids: vec![w2.id],
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "S1 Renamed");
    assert_eq!(updated.linked_warehouse_ids, vec![w2.id]);
}
