mod common;

use common::{mug, shirt};
use rust_decimal::Decimal;
use small_cart::{CatalogStore, Product, SampleProductSource, ShopError};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_add_product_assigns_distinct_ids() {
    let catalog = Arc::new(CatalogStore::new());

    let mut tasks = Vec::new();
    for i in 0..50 {
        let catalog = Arc::clone(&catalog);
        tasks.push(tokio::spawn(async move {
            catalog.add_product(&format!("Item {}", i), Decimal::new(i, 0))
        }));
    }

    let mut ids = HashSet::new();
    for task in tasks {
        let product = task.await.unwrap().unwrap();
        assert!(ids.insert(product.id().0), "duplicate id {}", product.id());
    }

    let expected: HashSet<u32> = (1..=50).collect();
    assert_eq!(ids, expected);

    let listed = catalog.list();
    assert_eq!(listed.len(), 50);
    // Arrival order is list order, and ids grow with it.
    let listed_ids: Vec<u32> = listed.iter().map(|p| p.id().0).collect();
    assert_eq!(listed_ids, (1..=50).collect::<Vec<_>>());
}

#[test]
fn test_add_product_continues_after_max_id() {
    let catalog =
        CatalogStore::with_products(vec![Product::new(7, "Desk", Decimal::new(120, 0)), mug()])
            .unwrap();

    let added = catalog.add_product("  Chair  ", Decimal::new(45, 0)).unwrap();
    assert_eq!(added.id().0, 8);
    assert_eq!(added.name(), "Chair");
    assert_eq!(catalog.list().last(), Some(&added));
}

#[test]
fn test_invalid_products_leave_catalog_unchanged() {
    let catalog = CatalogStore::with_products(vec![shirt()]).unwrap();
    let before = catalog.list();

    let empty_name = catalog.add_product("", Decimal::new(5, 0));
    assert!(matches!(empty_name, Err(ShopError::ValidationError { .. })));

    let negative = catalog.add_product("X", Decimal::new(-1, 0));
    assert!(matches!(negative, Err(ShopError::ValidationError { .. })));

    assert_eq!(*catalog.list(), *before);
    assert_eq!(catalog.len(), 1);
}

#[test]
fn test_add_product_after_highest_possible_id_is_rejected() {
    let catalog =
        CatalogStore::with_products(vec![Product::new(u32::MAX, "Last", Decimal::ONE)]).unwrap();
    let before = catalog.list();

    let result = catalog.add_product("Next", Decimal::ONE);
    assert!(matches!(result, Err(ShopError::ValidationError { .. })));
    assert_eq!(*catalog.list(), *before);
}

#[test]
fn test_reload_rejects_invalid_products() {
    let catalog = CatalogStore::with_products(vec![shirt()]).unwrap();

    let unnamed: Vec<Product> =
        serde_json::from_str(r#"[{"id": 1, "name": "", "price": 5}]"#).unwrap();
    let negative: Vec<Product> =
        serde_json::from_str(r#"[{"id": 2, "name": "Refund", "price": -5}]"#).unwrap();
    let mixed = vec![mug(), Product::new(3, "Broken", Decimal::NEGATIVE_ONE)];

    for batch in [unnamed, negative, mixed] {
        let result = catalog.reload(batch);
        assert!(matches!(result, Err(ShopError::ValidationError { .. })));
        assert_eq!(*catalog.list(), vec![shirt()]);
    }
}

#[test]
fn test_reload_empty_clears_catalog() {
    let catalog = CatalogStore::with_products(SampleProductSource::sample_products()).unwrap();
    assert_eq!(catalog.len(), 4);

    catalog.reload(Vec::new()).unwrap();
    assert!(catalog.list().is_empty());
    assert!(catalog.is_empty());
}

#[test]
fn test_reload_rejects_duplicate_ids() {
    let catalog = CatalogStore::with_products(vec![shirt()]).unwrap();

    let result = catalog.reload(vec![mug(), Product::new(2, "Other Mug", Decimal::ONE)]);
    assert!(matches!(result, Err(ShopError::ValidationError { .. })));
    assert_eq!(*catalog.list(), vec![shirt()]);
}

#[test]
fn test_list_snapshot_survives_later_writes() {
    let catalog = CatalogStore::with_products(vec![shirt()]).unwrap();
    let snapshot = catalog.list();

    catalog.add_product("Poster", Decimal::new(8, 0)).unwrap();
    catalog.reload(vec![mug()]).unwrap();

    assert_eq!(*snapshot, vec![shirt()]);
    assert_eq!(catalog.find(mug().id()), Some(mug()));
    assert_eq!(catalog.find(shirt().id()), None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_readers_never_see_partial_reload() {
    let old = SampleProductSource::sample_products();
    let new = vec![shirt(), mug()];
    let catalog = Arc::new(CatalogStore::with_products(old.clone()).unwrap());
    let done = Arc::new(AtomicBool::new(false));

    let mut readers = Vec::new();
    for _ in 0..4 {
        let catalog = Arc::clone(&catalog);
        let done = Arc::clone(&done);
        let (old, new) = (old.clone(), new.clone());
        readers.push(tokio::spawn(async move {
            let mut reads = 0u32;
            while !done.load(Ordering::Acquire) || reads == 0 {
                let seen = catalog.list();
                assert!(*seen == old || *seen == new, "torn read: {:?}", seen);
                reads += 1;
                tokio::task::yield_now().await;
            }
        }));
    }

    for round in 0..200 {
        let batch = if round % 2 == 0 { new.clone() } else { old.clone() };
        catalog.reload(batch).unwrap();
        tokio::task::yield_now().await;
    }
    done.store(true, Ordering::Release);

    for reader in readers {
        reader.await.unwrap();
    }
}
