//! End-to-end store flow: catalog → cart → order, with file-backed
//! persistence across a simulated app restart.

use std::sync::Arc;

use dukaan_core::NewProduct;
use dukaan_store::{
    CartStore, FileStorage, KeyValueStorage, OrderStore, ProductCatalogStore, PRODUCTS_KEY,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("dukaan_store=debug")
        .with_test_writer()
        .try_init();
}

fn new_product(name: &str, category: &str, price: &str) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        description: format!("{} from the corner shop", name),
        price: price.to_string(),
        category: category.to_string(),
        sub_category: "General".to_string(),
        quantity: "1 kg".to_string(),
        image: None,
    }
}

#[tokio::test]
async fn shopping_flow_from_catalog_to_order() {
    init_tracing();
    let catalog = ProductCatalogStore::new(Arc::new(dukaan_store::MemoryStorage::new()));
    let cart = Arc::new(CartStore::new());
    let orders = OrderStore::new(Arc::clone(&cart));

    let rice = catalog.add(new_product("Basmati Rice", "Grocery", "10")).unwrap();

    // Same product twice: quantities accumulate into one line.
    cart.add(&rice, 2);
    cart.add(&rice, 3);
    assert_eq!(cart.item_count(), 1);
    assert_eq!(cart.total_quantity(), 5);

    let order = orders.create_order().unwrap();
    assert_eq!(order.total, 50.0);
    assert_eq!(order.items.len(), 1);
    assert_eq!(cart.total_quantity(), 0);

    // Reorder puts the exact same lines back.
    assert!(orders.reorder(&order.id));
    assert_eq!(cart.total_quantity(), 5);
    assert_eq!(cart.subtotal(), 50.0);
}

#[tokio::test]
async fn catalog_survives_restart_via_file_storage() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();

    // First app run: add products and persist explicitly.
    {
        let storage: Arc<dyn KeyValueStorage> = Arc::new(FileStorage::at(dir.path()));
        let catalog = ProductCatalogStore::new(storage);
        catalog.add(new_product("Basmati Rice", "Grocery", "250")).unwrap();
        catalog.add(new_product("Shampoo", "Cosmetics", "320")).unwrap();
        catalog.save().await.unwrap();
    }

    assert!(dir.path().join(format!("{}.json", PRODUCTS_KEY)).exists());

    // Second app run: a fresh store loads an identical array.
    let storage: Arc<dyn KeyValueStorage> = Arc::new(FileStorage::at(dir.path()));
    let catalog = ProductCatalogStore::new(storage);
    catalog.load().await;

    let products = catalog.all();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].name, "Shampoo"); // order preserved, newest first
    assert_eq!(products[1].name, "Basmati Rice");
    assert_eq!(products[1].price, "250");

    // The dedupe invariant holds against reloaded rows too.
    assert!(catalog.add(new_product("basmati rice", "GROCERY", "9")).is_err());
    assert_eq!(catalog.count(), 2);
}

#[tokio::test]
async fn background_persist_lands_on_disk() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let storage: Arc<dyn KeyValueStorage> = Arc::new(FileStorage::at(dir.path()));
    let catalog = ProductCatalogStore::new(Arc::clone(&storage));

    catalog.add(new_product("Milk", "Dairy", "80")).unwrap();

    // The mutation's write is fire-and-forget; an explicit save gives a
    // deterministic point after which the data must be on disk.
    catalog.save().await.unwrap();

    let raw = storage.get(PRODUCTS_KEY).await.unwrap().unwrap();
    let persisted: Vec<dukaan_core::Product> = serde_json::from_str(&raw).unwrap();
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].name, "Milk");
}
