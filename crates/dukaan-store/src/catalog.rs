//! # Product Catalog Store
//!
//! Single source of truth for the shop's product list, with best-effort
//! persistence and change notification.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalog Mutation Flow                                │
//! │                                                                         │
//! │  add(new_product)                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate fields (name, category, price)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  duplicate check: case-insensitive (name, category)                    │
//! │       │                                                                 │
//! │       ├── duplicate → Err(DuplicateProduct), NO mutation               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  assign UUID, prepend to in-memory list  ← authoritative, immediate    │
//! │       │                                                                 │
//! │       ├──► background persist (fire-and-forget, failures logged)       │
//! │       │                                                                 │
//! │       └──► notify subscribers (synchronous, registration order)        │
//! │                                                                         │
//! │  The same persist + notify tail runs after update, delete, and         │
//! │  clear_all. Reads never persist and never notify.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use dukaan_core::{
    normalize_dedupe_key, validation, CoreError, CoreResult, NewProduct, Product, ProductPatch,
};

use crate::error::StorageResult;
use crate::storage::KeyValueStorage;
use crate::subscriber::{SubscriberRegistry, Subscription};

/// Fixed device-storage key for the serialized product array.
pub const PRODUCTS_KEY: &str = "shop_products";

// =============================================================================
// Product Catalog Store
// =============================================================================

/// The shop's product list.
///
/// ## Persistence Model
/// In-memory state is authoritative. Every mutation schedules a background
/// write of the whole array as JSON under [`PRODUCTS_KEY`]; a write failure
/// is logged and swallowed. Callers that need durability confirmation can
/// use [`ProductCatalogStore::save`] explicitly.
pub struct ProductCatalogStore {
    products: Arc<Mutex<Vec<Product>>>,
    storage: Arc<dyn KeyValueStorage>,
    subscribers: SubscriberRegistry<[Product]>,
}

impl ProductCatalogStore {
    /// Creates an empty catalog backed by the given storage.
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        ProductCatalogStore {
            products: Arc::new(Mutex::new(Vec::new())),
            storage,
            subscribers: SubscriberRegistry::new(),
        }
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Loads the persisted product array into memory.
    ///
    /// ## Failure Handling
    /// A missing key, a storage error, or unreadable JSON all leave the
    /// in-memory list at its current value (empty on first run) and log the
    /// reason. This never fails the caller: the screens must come up even
    /// when the device storage is wedged.
    pub async fn load(&self) {
        let raw = match self.storage.get(PRODUCTS_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("no persisted catalog, starting empty");
                return;
            }
            Err(e) => {
                warn!(error = %e, "failed to read persisted catalog, keeping in-memory list");
                return;
            }
        };

        match serde_json::from_str::<Vec<Product>>(&raw) {
            Ok(products) => {
                let count = products.len();
                *self.products.lock().expect("catalog mutex poisoned") = products;
                info!(count, "catalog loaded from device storage");
            }
            Err(e) => {
                warn!(error = %e, "persisted catalog is unreadable, keeping in-memory list");
            }
        }
    }

    /// Persists the current list and reports the outcome.
    ///
    /// The mutating operations persist fire-and-forget; this is the explicit
    /// path for callers that want to observe durability.
    pub async fn save(&self) -> StorageResult<()> {
        let json = serde_json::to_string(&self.snapshot())?;
        self.storage.set(PRODUCTS_KEY, &json).await?;
        Ok(())
    }

    /// Schedules a background write of the current list.
    ///
    /// Runs on the ambient tokio runtime when one exists; otherwise the
    /// write is skipped with a warning. Either way the caller proceeds with
    /// the in-memory state.
    fn persist_in_background(&self) {
        let json = match serde_json::to_string(&self.snapshot()) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "failed to serialize catalog, skipping persist");
                return;
            }
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let storage = Arc::clone(&self.storage);
                handle.spawn(async move {
                    if let Err(e) = storage.set(PRODUCTS_KEY, &json).await {
                        warn!(error = %e, "background catalog persist failed");
                    }
                });
            }
            Err(_) => {
                warn!("no async runtime, skipping background catalog persist");
            }
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds a new product to the front of the catalog.
    ///
    /// ## Behavior
    /// - Field validation first (name, category, price)
    /// - Rejects a case-insensitive `(name, category)` duplicate with no
    ///   mutation at all
    /// - On success: assigns a UUID, prepends, persists, notifies
    pub fn add(&self, new_product: NewProduct) -> CoreResult<Product> {
        validation::validate_product_name(&new_product.name)?;
        validation::validate_category(&new_product.category)?;
        validation::validate_price(&new_product.price)?;

        let product = {
            let mut products = self.products.lock().expect("catalog mutex poisoned");

            let key = normalize_dedupe_key(&new_product.name, &new_product.category);
            if products.iter().any(|p| p.dedupe_key() == key) {
                return Err(CoreError::DuplicateProduct {
                    name: new_product.name,
                    category: new_product.category,
                });
            }

            let product = new_product.into_product();
            products.insert(0, product.clone());
            product
        };

        info!(id = %product.id, name = %product.name, "product added");
        self.persist_in_background();
        self.notify_subscribers();
        Ok(product)
    }

    /// Merges a patch into the product with the given id.
    ///
    /// The duplicate check re-runs against all *other* products using the
    /// patched name/category, so a product can keep its own pair but cannot
    /// take another product's.
    pub fn update(&self, id: &str, patch: ProductPatch) -> CoreResult<Product> {
        if let Some(name) = &patch.name {
            validation::validate_product_name(name)?;
        }
        if let Some(category) = &patch.category {
            validation::validate_category(category)?;
        }
        if let Some(price) = &patch.price {
            validation::validate_price(price)?;
        }

        let updated = {
            let mut products = self.products.lock().expect("catalog mutex poisoned");

            let index = products
                .iter()
                .position(|p| p.id == id)
                .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;

            let key = patch.patched_dedupe_key(&products[index]);
            if products
                .iter()
                .any(|p| p.id != id && p.dedupe_key() == key)
            {
                return Err(CoreError::DuplicateProduct {
                    name: patch.name.unwrap_or_else(|| products[index].name.clone()),
                    category: patch
                        .category
                        .unwrap_or_else(|| products[index].category.clone()),
                });
            }

            patch.apply_to(&mut products[index]);
            products[index].clone()
        };

        info!(id = %updated.id, "product updated");
        self.persist_in_background();
        self.notify_subscribers();
        Ok(updated)
    }

    /// Removes a product by id.
    ///
    /// Persists and notifies regardless of whether anything was removed;
    /// returns whether a row actually went away.
    pub fn delete(&self, id: &str) -> bool {
        let removed = {
            let mut products = self.products.lock().expect("catalog mutex poisoned");
            let initial_len = products.len();
            products.retain(|p| p.id != id);
            products.len() != initial_len
        };

        debug!(id = %id, removed, "product delete");
        self.persist_in_background();
        self.notify_subscribers();
        removed
    }

    /// Empties the catalog. Shopkeeper "reset shop" action.
    pub fn clear_all(&self) {
        self.products
            .lock()
            .expect("catalog mutex poisoned")
            .clear();

        info!("catalog cleared");
        self.persist_in_background();
        self.notify_subscribers();
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Snapshot of all products, newest first.
    pub fn all(&self) -> Vec<Product> {
        self.snapshot()
    }

    /// Looks up a product by id.
    pub fn get(&self, id: &str) -> Option<Product> {
        self.products
            .lock()
            .expect("catalog mutex poisoned")
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Case-insensitive substring search over name, description, and
    /// category. Pure read, no mutation.
    pub fn search(&self, term: &str) -> Vec<Product> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return self.snapshot();
        }

        self.products
            .lock()
            .expect("catalog mutex poisoned")
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
                    || p.category.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    /// Products whose category matches exactly.
    pub fn by_category(&self, category: &str) -> Vec<Product> {
        self.products
            .lock()
            .expect("catalog mutex poisoned")
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect()
    }

    /// Distinct categories, in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let products = self.products.lock().expect("catalog mutex poisoned");
        let mut categories: Vec<String> = Vec::new();
        for product in products.iter() {
            if !categories.contains(&product.category) {
                categories.push(product.category.clone());
            }
        }
        categories
    }

    /// Number of products in the catalog.
    pub fn count(&self) -> usize {
        self.products.lock().expect("catalog mutex poisoned").len()
    }

    // =========================================================================
    // Subscribers
    // =========================================================================

    /// Registers a listener invoked synchronously after every mutation with
    /// a snapshot of the full list. Listeners run in registration order.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&[Product]) + Send + Sync + 'static,
    {
        self.subscribers.subscribe(listener)
    }

    fn notify_subscribers(&self) {
        let snapshot = self.snapshot();
        self.subscribers.notify(&snapshot);
    }

    fn snapshot(&self) -> Vec<Product> {
        self.products
            .lock()
            .expect("catalog mutex poisoned")
            .clone()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn new_product(name: &str, category: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: format!("{} description", name),
            price: "100".to_string(),
            category: category.to_string(),
            sub_category: "General".to_string(),
            quantity: "1 kg".to_string(),
            image: None,
        }
    }

    fn store() -> ProductCatalogStore {
        ProductCatalogStore::new(Arc::new(MemoryStorage::new()))
    }

    #[tokio::test]
    async fn test_add_assigns_id_and_prepends() {
        let catalog = store();
        let first = catalog.add(new_product("Rice", "Grocery")).unwrap();
        let second = catalog.add(new_product("Milk", "Dairy")).unwrap();

        assert!(!first.id.is_empty());
        assert_ne!(first.id, second.id);

        let names: Vec<String> = catalog.all().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Milk", "Rice"]);
    }

    #[tokio::test]
    async fn test_duplicate_add_is_rejected_without_mutation() {
        let catalog = store();
        catalog.add(new_product("Basmati Rice", "Grocery")).unwrap();

        let err = catalog
            .add(new_product("  basmati RICE ", "GROCERY"))
            .unwrap_err();

        assert!(matches!(err, CoreError::DuplicateProduct { .. }));
        assert_eq!(catalog.count(), 1);
    }

    #[tokio::test]
    async fn test_same_name_different_category_is_allowed() {
        let catalog = store();
        catalog.add(new_product("Salt", "Grocery")).unwrap();
        catalog.add(new_product("Salt", "Cosmetics")).unwrap();
        assert_eq!(catalog.count(), 2);
    }

    #[tokio::test]
    async fn test_add_validates_fields() {
        let catalog = store();

        let mut blank_name = new_product("", "Grocery");
        blank_name.name = "  ".to_string();
        assert!(catalog.add(blank_name).is_err());

        let mut bad_price = new_product("Rice", "Grocery");
        bad_price.price = "ten".to_string();
        assert!(catalog.add(bad_price).is_err());

        assert_eq!(catalog.count(), 0);
    }

    #[tokio::test]
    async fn test_update_merges_patch() {
        let catalog = store();
        let product = catalog.add(new_product("Rice", "Grocery")).unwrap();

        let updated = catalog
            .update(
                &product.id,
                ProductPatch {
                    price: Some("120".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.price, "120");
        assert_eq!(updated.name, "Rice");
        assert_eq!(catalog.get(&product.id).unwrap().price, "120");
    }

    #[tokio::test]
    async fn test_update_missing_id_is_not_found() {
        let catalog = store();
        let err = catalog.update("ghost", ProductPatch::default()).unwrap_err();
        assert!(matches!(err, CoreError::ProductNotFound(_)));
    }

    #[tokio::test]
    async fn test_update_rejects_taking_another_products_pair() {
        let catalog = store();
        catalog.add(new_product("Rice", "Grocery")).unwrap();
        let milk = catalog.add(new_product("Milk", "Grocery")).unwrap();

        let err = catalog
            .update(
                &milk.id,
                ProductPatch {
                    name: Some("RICE".to_string()),
                    ..Default::default()
                },
            )
            .unwrap_err();

        assert!(matches!(err, CoreError::DuplicateProduct { .. }));
        assert_eq!(catalog.get(&milk.id).unwrap().name, "Milk");
    }

    #[tokio::test]
    async fn test_update_keeping_own_pair_is_allowed() {
        let catalog = store();
        let rice = catalog.add(new_product("Rice", "Grocery")).unwrap();

        // Same (name, category), new price: the dedupe check must exclude
        // the product being updated.
        let updated = catalog
            .update(
                &rice.id,
                ProductPatch {
                    name: Some("Rice".to_string()),
                    price: Some("150".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.price, "150");
    }

    #[tokio::test]
    async fn test_delete_reports_whether_removed() {
        let catalog = store();
        let product = catalog.add(new_product("Rice", "Grocery")).unwrap();

        assert!(catalog.delete(&product.id));
        assert!(!catalog.delete(&product.id));
        assert_eq!(catalog.count(), 0);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let catalog = store();
        catalog.add(new_product("Basmati Rice", "Grocery")).unwrap();
        catalog.add(new_product("Shampoo", "Cosmetics")).unwrap();

        assert_eq!(catalog.search("rice").len(), 1);
        assert_eq!(catalog.search("COSME").len(), 1); // category match
        assert_eq!(catalog.search("description").len(), 2); // description match
        assert_eq!(catalog.search("bleach").len(), 0);
        assert_eq!(catalog.search("  ").len(), 2); // blank returns all
    }

    #[tokio::test]
    async fn test_by_category_and_categories() {
        let catalog = store();
        catalog.add(new_product("Rice", "Grocery")).unwrap();
        catalog.add(new_product("Milk", "Dairy")).unwrap();
        catalog.add(new_product("Salt", "Grocery")).unwrap();

        assert_eq!(catalog.by_category("Grocery").len(), 2);
        assert_eq!(catalog.by_category("grocery").len(), 0); // exact match
        // Newest first, so first-seen order follows the list order.
        assert_eq!(catalog.categories(), vec!["Grocery", "Dairy"]);
    }

    #[tokio::test]
    async fn test_subscribers_fire_on_every_mutation() {
        let catalog = store();
        let calls = Arc::new(AtomicUsize::new(0));

        let calls_clone = Arc::clone(&calls);
        let sub = catalog.subscribe(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        let product = catalog.add(new_product("Rice", "Grocery")).unwrap();
        catalog.delete(&product.id);
        catalog.search("anything"); // reads do not notify

        assert_eq!(calls.load(Ordering::SeqCst), 2);

        sub.unsubscribe();
        catalog.add(new_product("Milk", "Dairy")).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_subscriber_sees_post_mutation_snapshot() {
        let catalog = store();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen_clone = Arc::clone(&seen);
        let _sub = catalog.subscribe(move |products| {
            seen_clone.lock().unwrap().push(products.len());
        });

        catalog.add(new_product("Rice", "Grocery")).unwrap();
        catalog.add(new_product("Milk", "Dairy")).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_failed_duplicate_add_does_not_notify() {
        let catalog = store();
        catalog.add(new_product("Rice", "Grocery")).unwrap();

        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);
        let _sub = catalog.subscribe(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        let _ = catalog.add(new_product("Rice", "Grocery"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let storage = Arc::new(MemoryStorage::new());

        let catalog = ProductCatalogStore::new(Arc::clone(&storage) as Arc<dyn KeyValueStorage>);
        catalog.add(new_product("Rice", "Grocery")).unwrap();
        catalog.add(new_product("Milk", "Dairy")).unwrap();
        catalog.save().await.unwrap();

        let fresh = ProductCatalogStore::new(storage as Arc<dyn KeyValueStorage>);
        fresh.load().await;

        assert_eq!(fresh.all(), catalog.all());
    }

    #[tokio::test]
    async fn test_load_with_unreadable_json_keeps_list() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(PRODUCTS_KEY, "not json {{{").await.unwrap();

        let catalog = ProductCatalogStore::new(storage as Arc<dyn KeyValueStorage>);
        catalog.add(new_product("Rice", "Grocery")).unwrap();
        catalog.load().await;

        // The unreadable payload is logged and ignored.
        assert_eq!(catalog.count(), 1);
    }

    #[tokio::test]
    async fn test_clear_all_empties_catalog() {
        let catalog = store();
        catalog.add(new_product("Rice", "Grocery")).unwrap();
        catalog.add(new_product("Milk", "Dairy")).unwrap();

        catalog.clear_all();

        assert_eq!(catalog.count(), 0);
        assert!(catalog.categories().is_empty());
    }
}
