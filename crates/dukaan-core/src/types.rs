//! # Domain Types
//!
//! Core domain types used throughout Dukaan.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartItem     │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id = product   │   │  id (UUID)      │       │
//! │  │  name/category  │   │  price (f64)    │   │  order_number   │       │
//! │  │  price (String) │   │  quantity       │   │  total, status  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Product.price is the shopkeeper's display string ("120.50");          │
//! │  CartItem freezes it to a numeric unit price at add-to-cart time.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Discipline
//! A cart line freezes the product's name, price, and image when it is added;
//! an order freezes the whole cart when it is created. Nothing downstream of
//! a snapshot is recomputed when the source changes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Product
// =============================================================================

/// A product submitted by the shopkeeper.
///
/// ## Dedupe Invariant
/// No two products in a catalog may share the same case-insensitive
/// `(name, category)` pair. The normalized key comes from [`Product::dedupe_key`]
/// and the catalog store enforces the invariant on add and update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4), assigned by the catalog store.
    pub id: String,

    /// Display name shown to customers.
    pub name: String,

    /// Free-text description.
    pub description: String,

    /// Price as entered by the shopkeeper (display string, e.g. "120.50").
    pub price: String,

    /// Top-level category (e.g. "Grocery").
    pub category: String,

    /// Sub-category within the category (e.g. "Rice").
    pub sub_category: String,

    /// Pack quantity / unit label as entered (e.g. "1 kg", "500 ml").
    pub quantity: String,

    /// Optional image URI.
    pub image: Option<String>,
}

impl Product {
    /// Returns the normalized `(name, category)` pair used for duplicate
    /// detection: trimmed and lowercased.
    pub fn dedupe_key(&self) -> (String, String) {
        normalize_dedupe_key(&self.name, &self.category)
    }

    /// Parses the display price into a numeric unit price.
    ///
    /// Unparseable input yields `0.0`, matching the forgiving coercion the
    /// storefront screens rely on for legacy rows.
    pub fn unit_price(&self) -> f64 {
        self.price.trim().parse().unwrap_or(0.0)
    }
}

/// Normalizes a `(name, category)` pair for case-insensitive comparison.
pub fn normalize_dedupe_key(name: &str, category: &str) -> (String, String) {
    (
        name.trim().to_lowercase(),
        category.trim().to_lowercase(),
    )
}

// =============================================================================
// New Product
// =============================================================================

/// Input for creating a product: everything except the store-assigned `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub sub_category: String,
    pub quantity: String,
    pub image: Option<String>,
}

impl NewProduct {
    /// Materializes the product with a freshly generated UUID.
    pub fn into_product(self) -> Product {
        Product {
            id: Uuid::new_v4().to_string(),
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            sub_category: self.sub_category,
            quantity: self.quantity,
            image: self.image,
        }
    }
}

// =============================================================================
// Product Patch
// =============================================================================

/// Per-field merge patch for product updates.
///
/// `None` leaves the field untouched. For `image`, `Some(None)` clears the
/// image while `Some(Some(uri))` replaces it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub quantity: Option<String>,
    pub image: Option<Option<String>>,
}

impl ProductPatch {
    /// Applies the patch to a product in place.
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(description) = &self.description {
            product.description = description.clone();
        }
        if let Some(price) = &self.price {
            product.price = price.clone();
        }
        if let Some(category) = &self.category {
            product.category = category.clone();
        }
        if let Some(sub_category) = &self.sub_category {
            product.sub_category = sub_category.clone();
        }
        if let Some(quantity) = &self.quantity {
            product.quantity = quantity.clone();
        }
        if let Some(image) = &self.image {
            product.image = image.clone();
        }
    }

    /// Returns the `(name, category)` pair the product would have after the
    /// patch is applied. Used for the duplicate re-check on update.
    pub fn patched_dedupe_key(&self, current: &Product) -> (String, String) {
        let name = self.name.as_deref().unwrap_or(&current.name);
        let category = self.category.as_deref().unwrap_or(&current.category);
        normalize_dedupe_key(name, category)
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// A line item in the shopping cart.
///
/// ## Design Notes
/// - `id` matches the source product's id; the cart merges lines on it
/// - `price` is numeric and frozen at add-to-cart time
/// - `unit` carries the product's pack-quantity label for display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Source product ID.
    pub id: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Unit price at time of adding (frozen).
    pub price: f64,

    /// Image URI at time of adding (empty string when the product has none).
    pub image: String,

    /// Quantity in cart. Always >= 1 while the line exists; the cart removes
    /// a line rather than storing it at zero.
    pub quantity: i64,

    /// Unit label shown next to the quantity (e.g. "1 kg").
    pub unit: String,
}

impl CartItem {
    /// Creates a cart line from a product and quantity.
    ///
    /// ## Price Freezing
    /// The numeric price is captured at this moment. If the shopkeeper later
    /// edits the product, lines already in the cart keep the original price.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartItem {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.unit_price(),
            image: product.image.clone().unwrap_or_default(),
            quantity,
            unit: product.quantity.clone(),
        }
    }

    /// Line total: unit price × quantity.
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// The status of an order.
///
/// Every order is created as `Requested`. `Delivered` and `Cancelled` are
/// terminal. No code path in this core transitions an order's status; if the
/// shopkeeper console grows a fulfilment flow it will own that transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order has been placed and awaits the shopkeeper.
    #[default]
    Requested,
    /// Order was fulfilled. Terminal.
    Delivered,
    /// Order was cancelled. Terminal.
    Cancelled,
}

impl OrderStatus {
    /// Returns true for states no order leaves.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

// =============================================================================
// Order
// =============================================================================

/// A frozen snapshot of a cart at checkout time.
///
/// ## Invariants
/// - `total` equals the sum of `price × quantity` over `items` at creation;
///   it is never recomputed afterwards
/// - `items` is a deep copy of the cart lines, immune to later cart edits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Human-readable order number (e.g. "ORD-483920").
    pub order_number: String,

    /// Order date, `YYYY-MM-DD`.
    pub date: String,

    /// Grand total frozen at creation.
    pub total: f64,

    /// Current status. Set once at creation; see [`OrderStatus`].
    pub status: OrderStatus,

    /// Deep-copied cart lines.
    pub items: Vec<CartItem>,
}

impl Order {
    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, category: &str, price: &str) -> Product {
        Product {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: String::new(),
            price: price.to_string(),
            category: category.to_string(),
            sub_category: String::new(),
            quantity: "1 kg".to_string(),
            image: None,
        }
    }

    #[test]
    fn test_dedupe_key_is_case_insensitive() {
        let a = product("Basmati Rice", "Grocery", "250");
        let b = product("  basmati RICE ", "GROCERY", "300");
        assert_eq!(a.dedupe_key(), b.dedupe_key());
    }

    #[test]
    fn test_unit_price_parses_display_string() {
        assert_eq!(product("x", "y", "120.50").unit_price(), 120.5);
        assert_eq!(product("x", "y", " 99 ").unit_price(), 99.0);
        assert_eq!(product("x", "y", "free").unit_price(), 0.0);
    }

    #[test]
    fn test_patch_applies_only_set_fields() {
        let mut p = product("Milk", "Dairy", "80");
        let patch = ProductPatch {
            price: Some("85".to_string()),
            ..Default::default()
        };
        patch.apply_to(&mut p);
        assert_eq!(p.price, "85");
        assert_eq!(p.name, "Milk");
    }

    #[test]
    fn test_patch_clears_image_with_inner_none() {
        let mut p = product("Milk", "Dairy", "80");
        p.image = Some("file://milk.png".to_string());
        let patch = ProductPatch {
            image: Some(None),
            ..Default::default()
        };
        patch.apply_to(&mut p);
        assert_eq!(p.image, None);
    }

    #[test]
    fn test_patched_dedupe_key_uses_current_for_unset_fields() {
        let p = product("Milk", "Dairy", "80");
        let patch = ProductPatch {
            name: Some("Whole Milk".to_string()),
            ..Default::default()
        };
        assert_eq!(
            patch.patched_dedupe_key(&p),
            ("whole milk".to_string(), "dairy".to_string())
        );
    }

    #[test]
    fn test_cart_item_freezes_product_data() {
        let mut p = product("Milk", "Dairy", "80");
        let line = CartItem::from_product(&p, 2);
        p.price = "999".to_string();

        assert_eq!(line.price, 80.0);
        assert_eq!(line.line_total(), 160.0);
        assert_eq!(line.unit, "1 kg");
    }

    #[test]
    fn test_order_status_terminality() {
        assert!(!OrderStatus::Requested.is_terminal());
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert_eq!(OrderStatus::default(), OrderStatus::Requested);
    }

    #[test]
    fn test_order_status_serde_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Requested).unwrap();
        assert_eq!(json, "\"requested\"");
        let back: OrderStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(back, OrderStatus::Cancelled);
    }
}
