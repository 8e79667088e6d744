//! # Cart Store
//!
//! The mutable working set of items the customer intends to purchase.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  Screen Action            Store Call              Cart State Change    │
//! │  ─────────────            ──────────              ─────────────────    │
//! │                                                                         │
//! │  Tap Product ────────────► add(product, n) ─────► merge or push line   │
//! │                                                                         │
//! │  Change Quantity ────────► update_quantity() ───► set exactly,         │
//! │                                                   < 1 removes the line │
//! │                                                                         │
//! │  Tap Remove ─────────────► remove(id) ──────────► retain others        │
//! │                                                                         │
//! │  Checkout / Clear ───────► clear() ─────────────► items.clear()        │
//! │                                                                         │
//! │  Badge Count ────────────► total_quantity() ────► recomputed each call │
//! │                                                                         │
//! │  The cart is decoupled from inventory: no stock check, no quantity     │
//! │  ceiling. It is in-memory only; an app restart starts empty.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use tracing::debug;

use dukaan_core::{validation, CartItem, Product};

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by product `id` (adding the same product merges)
/// - Quantity is >= 1 while a line exists; an update below one removes it,
///   and a non-positive add is ignored
#[derive(Debug, Clone, Default)]
pub struct Cart {
    /// Line items, in the order they were first added.
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds a product to the cart or increases quantity if already present.
    pub fn add(&mut self, product: &Product, quantity: i64) {
        self.merge_line(CartItem::from_product(product, quantity));
    }

    /// Merges a pre-built line item: quantities accumulate on a matching id,
    /// otherwise the line is appended. Used by both `add` and re-ordering.
    ///
    /// A non-positive quantity is ignored: it could drive a line below one,
    /// and lines below one are expressed as removal, never stored.
    pub fn merge_line(&mut self, line: CartItem) {
        if validation::validate_quantity(line.quantity).is_err() {
            debug!(id = %line.id, quantity = line.quantity, "ignoring non-positive cart add");
            return;
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.id == line.id) {
            existing.quantity += line.quantity;
            return;
        }
        self.items.push(line);
    }

    /// Sets a line's quantity exactly.
    ///
    /// ## Behavior
    /// - Quantity below one removes the line (never stored at zero)
    /// - Returns false when no line has the id
    pub fn update_quantity(&mut self, id: &str, quantity: i64) -> bool {
        if quantity < 1 {
            return self.remove(id);
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            item.quantity = quantity;
            true
        } else {
            false
        }
    }

    /// Removes a line by product id. Returns whether a line was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() != initial_len
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of distinct lines in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total quantity across all lines. Recomputed on every call, so it is
    /// always consistent with the current items.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(|i| i.line_total()).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Cart Store
// =============================================================================

/// Shared cart state.
///
/// ## Thread Safety
/// The cart lives behind `Arc<Mutex<Cart>>`: screens and the order store can
/// hold the same `Arc<CartStore>`, and the mutex keeps each operation atomic.
/// Operations are synchronous; their effect is visible to the caller as soon
/// as they return.
#[derive(Debug)]
pub struct CartStore {
    cart: Arc<Mutex<Cart>>,
}

impl CartStore {
    /// Creates a new empty cart store.
    pub fn new() -> Self {
        CartStore {
            cart: Arc::new(Mutex::new(Cart::new())),
        }
    }

    /// Executes a function with read access to the cart.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().expect("cart mutex poisoned");
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().expect("cart mutex poisoned");
        f(&mut cart)
    }

    /// Adds a product, merging with an existing line on the same id.
    pub fn add(&self, product: &Product, quantity: i64) {
        debug!(id = %product.id, quantity, "add to cart");
        self.with_cart_mut(|c| c.add(product, quantity));
    }

    /// Merges a pre-built line item (used by re-ordering).
    pub fn add_item(&self, line: CartItem) {
        self.with_cart_mut(|c| c.merge_line(line));
    }

    /// Sets a line's quantity exactly; below one removes the line.
    pub fn update_quantity(&self, id: &str, quantity: i64) -> bool {
        debug!(id = %id, quantity, "update cart quantity");
        self.with_cart_mut(|c| c.update_quantity(id, quantity))
    }

    /// Removes a line. No-op (false) when the id is not in the cart.
    pub fn remove(&self, id: &str) -> bool {
        debug!(id = %id, "remove from cart");
        self.with_cart_mut(|c| c.remove(id))
    }

    /// Empties the cart.
    pub fn clear(&self) {
        debug!("clear cart");
        self.with_cart_mut(|c| c.clear());
    }

    /// Snapshot of the current lines.
    pub fn items(&self) -> Vec<CartItem> {
        self.with_cart(|c| c.items.clone())
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.with_cart(|c| c.item_count())
    }

    /// Total quantity across all lines (the cart badge number).
    pub fn total_quantity(&self) -> i64 {
        self.with_cart(|c| c.total_quantity())
    }

    /// Sum of line totals for the current cart.
    pub fn subtotal(&self) -> f64 {
        self.with_cart(|c| c.subtotal())
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.with_cart(|c| c.is_empty())
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
