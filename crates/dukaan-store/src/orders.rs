//! # Order Store
//!
//! Freezes the current cart into an order and maintains order history.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Flow                                        │
//! │                                                                         │
//! │  create_order()                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  snapshot cart lines (deep copy)                                       │
//! │       │                                                                 │
//! │       ├── empty? → Err(EmptyCart)                                      │
//! │       ▼                                                                 │
//! │  total = Σ price × quantity   ← frozen, never recomputed               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Order { status: Requested, order_number: ORD-nnnnnn, date: today }    │
//! │       │                                                                 │
//! │       ├──► prepend to history (newest first, unbounded)                │
//! │       └──► clear the cart                                              │
//! │                                                                         │
//! │  NOTE: the cart snapshot and the clear are two separate cart locks.    │
//! │  Today every caller is synchronous so nothing interleaves between      │
//! │  them; any future await point in this path would reopen that gap.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use dukaan_core::{CoreError, CoreResult, Order, OrderStatus};

use crate::cart::CartStore;

// =============================================================================
// Order Store
// =============================================================================

/// Order history plus the checkout operation that feeds it.
///
/// History is in-memory only and grows for the life of the process; the
/// storefront has no eviction or archival for past orders.
pub struct OrderStore {
    orders: Mutex<Vec<Order>>,
    cart: Arc<CartStore>,
}

impl OrderStore {
    /// Creates an empty order store bound to the cart it snapshots.
    pub fn new(cart: Arc<CartStore>) -> Self {
        OrderStore {
            orders: Mutex::new(Vec::new()),
            cart,
        }
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Freezes the current cart into a new `Requested` order, prepends it to
    /// history, and clears the cart.
    ///
    /// The returned order is the snapshot: its `total` is the pre-order sum
    /// of `price × quantity` and its items are deep copies of the cart lines.
    pub fn create_order(&self) -> CoreResult<Order> {
        let items = self.cart.items();
        if items.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let total: f64 = items.iter().map(|i| i.line_total()).sum();
        let order = Order {
            id: Uuid::new_v4().to_string(),
            order_number: generate_order_number(),
            date: Utc::now().format("%Y-%m-%d").to_string(),
            total,
            status: OrderStatus::Requested,
            items,
        };

        self.orders
            .lock()
            .expect("orders mutex poisoned")
            .insert(0, order.clone());
        self.cart.clear();

        info!(
            id = %order.id,
            order_number = %order.order_number,
            total = order.total,
            items = order.items.len(),
            "order created"
        );
        Ok(order)
    }

    /// Copies a past order's items back into the cart.
    ///
    /// The cart is cleared first, then each item goes through the cart's
    /// merge path, so the resulting cart matches the order's item list
    /// exactly. Returns false when the order id is unknown (cart untouched).
    pub fn reorder(&self, order_id: &str) -> bool {
        let items = {
            let orders = self.orders.lock().expect("orders mutex poisoned");
            match orders.iter().find(|o| o.id == order_id) {
                Some(order) => order.items.clone(),
                None => {
                    debug!(order_id = %order_id, "reorder for unknown order");
                    return false;
                }
            }
        };

        self.cart.clear();
        for item in items {
            self.cart.add_item(item);
        }

        info!(order_id = %order_id, "order copied back into cart");
        true
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Snapshot of the order history, newest first.
    pub fn orders(&self) -> Vec<Order> {
        self.orders.lock().expect("orders mutex poisoned").clone()
    }

    /// Looks up an order by id.
    pub fn get(&self, id: &str) -> Option<Order> {
        self.orders
            .lock()
            .expect("orders mutex poisoned")
            .iter()
            .find(|o| o.id == id)
            .cloned()
    }

    /// The `n` most recent orders.
    pub fn recent(&self, n: usize) -> Vec<Order> {
        self.orders
            .lock()
            .expect("orders mutex poisoned")
            .iter()
            .take(n)
            .cloned()
            .collect()
    }

    /// Whether any order has been placed this session.
    pub fn has_orders(&self) -> bool {
        !self.orders.lock().expect("orders mutex poisoned").is_empty()
    }

    /// Number of orders in history.
    pub fn count(&self) -> usize {
        self.orders.lock().expect("orders mutex poisoned").len()
    }
}

/// Derives a display order number from the current time: `ORD-` plus the
/// last six digits of the millisecond timestamp.
fn generate_order_number() -> String {
    let millis = Utc::now().timestamp_millis();
    format!("ORD-{:06}", millis.rem_euclid(1_000_000))
}

// =============================================================================
// Unit Tests
// =============================================================================
