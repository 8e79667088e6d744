//! # dukaan-store: Shared Application State for Dukaan
//!
//! The single source of truth the screens call into. Three stores, one
//! storage abstraction, one subscriber mechanism.
//!
//! ## Store Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Store Architecture                                │
//! │                                                                         │
//! │  ┌───────────────────┐  ┌──────────────┐  ┌──────────────────┐         │
//! │  │ProductCatalogStore│  │  CartStore   │  │   OrderStore     │         │
//! │  │                   │  │              │  │                  │         │
//! │  │ Vec<Product>      │  │ Arc<Mutex<   │  │ Vec<Order>       │         │
//! │  │ + subscribers     │  │   Cart>>     │  │ (newest first)   │         │
//! │  │ + persistence     │  │              │  │                  │         │
//! │  └─────────┬─────────┘  └──────┬───────┘  └────────┬─────────┘         │
//! │            │                   └───► create_order ◄┘                    │
//! │            ▼                         (snapshot + clear)                 │
//! │  ┌───────────────────┐                                                  │
//! │  │ KeyValueStorage   │  get(key) / set(key, json) / remove(key)        │
//! │  │ File / Memory     │  best-effort, failures logged and swallowed     │
//! │  └───────────────────┘                                                  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Every store guards its state with a Mutex                           │
//! │  • Mutations are synchronous; persistence runs in the background       │
//! │  • Subscribers fire after the state lock is released                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Product catalog with dedupe, persistence, subscribers
//! - [`cart`] - The active shopping cart
//! - [`orders`] - Order history and checkout snapshotting
//! - [`storage`] - Device key-value storage (file-backed and in-memory)
//! - [`config`] - Data-directory resolution
//! - [`subscriber`] - Listener registry behind `subscribe()`

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod orders;
pub mod storage;
pub mod subscriber;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartStore};
pub use catalog::{ProductCatalogStore, PRODUCTS_KEY};
pub use config::StorageConfig;
pub use error::{StorageError, StorageResult};
pub use orders::OrderStore;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use subscriber::Subscription;
