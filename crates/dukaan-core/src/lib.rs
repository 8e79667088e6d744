//! # dukaan-core: Pure Business Logic for Dukaan
//!
//! This crate is the **heart** of the Dukaan storefront. It contains the
//! domain model and business rules as pure code with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Dukaan Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Screens (customer / shopkeeper / admin)         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ synchronous store calls                │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    dukaan-store                                 │   │
//! │  │    ProductCatalogStore ── CartStore ── OrderStore               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ dukaan-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐       ┌───────────┐       ┌───────────┐        │   │
//! │  │   │   types   │       │validation │       │   error   │        │   │
//! │  │   │  Product  │       │   rules   │       │ CoreError │        │   │
//! │  │   │   Order   │       │  checks   │       │           │        │   │
//! │  │   └───────────┘       └───────────┘       └───────────┘        │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DEVICE STORAGE • NO NETWORK • PURE FUNCTIONS     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartItem, Order, OrderStatus)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic where it can be
//! 2. **No I/O**: Device storage and network access is FORBIDDEN here
//! 3. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use dukaan_core::Product` instead of
// `use dukaan_core::types::Product`

pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;
