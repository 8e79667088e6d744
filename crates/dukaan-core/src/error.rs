//! # Error Types
//!
//! Domain-specific error types for dukaan-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  dukaan-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  dukaan-store errors (separate crate)                                  │
//! │  └── StorageError     - Device storage read/write failures             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → store API → screen message        │
//! │                                                                         │
//! │  NOTE: StorageError never reaches the screens. Persistence is           │
//! │  best-effort; a failed write is logged and in-memory state wins.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (name, category, ID)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. Each variant's `Display`
/// output is the user-facing message the screens show verbatim.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A product with the same case-insensitive (name, category) pair
    /// already exists in the catalog.
    ///
    /// ## When This Occurs
    /// - Shopkeeper adds a product a second time
    /// - An update renames a product onto an existing (name, category) pair
    #[error("A product named '{name}' already exists in category '{category}'")]
    DuplicateProduct { name: String, category: String },

    /// Product cannot be found by its ID.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// An order was requested from an empty cart.
    ///
    /// ## When This Occurs
    /// - Checkout screen called with nothing in the cart
    /// - A second checkout tap after the cart was already cleared
    #[error("Cannot create an order from an empty cart")]
    EmptyCart,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., a price that is not a number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_message_names_the_conflict() {
        let err = CoreError::DuplicateProduct {
            name: "Basmati Rice".to_string(),
            category: "Grocery".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "A product named 'Basmati Rice' already exists in category 'Grocery'"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "must be a number".to_string(),
        };
        assert_eq!(err.to_string(), "price has invalid format: must be a number");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "category".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
