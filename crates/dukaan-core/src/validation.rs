//! # Validation Module
//!
//! Input validation for shopkeeper-submitted product data.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form screens                                                 │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - field validation in the catalog store          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Catalog invariant - case-insensitive (name, category)        │
//! │           duplicate rejection                                           │
//! │                                                                         │
//! │  Defense in depth: the store never trusts the form layer               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a category name.
///
/// ## Rules
/// - Must not be empty (it is half of the dedupe key)
/// - Must be at most 100 characters
pub fn validate_category(category: &str) -> ValidationResult<()> {
    let category = category.trim();

    if category.is_empty() {
        return Err(ValidationError::Required {
            field: "category".to_string(),
        });
    }

    if category.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "category".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates a price display string.
///
/// ## Rules
/// - Must not be empty
/// - Must parse as a non-negative number
///
/// The catalog stores the string as entered; this check only guarantees that
/// [`crate::Product::unit_price`] will not silently coerce garbage to 0.0
/// for newly submitted products.
pub fn validate_price(price: &str) -> ValidationResult<()> {
    let price = price.trim();

    if price.is_empty() {
        return Err(ValidationError::Required {
            field: "price".to_string(),
        });
    }

    match price.parse::<f64>() {
        Ok(value) if value >= 0.0 => Ok(()),
        Ok(_) => Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        }),
        Err(_) => Err(ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "must be a number".to_string(),
        }),
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a cart quantity.
///
/// ## Rules
/// - Must be positive (> 0); the cart expresses removal as an explicit
///   remove or an update to a quantity below one, never as a stored zero
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Basmati Rice 1kg").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_category() {
        assert!(validate_category("Grocery").is_ok());
        assert!(validate_category("").is_err());
        assert!(validate_category(&"C".repeat(150)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price("120.50").is_ok());
        assert!(validate_price(" 0 ").is_ok());
        assert!(validate_price("").is_err());
        assert!(validate_price("-5").is_err());
        assert!(validate_price("ten rupees").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(500).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }
}
