//! # Validation Module
//!
//! Input validation for product payloads.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractors (axum)                                       │
//! │  ├── Type validation (JSON / query / path deserialization)             │
//! │  └── Price rounding happens here, inside Money's Deserialize           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required fields are non-blank                                     │
//! │  ├── Price is non-negative                                             │
//! │  └── Patches change at least one field                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── CHECK constraints                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use motor_core::money::Money;
//! use motor_core::types::NewProduct;
//! use motor_core::validation::validate_new_product;
//!
//! let input = NewProduct {
//!     code: "1000".to_string(),
//!     description: None,
//!     location: "West Malaysia".to_string(),
//!     price: Money::from_cents(30000),
//! };
//! assert!(validate_new_product(&input).is_ok());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{NewProduct, ProductPatch};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

fn require_text(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a product price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed
///
/// ## Example
/// ```rust
/// use motor_core::money::Money;
/// use motor_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(1099)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_cents(-100)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }
    Ok(())
}

/// Validates the `code` selector of a bulk update or delete.
pub fn validate_code_selector(code: &str) -> ValidationResult<()> {
    require_text("code", code)
}

// =============================================================================
// Payload Validators
// =============================================================================

/// Validates a create payload.
///
/// ## Rules
/// - `code` and `location` must not be blank
/// - `price` must be non-negative
/// - `description` is free text and may be absent
pub fn validate_new_product(input: &NewProduct) -> ValidationResult<()> {
    require_text("code", &input.code)?;
    require_text("location", &input.location)?;
    validate_price(input.price)
}

/// Validates a partial update.
///
/// A patch that names no field is rejected rather than treated as a no-op;
/// supplied fields follow the same rules as on create.
pub fn validate_patch(patch: &ProductPatch) -> ValidationResult<()> {
    if patch.is_empty() {
        return Err(ValidationError::EmptyPatch {
            fields: ProductPatch::FIELDS.join(", "),
        });
    }
    if let Some(location) = &patch.location {
        require_text("location", location)?;
    }
    if let Some(price) = patch.price {
        validate_price(price)?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn new_product(code: &str, location: &str, cents: i64) -> NewProduct {
        NewProduct {
            code: code.to_string(),
            description: Some("Sedan".to_string()),
            location: location.to_string(),
            price: Money::from_cents(cents),
        }
    }

    #[test]
    fn test_validate_new_product() {
        assert!(validate_new_product(&new_product("1000", "KL", 10056)).is_ok());
        assert!(validate_new_product(&new_product("1000", "KL", 0)).is_ok());

        assert_eq!(
            validate_new_product(&new_product("  ", "KL", 100)),
            Err(ValidationError::Required {
                field: "code".to_string()
            })
        );
        assert_eq!(
            validate_new_product(&new_product("1000", "", 100)),
            Err(ValidationError::Required {
                field: "location".to_string()
            })
        );
        assert_eq!(
            validate_new_product(&new_product("1000", "KL", -1)),
            Err(ValidationError::Negative {
                field: "price".to_string()
            })
        );
    }

    #[test]
    fn test_empty_patch_is_rejected() {
        let err = validate_patch(&ProductPatch::default()).unwrap_err();
        assert_eq!(err.to_string(), "at least one of location, price must be provided");
    }

    #[test]
    fn test_patch_fields_follow_create_rules() {
        let location_only = ProductPatch {
            location: Some("East Malaysia".to_string()),
            price: None,
        };
        assert!(validate_patch(&location_only).is_ok());

        let blank_location = ProductPatch {
            location: Some(" ".to_string()),
            price: None,
        };
        assert!(validate_patch(&blank_location).is_err());

        let negative = ProductPatch {
            location: None,
            price: Some(Money::from_cents(-5)),
        };
        assert!(validate_patch(&negative).is_err());
    }

    #[test]
    fn test_validate_code_selector() {
        assert!(validate_code_selector("800").is_ok());
        assert!(validate_code_selector("").is_err());
        assert!(validate_code_selector("   ").is_err());
    }
}
