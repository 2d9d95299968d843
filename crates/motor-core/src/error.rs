//! # Error Types
//!
//! Domain-specific error types for motor-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  motor-core errors (this file)                                         │
//! │  ├── CoreError        - Business-rule outcomes                         │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── MoneyError       - Price parse/range failures                     │
//! │                                                                         │
//! │  motor-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  product-api errors (in app)                                           │
//! │  └── ApiError         - What HTTP clients see                          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Client                 │
//! │        sqlx::Error → DbError → CoreError (classified by the service)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (ID, code, field)
//! 3. Each error variant maps to exactly one HTTP status

use thiserror::Error;

use crate::auth::AccessDenied;

// =============================================================================
// Core Error
// =============================================================================

/// Outcomes of the product business rules that are not a success.
///
/// The service layer classifies every storage failure into one of these
/// variants; the HTTP layer maps each variant to a status code.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No product carries the requested id.
    #[error("Product with ID {id} not found")]
    ProductNotFound { id: i64 },

    /// A bulk operation selected a code that matches no product.
    #[error("No products found with code {code}")]
    NoProductsWithCode { code: String },

    /// Storage rejected the input (constraint violation, malformed value).
    #[error("{0}")]
    InvalidInput(String),

    /// Anything else. The message is safe to show; details go to the log.
    #[error("{0}")]
    Internal(String),

    /// The caller's role does not allow the operation.
    #[error("{0}")]
    Unauthorized(#[from] AccessDenied),

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Returns true for the two not-found variants.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CoreError::ProductNotFound { .. } | CoreError::NoProductsWithCode { .. }
        )
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when request input doesn't meet requirements.
/// Raised before the business-rule layer runs.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} should not be empty")]
    Required { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// An update payload that changes nothing.
    #[error("at least one of {fields} must be provided")]
    EmptyPatch { fields: String },
}

// =============================================================================
// Money Error
// =============================================================================

/// Failures turning external input into a [`Money`](crate::money::Money).
#[derive(Debug, Error, PartialEq)]
pub enum MoneyError {
    /// NaN or infinity.
    #[error("amount must be a finite number")]
    NotFinite,

    /// Text that is not a decimal number.
    #[error("'{0}' is not a decimal amount")]
    Unparseable(String),

    /// Too large to represent in cents.
    #[error("amount '{0}' is out of range")]
    OutOfRange(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
