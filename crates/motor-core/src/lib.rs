//! # motor-core: Pure Business Logic for the Motor Product Catalog
//!
//! This crate holds the rules of the catalog as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Motor Catalog Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  product-api (axum HTTP)                        │   │
//! │  │    admin guard ──► validation ──► ProductService ──► envelope   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ motor-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  filter   │  │   auth    │  │   │
//! │  │   │  Product  │  │   Money   │  │ Predicate │  │   Role    │  │   │
//! │  │   │  Patch    │  │  rounding │  │  ILIKE    │  │ authorize │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    motor-db (Database Layer)                    │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, NewProduct, ProductPatch, ...)
//! - [`money`] - Money type with two-decimal, half-up rounding
//! - [`filter`] - Translation of product filters into match predicates
//! - [`auth`] - Role-based authorization gate
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use motor_core::money::Money;
//!
//! // Prices are rounded half-up to the cent on the way in
//! let price = Money::from_f64(100.555).unwrap();
//! assert_eq!(price.to_storage(), "100.56");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod auth;
pub mod error;
pub mod filter;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use auth::{authorize, AccessDenied, Role};
pub use error::{CoreError, CoreResult, MoneyError, ValidationError};
pub use filter::{FieldPredicate, MatchMode, ProductField};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Name of the request header carrying the caller's role.
///
/// The gate itself is transport-independent; this constant only tells the
/// HTTP layer where to look.
pub const ROLE_HEADER: &str = "x-user-role";
