//! # Repository Module
//!
//! Storage access for the product catalog.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  ProductService (product-api)                                          │
//! │       │                                                                 │
//! │       │  store.find(&filter.predicates())                              │
//! │       ▼                                                                 │
//! │  dyn ProductStore  ◄── the seam services and tests depend on           │
//! │       │                                                                 │
//! │       ├── ProductRepository (SQLite, this crate)                       │
//! │       └── in-memory doubles (service tests)                            │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD and filtering

use async_trait::async_trait;
use motor_core::{FieldPredicate, NewProduct, Product, ProductPatch};

use crate::error::DbResult;

pub mod product;

/// Storage operations the product business rules are written against.
///
/// Partial updates only touch the columns a [`ProductPatch`] supplies.
/// Implementations report constraint and malformed-input failures with
/// an error for which [`DbError::is_client_error`](crate::DbError::is_client_error)
/// is true.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Inserts a product and returns the stored record with its new id.
    async fn insert(&self, input: &NewProduct) -> DbResult<Product>;

    /// Looks a product up by id.
    async fn find_by_id(&self, id: i64) -> DbResult<Option<Product>>;

    /// All products satisfying every predicate; no predicates selects all.
    async fn find(&self, predicates: &[FieldPredicate]) -> DbResult<Vec<Product>>;

    /// Applies a patch to one product.
    ///
    /// Fails with `DbError::NotFound` when the id does not exist.
    async fn update_by_id(&self, id: i64, patch: &ProductPatch) -> DbResult<()>;

    /// Applies a patch to every product with the exact code.
    ///
    /// Returns the number of rows changed.
    async fn update_by_code(&self, code: &str, patch: &ProductPatch) -> DbResult<u64>;

    /// Deletes one product.
    ///
    /// Fails with `DbError::NotFound` when the id does not exist.
    async fn delete(&self, id: i64) -> DbResult<()>;

    /// Deletes every listed product, returning the number removed.
    async fn delete_many(&self, ids: &[i64]) -> DbResult<u64>;
}
