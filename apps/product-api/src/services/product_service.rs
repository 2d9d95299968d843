//! Product business rules.
//!
//! Sits between the HTTP handlers and the [`ProductStore`]. Each operation
//! validates its input, performs the storage calls in a fixed order and turns
//! storage failures into a [`CoreError`]:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DbError::NotFound on an id          → ProductNotFound { id }           │
//! │  empty lookup by code                → NoProductsWithCode { code }      │
//! │  DbError::is_client_error()          → InvalidInput(<operation msg>)    │
//! │  anything else (logged with detail)  → Internal(<operation msg>)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Id and code mutations look the records up first and never call the
//! mutating storage operation when nothing matches. Lookup and mutation are
//! separate statements: a concurrent writer can slip in between them, and
//! concurrent bulk updates of one code are last-write-wins.

use std::sync::Arc;
use tracing::{error, info, warn};

use motor_core::validation::{validate_code_selector, validate_new_product, validate_patch};
use motor_core::{
    CoreError, CoreResult, NewProduct, Product, ProductFilter, ProductPatch, UpdatedProduct,
    UpdatedProducts,
};
use motor_db::{DbError, ProductStore};

/// Failure messages of one operation.
struct Messages {
    operation: &'static str,
    invalid: &'static str,
    internal: &'static str,
}

const CREATE: Messages = Messages {
    operation: "create",
    invalid: "Invalid product data or duplicate entry",
    internal: "Failed to create product",
};

const FIND_ALL: Messages = Messages {
    operation: "find_all",
    invalid: "Invalid filter parameters",
    internal: "Failed to fetch products",
};

const FIND_ONE: Messages = Messages {
    operation: "find_one",
    invalid: "Invalid product ID",
    internal: "Failed to fetch product",
};

const UPDATE: Messages = Messages {
    operation: "update",
    invalid: "Invalid update data",
    internal: "Failed to update product",
};

const UPDATE_BY_CODE: Messages = Messages {
    operation: "update_by_code",
    invalid: "Invalid update data or product code",
    internal: "Failed to update products",
};

const REMOVE: Messages = Messages {
    operation: "remove",
    invalid: "Invalid product ID",
    internal: "Failed to delete product",
};

const REMOVE_BY_CODE: Messages = Messages {
    operation: "remove_by_code",
    invalid: "Invalid product code",
    internal: "Failed to delete products",
};

fn classify(err: DbError, messages: &Messages) -> CoreError {
    if err.is_client_error() {
        warn!(operation = messages.operation, error = %err, "Storage rejected input");
        CoreError::InvalidInput(messages.invalid.to_string())
    } else {
        error!(operation = messages.operation, error = %err, "Storage failure");
        CoreError::Internal(messages.internal.to_string())
    }
}

/// Classification for id-addressed calls, where a vanished row is a not-found.
fn classify_for_id(err: DbError, id: i64, messages: &Messages) -> CoreError {
    match err {
        DbError::NotFound { .. } => CoreError::ProductNotFound { id },
        other => classify(other, messages),
    }
}

/// Product service.
#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn ProductStore>,
}

impl ProductService {
    /// Create a new product service over a store.
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        ProductService { store }
    }

    /// Inserts a product and returns it as stored.
    pub async fn create(&self, input: NewProduct) -> CoreResult<Product> {
        validate_new_product(&input)?;

        let product = self
            .store
            .insert(&input)
            .await
            .map_err(|e| classify(e, &CREATE))?;

        info!(id = product.id, code = %product.code, "Product created");
        Ok(product)
    }

    /// Products matching the filter; every product when it is empty.
    pub async fn find_all(&self, filter: &ProductFilter) -> CoreResult<Vec<Product>> {
        self.store
            .find(&filter.predicates())
            .await
            .map_err(|e| classify(e, &FIND_ALL))
    }

    /// One product by id.
    pub async fn find_one(&self, id: i64) -> CoreResult<Product> {
        self.store
            .find_by_id(id)
            .await
            .map_err(|e| classify(e, &FIND_ONE))?
            .ok_or(CoreError::ProductNotFound { id })
    }

    /// Applies a patch to one product.
    pub async fn update(&self, id: i64, patch: &ProductPatch) -> CoreResult<UpdatedProduct> {
        validate_patch(patch)?;

        self.store
            .find_by_id(id)
            .await
            .map_err(|e| classify(e, &UPDATE))?
            .ok_or(CoreError::ProductNotFound { id })?;

        self.store
            .update_by_id(id, patch)
            .await
            .map_err(|e| classify_for_id(e, id, &UPDATE))?;

        info!(id = id, "Product updated");
        Ok(UpdatedProduct { updated_id: id })
    }

    /// Applies a patch to every product with the code.
    ///
    /// The returned ids come from the lookup that precedes the update.
    pub async fn update_by_code(
        &self,
        code: &str,
        patch: &ProductPatch,
    ) -> CoreResult<UpdatedProducts> {
        validate_code_selector(code)?;
        validate_patch(patch)?;

        let family = self.family(code, &UPDATE_BY_CODE).await?;

        let changed = self
            .store
            .update_by_code(code, patch)
            .await
            .map_err(|e| classify(e, &UPDATE_BY_CODE))?;

        if changed != family.len() as u64 {
            warn!(
                code = %code,
                looked_up = family.len(),
                changed = changed,
                "Product family changed between lookup and update"
            );
        }

        let updated_ids: Vec<i64> = family.iter().map(|p| p.id).collect();
        info!(code = %code, count = updated_ids.len(), "Products updated");
        Ok(UpdatedProducts { updated_ids })
    }

    /// Deletes one product and returns its last state.
    pub async fn remove(&self, id: i64) -> CoreResult<Product> {
        let product = self
            .store
            .find_by_id(id)
            .await
            .map_err(|e| classify(e, &REMOVE))?
            .ok_or(CoreError::ProductNotFound { id })?;

        self.store
            .delete(id)
            .await
            .map_err(|e| classify_for_id(e, id, &REMOVE))?;

        info!(id = id, "Product deleted");
        Ok(product)
    }

    /// Deletes every product with the code and returns them.
    pub async fn remove_by_code(&self, code: &str) -> CoreResult<Vec<Product>> {
        validate_code_selector(code)?;

        let family = self.family(code, &REMOVE_BY_CODE).await?;
        let ids: Vec<i64> = family.iter().map(|p| p.id).collect();

        self.store
            .delete_many(&ids)
            .await
            .map_err(|e| classify(e, &REMOVE_BY_CODE))?;

        info!(code = %code, count = ids.len(), "Products deleted");
        Ok(family)
    }

    /// Every product with exactly this code, or `NoProductsWithCode`.
    async fn family(&self, code: &str, messages: &Messages) -> CoreResult<Vec<Product>> {
        let family = self
            .store
            .find(&ProductFilter::by_code(code).predicates())
            .await
            .map_err(|e| classify(e, messages))?;

        if family.is_empty() {
            return Err(CoreError::NoProductsWithCode {
                code: code.to_string(),
            });
        }
        Ok(family)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
