//! # Product Repository
//!
//! SQLite implementation of [`ProductStore`].
//!
//! ## Filter Rendering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 FieldPredicate → SQL                                    │
//! │                                                                         │
//! │  Exact               code = ?                                          │
//! │  InsensitivePattern  LOWER(location) LIKE LOWER(?)                     │
//! │                                                                         │
//! │  ProductFilter { code: "1000", location: "%malaysia" }                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SELECT ... FROM products                                              │
//! │  WHERE code = ? AND LOWER(location) LIKE LOWER(?)                      │
//! │  ORDER BY id                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Price Column
//! `price` is TEXT holding `Money::to_storage()` output. Rows are decoded
//! through `Money::from_storage`, so a value written by another tool with
//! extra decimals is still returned rounded to the cent.

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use motor_core::{FieldPredicate, MatchMode, Money, NewProduct, Product, ProductPatch};

use crate::error::{DbError, DbResult};
use crate::repository::ProductStore;

const PRODUCT_COLUMNS: &str = "id, code, description, location, price";

/// Ids bound per `DELETE ... IN (...)` statement.
const DELETE_BATCH_SIZE: usize = 500;

// =============================================================================
// Row Mapping
// =============================================================================

/// A `products` row as SQLite returns it.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    code: String,
    description: Option<String>,
    location: String,
    price: String,
}

impl TryFrom<ProductRow> for Product {
    type Error = DbError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let price = Money::from_storage(&row.price)
            .map_err(|e| DbError::Decode(format!("products.price of id {}: {}", row.id, e)))?;

        Ok(Product {
            id: row.id,
            code: row.code,
            description: row.description,
            location: row.location,
            price,
        })
    }
}

fn decode_all(rows: Vec<ProductRow>) -> DbResult<Vec<Product>> {
    rows.into_iter().map(Product::try_from).collect()
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let product = repo.insert(&new_product).await?;
/// let family = repo.find(&ProductFilter::by_code("1000").predicates()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Counts all products (for diagnostics and the seed binary).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Appends ` WHERE a AND b ...` for the predicates, or nothing.
fn push_predicates(builder: &mut QueryBuilder<'_, Sqlite>, predicates: &[FieldPredicate]) {
    for (index, predicate) in predicates.iter().enumerate() {
        builder.push(if index == 0 { " WHERE " } else { " AND " });

        let column = predicate.field.column();
        match predicate.mode {
            MatchMode::Exact => {
                builder.push(column).push(" = ");
                builder.push_bind(predicate.value.clone());
            }
            MatchMode::InsensitivePattern => {
                builder.push("LOWER(").push(column).push(") LIKE LOWER(");
                builder.push_bind(predicate.value.clone());
                builder.push(")");
            }
        }
    }
}

#[async_trait]
impl ProductStore for ProductRepository {
    async fn insert(&self, input: &NewProduct) -> DbResult<Product> {
        debug!(code = %input.code, "Inserting product");

        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO products (code, description, location, price)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, code, description, location, price
            "#,
        )
        .bind(&input.code)
        .bind(&input.description)
        .bind(&input.location)
        .bind(input.price.to_storage())
        .fetch_one(&self.pool)
        .await?;

        Product::try_from(row)
    }

    async fn find_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, code, description, location, price
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Product::try_from).transpose()
    }

    async fn find(&self, predicates: &[FieldPredicate]) -> DbResult<Vec<Product>> {
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT ");
        builder.push(PRODUCT_COLUMNS).push(" FROM products");
        push_predicates(&mut builder, predicates);
        builder.push(" ORDER BY id");

        let rows: Vec<ProductRow> = builder.build_query_as().fetch_all(&self.pool).await?;

        debug!(
            predicates = predicates.len(),
            count = rows.len(),
            "Product query returned rows"
        );
        decode_all(rows)
    }

    async fn update_by_id(&self, id: i64, patch: &ProductPatch) -> DbResult<()> {
        debug!(id = %id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                location = COALESCE(?1, location),
                price = COALESCE(?2, price)
            WHERE id = ?3
            "#,
        )
        .bind(&patch.location)
        .bind(patch.price.map(|p| p.to_storage()))
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    async fn update_by_code(&self, code: &str, patch: &ProductPatch) -> DbResult<u64> {
        debug!(code = %code, "Updating products by code");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                location = COALESCE(?1, location),
                price = COALESCE(?2, price)
            WHERE code = ?3
            "#,
        )
        .bind(&patch.location)
        .bind(patch.price.map(|p| p.to_storage()))
        .bind(code)
        .execute(&self.pool)
        .await?;

        debug!(code = %code, count = result.rows_affected(), "Products updated");
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    async fn delete_many(&self, ids: &[i64]) -> DbResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        // One statement per batch keeps each under SQLite's bound-variable
        // limit; the transaction makes the whole delete all-or-nothing
        let mut tx = self.pool.begin().await?;
        let mut deleted = 0;

        for batch in ids.chunks(DELETE_BATCH_SIZE) {
            let mut builder = QueryBuilder::<Sqlite>::new("DELETE FROM products WHERE id IN (");
            let mut separated = builder.separated(", ");
            for id in batch {
                separated.push_bind(*id);
            }
            separated.push_unseparated(")");

            deleted += builder.build().execute(&mut *tx).await?.rows_affected();
        }

        tx.commit().await?;

        debug!(count = deleted, "Products deleted");
        Ok(deleted)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use motor_core::ProductFilter;

    async fn repo() -> ProductRepository {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.products()
    }

    fn new_product(code: &str, location: &str, cents: i64) -> NewProduct {
        NewProduct {
            code: code.to_string(),
            description: Some("Sedan".to_string()),
            location: location.to_string(),
            price: Money::from_cents(cents),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_ids_and_stores_two_decimals() {
        let repo = repo().await;

        let first = repo.insert(&new_product("1000", "KL", 10056)).await.unwrap();
        let second = repo.insert(&new_product("1000", "Penang", 100)).await.unwrap();

        assert!(second.id > first.id);
        assert_eq!(first.price, Money::from_cents(10056));

        let stored: String = sqlx::query_scalar("SELECT price FROM products WHERE id = ?1")
            .bind(second.id)
            .fetch_one(&repo.pool)
            .await
            .unwrap();
        assert_eq!(stored, "1.00");
    }

    #[tokio::test]
    async fn test_description_is_nullable() {
        let repo = repo().await;
        let mut input = new_product("1000", "KL", 100);
        input.description = None;

        let created = repo.insert(&input).await.unwrap();
        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.description, None);
    }

    #[tokio::test]
    async fn test_find_by_id_missing_is_none() {
        let repo = repo().await;
        assert!(repo.find_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_applies_filter_rule() {
        let repo = repo().await;
        repo.insert(&new_product("1000", "West Malaysia", 100)).await.unwrap();
        repo.insert(&new_product("1000", "East Malaysia", 200)).await.unwrap();
        repo.insert(&new_product("2000", "west malaysia", 300)).await.unwrap();
        repo.insert(&new_product("10000", "Singapore", 400)).await.unwrap();

        let all = repo.find(&[]).await.unwrap();
        assert_eq!(all.len(), 4);

        let by_code = repo.find(&ProductFilter::by_code("1000").predicates()).await.unwrap();
        assert_eq!(by_code.len(), 2);
        assert!(by_code.iter().all(|p| p.code == "1000"));

        let filter = ProductFilter {
            code: None,
            location: Some("WEST MALAYSIA".to_string()),
        };
        let by_location = repo.find(&filter.predicates()).await.unwrap();
        assert_eq!(by_location.len(), 2);

        let filter = ProductFilter {
            code: Some("1000".to_string()),
            location: Some("%malaysia".to_string()),
        };
        let both = repo.find(&filter.predicates()).await.unwrap();
        assert_eq!(both.len(), 2);

        // SQL and in-memory evaluation agree
        let in_memory: Vec<_> = all.iter().filter(|p| filter.matches(p)).cloned().collect();
        assert_eq!(both, in_memory);
    }

    #[tokio::test]
    async fn test_code_match_is_case_sensitive() {
        let repo = repo().await;
        repo.insert(&new_product("ab-1", "KL", 100)).await.unwrap();

        let found = repo.find(&ProductFilter::by_code("AB-1").predicates()).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_update_by_id_only_touches_supplied_fields() {
        let repo = repo().await;
        let created = repo.insert(&new_product("1000", "KL", 10000)).await.unwrap();

        let patch = ProductPatch {
            location: None,
            price: Some(Money::from_cents(12345)),
        };
        repo.update_by_id(created.id, &patch).await.unwrap();

        let updated = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(updated.price, Money::from_cents(12345));
        assert_eq!(updated.location, "KL");
        assert_eq!(updated.code, "1000");
        assert_eq!(updated.description.as_deref(), Some("Sedan"));
    }

    #[tokio::test]
    async fn test_update_by_id_missing_is_not_found() {
        let repo = repo().await;
        let patch = ProductPatch {
            location: Some("KL".to_string()),
            price: None,
        };
        let err = repo.update_by_id(42, &patch).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_by_code_touches_whole_family() {
        let repo = repo().await;
        repo.insert(&new_product("800", "KL", 100)).await.unwrap();
        repo.insert(&new_product("800", "Penang", 200)).await.unwrap();
        let other = repo.insert(&new_product("900", "Johor", 300)).await.unwrap();

        let patch = ProductPatch {
            location: Some("NEW".to_string()),
            price: None,
        };
        let changed = repo.update_by_code("800", &patch).await.unwrap();
        assert_eq!(changed, 2);

        let family = repo.find(&ProductFilter::by_code("800").predicates()).await.unwrap();
        assert!(family.iter().all(|p| p.location == "NEW"));
        assert_eq!(family[0].price, Money::from_cents(100));
        assert_eq!(family[1].price, Money::from_cents(200));

        let untouched = repo.find_by_id(other.id).await.unwrap().unwrap();
        assert_eq!(untouched.location, "Johor");
    }

    #[tokio::test]
    async fn test_delete_and_delete_many() {
        let repo = repo().await;
        let a = repo.insert(&new_product("800", "KL", 100)).await.unwrap();
        let b = repo.insert(&new_product("800", "Penang", 200)).await.unwrap();
        let c = repo.insert(&new_product("900", "Johor", 300)).await.unwrap();

        repo.delete(c.id).await.unwrap();
        assert!(matches!(
            repo.delete(c.id).await.unwrap_err(),
            DbError::NotFound { .. }
        ));

        assert_eq!(repo.delete_many(&[]).await.unwrap(), 0);
        assert_eq!(repo.delete_many(&[a.id, b.id]).await.unwrap(), 2);
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_many_beyond_variable_limit() {
        let repo = repo().await;
        sqlx::query(
            "INSERT INTO products (code, location, price) \
             WITH RECURSIVE n(i) AS (SELECT 1 UNION ALL SELECT i + 1 FROM n WHERE i < 40000) \
             SELECT '800', 'KL', '1.00' FROM n",
        )
        .execute(&repo.pool)
        .await
        .unwrap();

        let ids: Vec<i64> = (1..=40_000).collect();
        assert_eq!(repo.delete_many(&ids).await.unwrap(), 40_000);
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_read_only_database_is_internal() {
        let repo = repo().await;
        sqlx::query("PRAGMA query_only = 1")
            .execute(&repo.pool)
            .await
            .unwrap();

        let err = repo.insert(&new_product("1000", "KL", 100)).await.unwrap_err();
        assert!(matches!(err, DbError::Internal(_)), "got {:?}", err);
        assert!(!err.is_client_error());
    }

    #[tokio::test]
    async fn test_missing_table_is_internal() {
        let repo = repo().await;
        sqlx::query("DROP TABLE products")
            .execute(&repo.pool)
            .await
            .unwrap();

        let err = repo.find(&[]).await.unwrap_err();
        assert!(matches!(err, DbError::Internal(_)), "got {:?}", err);
        assert!(!err.is_client_error());
    }

    #[tokio::test]
    async fn test_datatype_mismatch_is_client_error() {
        let repo = repo().await;
        let err: DbError = sqlx::query(
            "INSERT INTO products (id, code, location, price) VALUES ('abc', '1000', 'KL', '1.00')",
        )
        .execute(&repo.pool)
        .await
        .unwrap_err()
        .into();

        assert!(matches!(err, DbError::QueryFailed(_)), "got {:?}", err);
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn test_stored_extra_decimals_read_back_rounded() {
        let repo = repo().await;
        sqlx::query("INSERT INTO products (code, location, price) VALUES ('1000', 'KL', '100.999')")
            .execute(&repo.pool)
            .await
            .unwrap();

        let all = repo.find(&[]).await.unwrap();
        assert_eq!(all[0].price, Money::from_cents(10100));
    }

    #[tokio::test]
    async fn test_unreadable_price_is_decode_error() {
        let repo = repo().await;
        sqlx::query("INSERT INTO products (code, location, price) VALUES ('1000', 'KL', 'free')")
            .execute(&repo.pool)
            .await
            .unwrap();

        let err = repo.find(&[]).await.unwrap_err();
        assert!(matches!(err, DbError::Decode(_)));
        assert!(!err.is_client_error());
    }

    #[tokio::test]
    async fn test_blank_code_is_client_error() {
        let repo = repo().await;
        let err = repo.insert(&new_product("  ", "KL", 100)).await.unwrap_err();
        assert!(err.is_client_error(), "got {:?}", err);
    }
}
