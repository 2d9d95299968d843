//! Product handlers.
//!
//! ```text
//! GET    /product?code=&location=  list, optionally filtered
//! POST   /product                  create (admin)
//! PUT    /product?code=            update every product of a code (admin)
//! DELETE /product?code=            delete every product of a code (admin)
//! GET    /product/{id}             one product
//! PUT    /product/{id}             update one product (admin)
//! DELETE /product/{id}             delete one product (admin)
//! ```
//!
//! `AdminGuard` is always the first extractor so an unauthorized caller is
//! rejected before its query or body is looked at.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{Method, StatusCode};
use axum::Json;

use motor_core::{
    CodeSelector, NewProduct, Product, ProductFilter, ProductPatch, UpdatedProduct,
    UpdatedProducts,
};

use crate::auth::AdminGuard;
use crate::envelope::Envelope;
use crate::error::ApiResult;
use crate::AppState;

pub async fn list_products(
    State(state): State<AppState>,
    query: Result<Query<ProductFilter>, QueryRejection>,
) -> ApiResult<Envelope<Vec<Product>>> {
    let Query(filter) = query?;
    let products = state.products.find_all(&filter).await?;
    Ok(Envelope::new(&Method::GET, StatusCode::OK, products))
}

pub async fn create_product(
    _admin: AdminGuard,
    State(state): State<AppState>,
    body: Result<Json<NewProduct>, JsonRejection>,
) -> ApiResult<Envelope<Product>> {
    let Json(input) = body?;
    let product = state.products.create(input).await?;
    Ok(Envelope::new(&Method::POST, StatusCode::CREATED, product))
}

pub async fn update_products_by_code(
    _admin: AdminGuard,
    State(state): State<AppState>,
    query: Result<Query<CodeSelector>, QueryRejection>,
    body: Result<Json<ProductPatch>, JsonRejection>,
) -> ApiResult<Envelope<UpdatedProducts>> {
    let Query(selector) = query?;
    let Json(patch) = body?;
    let updated = state
        .products
        .update_by_code(&selector.code, &patch)
        .await?;
    Ok(Envelope::new(&Method::PUT, StatusCode::OK, updated))
}

pub async fn delete_products_by_code(
    _admin: AdminGuard,
    State(state): State<AppState>,
    query: Result<Query<CodeSelector>, QueryRejection>,
) -> ApiResult<Envelope<Vec<Product>>> {
    let Query(selector) = query?;
    let removed = state.products.remove_by_code(&selector.code).await?;
    Ok(Envelope::new(&Method::DELETE, StatusCode::OK, removed))
}

pub async fn get_product(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Envelope<Product>> {
    let Path(id) = id?;
    let product = state.products.find_one(id).await?;
    Ok(Envelope::new(&Method::GET, StatusCode::OK, product))
}

pub async fn update_product(
    _admin: AdminGuard,
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<ProductPatch>, JsonRejection>,
) -> ApiResult<Envelope<UpdatedProduct>> {
    let Path(id) = id?;
    let Json(patch) = body?;
    let updated = state.products.update(id, &patch).await?;
    Ok(Envelope::new(&Method::PUT, StatusCode::OK, updated))
}

pub async fn delete_product(
    _admin: AdminGuard,
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Envelope<Product>> {
    let Path(id) = id?;
    let removed = state.products.remove(id).await?;
    Ok(Envelope::new(&Method::DELETE, StatusCode::OK, removed))
}
