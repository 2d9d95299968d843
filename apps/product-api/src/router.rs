//! Route table.

use axum::extract::Request;
use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::cache::{cache_response, CachePolicy};
use crate::handlers::{health, product};
use crate::AppState;

/// Builds the application router.
///
/// The list route and the item route each get their own cache TTL; both share
/// one cache map.
pub fn build_router(state: AppState) -> Router {
    let list_cache = CachePolicy::new(state.cache.clone(), state.config.list_cache_ttl());
    let item_cache = CachePolicy::new(state.cache.clone(), state.config.item_cache_ttl());

    let products = get(product::list_products)
        .post(product::create_product)
        .put(product::update_products_by_code)
        .delete(product::delete_products_by_code)
        .layer(middleware::from_fn_with_state(list_cache, cache_response));

    let product_by_id = get(product::get_product)
        .put(product::update_product)
        .delete(product::delete_product)
        .layer(middleware::from_fn_with_state(item_cache, cache_response));

    Router::new()
        .route("/health", get(health::health))
        .route("/product", products)
        .route("/product/{id}", product_by_id)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "request",
                    request_id = %Uuid::new_v4(),
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
