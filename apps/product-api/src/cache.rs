//! # Response Cache
//!
//! In-process TTL cache for successful `GET` responses.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET /product?code=1000                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  key = "/product?code=1000"                                             │
//! │       │                                                                 │
//! │       ├── fresh entry? ──► replay stored status, headers, body          │
//! │       │                                                                 │
//! │       └── miss ──► handler ──► 2xx? ──► store for `ttl` ──► respond     │
//! │                                                                         │
//! │  Writes never invalidate: a read may be stale for up to `ttl`.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::body::{to_bytes, Body, Bytes};
use axum::extract::{Request, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, error};

use crate::error::ApiError;

/// Largest response body that will be buffered for caching.
const MAX_CACHED_BODY: usize = 4 * 1024 * 1024;

/// A response as it was first served.
#[derive(Debug, Clone)]
pub struct CachedResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

impl IntoResponse for CachedResponse {
    fn into_response(self) -> Response {
        let mut response = (self.status, Body::from(self.body)).into_response();
        if let Some(content_type) = self.content_type {
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, content_type);
        }
        response
    }
}

#[derive(Debug)]
struct Entry {
    response: CachedResponse,
    expires_at: Instant,
}

/// Shared TTL map from request key to response.
#[derive(Debug, Clone, Default)]
pub struct ResponseCache {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached response for `key`, if it has not expired.
    pub async fn get(&self, key: &str) -> Option<CachedResponse> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.expires_at > now => return Some(entry.response.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        // Expired: drop it unless another request refreshed it meanwhile
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|entry| entry.expires_at <= now) {
            entries.remove(key);
        }
        None
    }

    /// Stores a response for `ttl`; a zero TTL stores nothing.
    pub async fn insert(&self, key: String, response: CachedResponse, ttl: Duration) {
        if ttl.is_zero() {
            return;
        }

        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            key,
            Entry {
                response,
                expires_at: now + ttl,
            },
        );
    }

    /// Number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Cache and TTL applied to one group of routes.
#[derive(Debug, Clone)]
pub struct CachePolicy {
    pub cache: ResponseCache,
    pub ttl: Duration,
}

impl CachePolicy {
    pub fn new(cache: ResponseCache, ttl: Duration) -> Self {
        CachePolicy { cache, ttl }
    }
}

/// Key for a request: path plus query string.
pub fn cache_key(request: &Request) -> String {
    request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string())
}

/// Middleware serving `GET` requests from the cache when possible.
///
/// Other verbs pass straight through.
pub async fn cache_response(
    State(policy): State<CachePolicy>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() != Method::GET {
        return next.run(request).await;
    }

    let key = cache_key(&request);
    if let Some(hit) = policy.cache.get(&key).await {
        debug!(key = %key, "Response cache hit");
        return hit.into_response();
    }

    let response = next.run(request).await;
    if !response.status().is_success() || policy.ttl.is_zero() {
        return response;
    }

    let (parts, body) = response.into_parts();
    let bytes = match to_bytes(body, MAX_CACHED_BODY).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(key = %key, error = %e, "Failed to buffer response for caching");
            return ApiError::Internal("Failed to read response".to_string()).into_response();
        }
    };

    let cached = CachedResponse {
        status: parts.status,
        content_type: parts.headers.get(header::CONTENT_TYPE).cloned(),
        body: bytes.clone(),
    };
    policy.cache.insert(key.clone(), cached, policy.ttl).await;
    debug!(key = %key, ttl_secs = policy.ttl.as_secs(), "Response cached");

    Response::from_parts(parts, Body::from(bytes))
}
