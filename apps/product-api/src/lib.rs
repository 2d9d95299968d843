//! # Motor Product API
//!
//! HTTP server for the motor-insurance product catalog.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Product API                                      │
//! │                                                                         │
//! │  request ─► TraceLayer ─► CORS ─► route                                 │
//! │                                     │                                   │
//! │              GET ◄── response cache ┤                                   │
//! │                                     ▼                                   │
//! │                         AdminGuard (writes only)                        │
//! │                                     │                                   │
//! │                                     ▼                                   │
//! │                              ProductService ─► ProductStore ─► SQLite   │
//! │                                     │                                   │
//! │                                     ▼                                   │
//! │                    Envelope {status, message, data?}                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables (a `.env` file is read first when present):
//! - `PORT` - HTTP port (default: 3000)
//! - `DATABASE_PATH` - SQLite file, or `:memory:` (default: ./data/motor.db)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `CACHE_TTL_SECS` - Single-product cache TTL (default: 5)
//! - `LIST_CACHE_TTL_SECS` - Listing cache TTL (default: 2)

pub mod auth;
pub mod cache;
pub mod config;
pub mod envelope;
pub mod error;
pub mod handlers;
pub mod router;
pub mod services;

use std::sync::Arc;

use motor_db::Database;

pub use cache::ResponseCache;
pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult};
pub use router::build_router;
pub use services::{HealthService, ProductService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<ProductService>,
    pub health: Arc<HealthService>,
    pub config: Arc<ApiConfig>,
    pub cache: ResponseCache,
}

impl AppState {
    /// Wires the services over an open database.
    pub fn new(db: Database, config: ApiConfig) -> Self {
        let store = Arc::new(db.products());
        AppState {
            products: Arc::new(ProductService::new(store)),
            health: Arc::new(HealthService::new(db)),
            config: Arc::new(config),
            cache: ResponseCache::new(),
        }
    }
}
