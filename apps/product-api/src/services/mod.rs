//! Service layer of the Product API.

pub mod health_service;
pub mod product_service;

pub use health_service::{HealthReport, HealthService};
pub use product_service::ProductService;
