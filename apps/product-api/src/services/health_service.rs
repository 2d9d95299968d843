//! Health check service.
//!
//! Reports whether the database answers queries and carries the current
//! schema, for load balancers and uptime monitors.

use chrono::Utc;
use serde::Serialize;
use tracing::warn;

use motor_db::Database;

use crate::error::{ApiError, ApiResult};

/// Body of a healthy check.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    /// `ok`, or `degraded` while migrations are pending.
    pub status: &'static str,
    pub database: &'static str,
    pub migrations_applied: usize,
    pub migrations_total: usize,
    /// RFC 3339 timestamp of the check.
    pub server_time: String,
}

/// Health service implementation.
#[derive(Debug, Clone)]
pub struct HealthService {
    db: Database,
}

impl HealthService {
    /// Create a new health service.
    pub fn new(db: Database) -> Self {
        HealthService { db }
    }

    /// Checks database liveness and migration state.
    ///
    /// An unreachable database is `ApiError::Unavailable` (503).
    pub async fn check(&self) -> ApiResult<HealthReport> {
        if !self.db.health_check().await {
            warn!("Health check failed: database unavailable");
            return Err(ApiError::Unavailable("Database unavailable".to_string()));
        }

        let migrations = self.db.migration_status().await.map_err(|e| {
            warn!(error = %e, "Health check failed: migration status unreadable");
            ApiError::Unavailable("Database unavailable".to_string())
        })?;

        if !migrations.is_current() {
            warn!(
                applied = migrations.applied,
                total = migrations.total,
                "Migrations pending"
            );
        }

        Ok(HealthReport {
            status: if migrations.is_current() { "ok" } else { "degraded" },
            database: "up",
            migrations_applied: migrations.applied,
            migrations_total: migrations.total,
            server_time: Utc::now().to_rfc3339(),
        })
    }
}
