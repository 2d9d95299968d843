//! GET /health

use axum::extract::State;
use axum::http::{Method, StatusCode};

use crate::envelope::Envelope;
use crate::error::ApiResult;
use crate::services::HealthReport;
use crate::AppState;

pub async fn health(State(state): State<AppState>) -> ApiResult<Envelope<HealthReport>> {
    let report = state.health.check().await?;
    Ok(Envelope::new(&Method::GET, StatusCode::OK, report))
}
