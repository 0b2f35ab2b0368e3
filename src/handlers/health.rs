use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};
use std::time::SystemTime;
use tracing::{debug, info};

use crate::error::AppResult;
use crate::middleware::rate_limit::rate_limit_metrics;
use crate::services::ExtractionEngine;
use crate::state::AppState;

/// Health check endpoint
pub async fn health_handler(State(state): State<AppState>) -> AppResult<Json<Value>> {
    debug!("Health check requested");

    let timestamp = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let (total_requests, rejected_requests, available_permits) =
        rate_limit_metrics(&state.limiter);

    let response = json!({
        "status": "healthy",
        "timestamp": timestamp,
        "version": env!("CARGO_PKG_VERSION"),
        "services": {
            "extraction_engine": true,
            "strategies": ExtractionEngine::strategy_names()
        },
        "rate_limiting": {
            "total_requests": total_requests,
            "rejected_requests": rejected_requests,
            "available_permits": available_permits,
            "rejection_rate": if total_requests > 0 {
                (rejected_requests as f64 / total_requests as f64 * 100.0).round() / 100.0
            } else {
                0.0
            }
        }
    });

    info!(
        total_requests,
        rejected_requests,
        available_permits,
        "Health check completed"
    );

    Ok(Json(response))
}

/// Readiness probe. Extraction has no external dependencies, so the service
/// is ready as soon as it is serving.
pub async fn ready_handler() -> StatusCode {
    debug!("Readiness check");
    StatusCode::OK
}
