use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::state::AppState;

// Process-wide counters reported by /health.
static TOTAL_REQUESTS: AtomicU64 = AtomicU64::new(0);
static REJECTED_REQUESTS: AtomicU64 = AtomicU64::new(0);

/// Caps concurrent extraction requests with the semaphore carried in
/// `AppState`. The permit is held for the whole request.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_string();

    // Probe endpoints must stay responsive under load.
    if matches!(path.as_str(), "/health" | "/ready" | "/auth-info") {
        return Ok(next.run(request).await);
    }

    let total_requests = TOTAL_REQUESTS.fetch_add(1, Ordering::Relaxed) + 1;

    let _permit = state.limiter.try_acquire().map_err(|_| {
        let rejected = REJECTED_REQUESTS.fetch_add(1, Ordering::Relaxed) + 1;
        warn!(
            path = %path,
            total_requests,
            rejected_requests = rejected,
            available_permits = state.limiter.available_permits(),
            "Rate limit exceeded - too many concurrent requests"
        );
        AppError::RateLimitExceeded
    })?;

    debug!(
        path = %path,
        total_requests,
        available_permits = state.limiter.available_permits(),
        "Request permit acquired"
    );

    Ok(next.run(request).await)
}

/// (total, rejected, available permits) for health reporting.
pub fn rate_limit_metrics(limiter: &Semaphore) -> (u64, u64, usize) {
    let total = TOTAL_REQUESTS.load(Ordering::Relaxed);
    let rejected = REJECTED_REQUESTS.load(Ordering::Relaxed);
    (total, rejected, limiter.available_permits())
}
