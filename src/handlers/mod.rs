pub mod auth_info;
pub mod extract;
pub mod health;

pub use auth_info::*;
pub use extract::*;
pub use health::*;

use axum::{
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::middleware::{
    auth::auth_middleware, logging::logging_middleware, rate_limit::rate_limit_middleware,
};
use crate::state::AppState;

/// Assemble the full application router. Shared between `main` and the
/// integration tests so both exercise the same middleware stack.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.max_file_size_bytes();
    let request_timeout = Duration::from_secs(state.config.request_timeout_seconds);

    Router::new()
        // Probe endpoints (no auth required)
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/auth-info", get(auth_info_handler))
        // Extraction endpoint (auth required)
        .route("/extract-text", post(extract_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(TimeoutLayer::new(request_timeout))
                .layer(DefaultBodyLimit::max(body_limit))
                .layer(from_fn(logging_middleware))
                // Auth runs before the concurrency cap so rejected
                // credentials never consume a permit.
                .layer(from_fn_with_state(state.clone(), auth_middleware))
                .layer(from_fn_with_state(state.clone(), rate_limit_middleware)),
        )
        .with_state(state)
}
