use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::config::DEFAULT_API_KEY;
use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the shared-secret credential.
pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthDecision {
    Allowed,
    Denied,
}

/// Stateless credential check against the single configured key.
#[derive(Debug)]
pub struct ApiKeyGate {
    expected: String,
}

impl ApiKeyGate {
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
        }
    }

    /// True when the gate is holding the well-known placeholder key.
    pub fn dev_mode(&self) -> bool {
        self.expected == DEFAULT_API_KEY
    }

    /// A missing, empty, or mismatching credential is `Denied`.
    pub fn authorize(&self, presented: Option<&str>) -> AuthDecision {
        match presented {
            Some(key) if !key.is_empty()
                && fixed_time_eq(key.as_bytes(), self.expected.as_bytes()) =>
            {
                AuthDecision::Allowed
            }
            _ => AuthDecision::Denied,
        }
    }
}

/// Byte comparison that does not bail out at the first mismatch. Length
/// differences still short-circuit.
fn fixed_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_string();
    let method = request.method().clone();

    // Liveness and auth-discovery endpoints stay reachable without a key.
    if matches!(path.as_str(), "/health" | "/ready" | "/auth-info") {
        debug!("Skipping auth for {}", path);
        return Ok(next.run(request).await);
    }

    let decision = {
        let presented = request
            .headers()
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok());
        state.gate.authorize(presented)
    };

    match decision {
        AuthDecision::Allowed => {
            debug!("Valid API key for {} {}", method, path);
            Ok(next.run(request).await)
        }
        AuthDecision::Denied => {
            warn!("Rejected request without a valid API key: {} {}", method, path);
            Err(AppError::InvalidApiKey)
        }
    }
}
