use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::config::Config;
use crate::middleware::auth::ApiKeyGate;

/// Shared service state, built once at startup and cloned per request.
/// Everything inside is immutable or internally synchronized.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub gate: Arc<ApiKeyGate>,
    pub limiter: Arc<Semaphore>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let gate = ApiKeyGate::new(config.api_key.clone());
        let limiter = Semaphore::new(config.max_concurrent_requests);

        Self {
            config: Arc::new(config),
            gate: Arc::new(gate),
            limiter: Arc::new(limiter),
        }
    }
}
