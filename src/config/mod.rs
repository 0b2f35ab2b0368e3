use std::env;
use anyhow::{Result, Context};
use tracing::{info, warn};

/// Placeholder credential the service ships with. Running against it means
/// the deployment is in insecure development mode.
pub const DEFAULT_API_KEY: &str = "default-dev-key";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub api_key: String,
    pub max_file_size_mb: usize,
    pub max_concurrent_requests: usize,
    pub request_timeout_seconds: u64,
    pub cloud_project: Option<String>,
    pub cloud_region: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| {
                info!("SERVER_HOST not set, using default: 0.0.0.0");
                "0.0.0.0".to_string()
            }),
            server_port: Self::parse_env_var("SERVER_PORT", 8080)
                .context("Failed to parse SERVER_PORT")?,
            api_key: env::var("API_KEY").unwrap_or_else(|_| {
                info!("API_KEY not set, using the development default");
                DEFAULT_API_KEY.to_string()
            }),
            max_file_size_mb: Self::parse_env_var("MAX_FILE_SIZE_MB", 10)
                .context("Failed to parse MAX_FILE_SIZE_MB")?,
            max_concurrent_requests: Self::parse_env_var("MAX_CONCURRENT_REQUESTS", 100)
                .context("Failed to parse MAX_CONCURRENT_REQUESTS")?,
            request_timeout_seconds: Self::parse_env_var("REQUEST_TIMEOUT_SECONDS", 30)
                .context("Failed to parse REQUEST_TIMEOUT_SECONDS")?,
            // Deployment identifiers, logged at startup and otherwise unused.
            cloud_project: env::var("GCP_PROJECT").ok(),
            cloud_region: env::var("GCP_REGION").ok(),
        };

        config.validate()?;

        if config.is_default_api_key() {
            warn!(
                "API key is the built-in development default; \
                 set API_KEY before exposing this service"
            );
        }

        info!(
            server_host = %config.server_host,
            server_port = config.server_port,
            max_file_size_mb = config.max_file_size_mb,
            max_concurrent_requests = config.max_concurrent_requests,
            request_timeout_seconds = config.request_timeout_seconds,
            cloud_project = ?config.cloud_project,
            cloud_region = ?config.cloud_region,
            "Configuration loaded successfully"
        );
        Ok(config)
    }

    fn parse_env_var<T>(var_name: &str, default: T) -> Result<T>
    where
        T: std::str::FromStr + Copy + std::fmt::Debug,
        T::Err: std::fmt::Display,
    {
        match env::var(var_name) {
            Ok(val) => match val.parse() {
                Ok(parsed) => Ok(parsed),
                Err(e) => {
                    warn!("Failed to parse {}: {} (using default: {:?})", var_name, e, default);
                    Ok(default)
                }
            },
            Err(_) => {
                info!("{} not set, using default: {:?}", var_name, default);
                Ok(default)
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.server_port == 0 {
            return Err(anyhow::anyhow!("SERVER_PORT must be greater than 0"));
        }
        if self.api_key.trim().is_empty() {
            return Err(anyhow::anyhow!("API_KEY must not be empty"));
        }
        if self.max_file_size_mb == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than 0"));
        }
        if self.max_concurrent_requests == 0 {
            return Err(anyhow::anyhow!("MAX_CONCURRENT_REQUESTS must be greater than 0"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow::anyhow!("REQUEST_TIMEOUT_SECONDS must be greater than 0"));
        }
        Ok(())
    }

    /// True when the service is running with the well-known placeholder key.
    pub fn is_default_api_key(&self) -> bool {
        self.api_key == DEFAULT_API_KEY
    }

    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_mb * 1024 * 1024
    }
}
