//! API callback client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use intellex_core::{defaults, CallbackPayload, CallbackSender, Result};

/// Configuration for the API callback client.
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for relative callback paths.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Shared secret sent as a bearer token when configured.
    pub shared_secret: Option<String>,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::API_BASE_URL.to_string(),
            timeout_secs: defaults::API_TIMEOUT_SECS,
            shared_secret: None,
        }
    }
}

impl ApiClientConfig {
    /// Create config from environment variables (with defaults).
    ///
    /// | Variable | Default | Description |
    /// |----------|---------|-------------|
    /// | `API_BASE_URL` | `http://localhost:8000` | Base for relative callback paths |
    /// | `API_TIMEOUT_SECONDS` | `10` | Request timeout |
    /// | `API_SHARED_SECRET` | unset | Bearer token attached to callbacks |
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("API_BASE_URL").unwrap_or_else(|_| defaults::API_BASE_URL.to_string());
        let timeout_secs = std::env::var("API_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults::API_TIMEOUT_SECS);
        let shared_secret = std::env::var("API_SHARED_SECRET").ok().filter(|s| !s.is_empty());

        Self {
            base_url,
            timeout_secs,
            shared_secret,
        }
    }
}

/// HTTP client delivering job results to the API.
pub struct ApiClient {
    client: Client,
    config: ApiClientConfig,
}

impl ApiClient {
    /// Create a client from explicit configuration.
    pub fn new(config: ApiClientConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Self {
        Self::new(ApiClientConfig::from_env())
    }

    /// Resolve a callback target against the configured base URL.
    ///
    /// Absolute targets (`http://…`, `https://…`) pass through untouched;
    /// anything else is treated as a path under the base.
    fn resolve_url(&self, target: &str) -> String {
        if target.starts_with("http") {
            target.to_string()
        } else {
            format!(
                "{}/{}",
                self.config.base_url.trim_end_matches('/'),
                target.trim_start_matches('/')
            )
        }
    }
}

#[async_trait]
impl CallbackSender for ApiClient {
    async fn send(&self, target: &str, payload: &CallbackPayload) -> Result<()> {
        let url = self.resolve_url(target);
        debug!(job_id = %payload.job_id, url = %url, "Sending callback");

        let mut request = self.client.post(&url).json(payload);
        if let Some(secret) = &self.config.shared_secret {
            request = request.bearer_auth(secret);
        }

        request.send().await?.error_for_status()?;
        Ok(())
    }
}
