//! API configuration.

use std::fmt;
use std::time::Duration;

use vstudio_replicate::{DEFAULT_API_BASE_URL, DEFAULT_MODEL_ID};

/// Environment variable holding the Replicate API token.
pub const REPLICATE_API_TOKEN_VAR: &str = "REPLICATE_API_TOKEN";

/// API server configuration.
#[derive(Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// CORS origins
    pub cors_origins: Vec<String>,
    /// Generation requests per second, per client IP
    pub rate_limit_rps: u32,
    /// Max request body size
    pub max_body_size: usize,
    /// Replicate API token; requests fail with 500 when unset
    pub replicate_api_token: Option<String>,
    /// Model identifier (`owner/name` or `owner/name:version`)
    pub model_id: String,
    /// Replicate API base URL
    pub replicate_base_url: String,
    /// Delay between prediction status checks
    pub poll_interval: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origins: vec!["*".to_string()],
            rate_limit_rps: 2,
            max_body_size: 64 * 1024,
            replicate_api_token: None,
            model_id: DEFAULT_MODEL_ID.to_string(),
            replicate_base_url: DEFAULT_API_BASE_URL.to_string(),
            poll_interval: Duration::from_secs(1),
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: std::env::var("API_HOST").unwrap_or(defaults.host),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or(defaults.cors_origins),
            rate_limit_rps: std::env::var("RATE_LIMIT_RPS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.rate_limit_rps),
            max_body_size: std::env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_body_size),
            replicate_api_token: std::env::var(REPLICATE_API_TOKEN_VAR)
                .ok()
                .filter(|token| !token.trim().is_empty()),
            model_id: std::env::var("REPLICATE_MODEL_ID")
                .ok()
                .filter(|id| !id.trim().is_empty())
                .unwrap_or(defaults.model_id),
            replicate_base_url: std::env::var("REPLICATE_API_BASE_URL")
                .unwrap_or(defaults.replicate_base_url),
            poll_interval: std::env::var("REPLICATE_POLL_INTERVAL_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.poll_interval),
        }
    }

    /// Whether the provider credential is present.
    pub fn has_credentials(&self) -> bool {
        self.replicate_api_token.is_some()
    }
}

// Hand-written so the token never ends up in logs.
impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("cors_origins", &self.cors_origins)
            .field("rate_limit_rps", &self.rate_limit_rps)
            .field("max_body_size", &self.max_body_size)
            .field(
                "replicate_api_token",
                &self.replicate_api_token.as_ref().map(|_| "<redacted>"),
            )
            .field("model_id", &self.model_id)
            .field("replicate_base_url", &self.replicate_base_url)
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}
