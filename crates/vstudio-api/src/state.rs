//! Application state.

use std::sync::Arc;

use tracing::warn;
use vstudio_replicate::{ModelId, ReplicateClient, ReplicateConfig, VideoGenerator};

use crate::config::{ApiConfig, REPLICATE_API_TOKEN_VAR};
use crate::error::{ApiError, ApiResult};

/// Shared application state.
///
/// The generator is built once at startup and shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub model: ModelId,
    generator: Option<Arc<dyn VideoGenerator>>,
}

impl AppState {
    /// Create new application state.
    ///
    /// A missing token is not fatal here; each generation request reports it instead.
    pub fn new(config: ApiConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let model: ModelId = config.model_id.parse()?;

        let generator: Option<Arc<dyn VideoGenerator>> = match &config.replicate_api_token {
            Some(token) => {
                let replicate_config = ReplicateConfig::new(token.clone())
                    .with_base_url(config.replicate_base_url.clone())
                    .with_poll_interval(config.poll_interval);
                Some(Arc::new(ReplicateClient::new(replicate_config)?))
            }
            None => {
                warn!(
                    "{} is not set; generation requests will fail until it is configured",
                    REPLICATE_API_TOKEN_VAR
                );
                None
            }
        };

        Ok(Self {
            config,
            model,
            generator,
        })
    }

    /// Create state around an existing generator.
    pub fn with_generator(
        config: ApiConfig,
        model: ModelId,
        generator: Option<Arc<dyn VideoGenerator>>,
    ) -> Self {
        Self {
            config,
            model,
            generator,
        }
    }

    /// The configured generator, or a configuration error naming the missing token.
    pub fn generator(&self) -> ApiResult<&Arc<dyn VideoGenerator>> {
        self.generator
            .as_ref()
            .ok_or(ApiError::MissingConfiguration(REPLICATE_API_TOKEN_VAR))
    }

    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }
}
