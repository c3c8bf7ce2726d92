//! Replicate HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_retry2::strategy::{jitter, ExponentialBackoff};
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, info, warn};
use url::Url;
use vstudio_models::ModelInput;

use crate::error::{ReplicateError, ReplicateResult};
use crate::generator::VideoGenerator;
use crate::model_id::ModelId;

/// Public Replicate API endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://api.replicate.com/v1";

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
const DEFAULT_MAX_RETRIES: usize = 5;
const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(500);
const MAX_RETRY_DELAY: Duration = Duration::from_secs(10);

/// Configuration for the Replicate client.
#[derive(Debug, Clone)]
pub struct ReplicateConfig {
    /// API token (`REPLICATE_API_TOKEN`)
    pub api_token: String,
    /// API base URL, without a trailing slash
    pub base_url: String,
    /// Delay between prediction status checks
    pub poll_interval: Duration,
    /// Retries per request after a throttled or transient response
    pub max_retries: usize,
    /// Delay before the first retry; later retries back off exponentially
    pub retry_backoff: Duration,
}

impl ReplicateConfig {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            base_url: DEFAULT_API_BASE_URL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_retries(mut self, max_retries: usize, retry_backoff: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_backoff = retry_backoff;
        self
    }
}

/// Which failed responses a request may be retried on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RetryPolicy {
    /// Creating a prediction is not idempotent, so only a throttled attempt is repeated.
    Throttled,
    /// Reads are also repeated on server errors.
    ThrottledOrServerError,
}

impl RetryPolicy {
    fn is_retryable(self, status: u16) -> bool {
        match self {
            RetryPolicy::Throttled => status == 429,
            RetryPolicy::ThrottledOrServerError => status == 429 || (500..600).contains(&status),
        }
    }

    fn classify(self, err: ReplicateError) -> RetryError<ReplicateError> {
        match err.status() {
            Some(status) if self.is_retryable(status) => {
                warn!(status, error = %err, "Retrying Replicate request");
                RetryError::transient(err)
            }
            _ => RetryError::permanent(err),
        }
    }
}

#[derive(Debug, Serialize)]
struct CreatePredictionRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<&'a str>,
    input: &'a ModelInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum PredictionStatus {
    Starting,
    Processing,
    Succeeded,
    Failed,
    Canceled,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    id: String,
    status: PredictionStatus,
    #[serde(default)]
    output: Value,
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    urls: Option<PredictionUrls>,
}

#[derive(Debug, Deserialize)]
struct PredictionUrls {
    get: Option<String>,
}

/// Replicate API client.
///
/// Cheap to share behind an `Arc`; the underlying `reqwest::Client` pools
/// connections across requests.
#[derive(Clone)]
pub struct ReplicateClient {
    client: Client,
    api_token: String,
    base_url: String,
    poll_interval: Duration,
    max_retries: usize,
    retry_backoff: Duration,
}

impl ReplicateClient {
    /// Create a new client from configuration.
    pub fn new(config: ReplicateConfig) -> ReplicateResult<Self> {
        if config.api_token.trim().is_empty() {
            return Err(ReplicateError::config("API token is empty"));
        }

        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| ReplicateError::config(format!("Invalid base URL {}: {}", base_url, e)))?;

        let client = Client::builder()
            .user_agent(concat!("vstudio/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ReplicateError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_token: config.api_token,
            base_url,
            poll_interval: config.poll_interval,
            max_retries: config.max_retries,
            retry_backoff: config.retry_backoff,
        })
    }

    /// Jittered exponential backoff, starting near `retry_backoff`.
    fn retry_strategy(&self) -> impl Iterator<Item = Duration> {
        // `from_millis(2)` doubles every step; the factor scales the first delay.
        let first_delay_ms = self.retry_backoff.as_millis().max(2) as u64;
        ExponentialBackoff::from_millis(2)
            .factor(first_delay_ms / 2)
            .max_delay(MAX_RETRY_DELAY)
            .map(jitter)
            .take(self.max_retries)
    }

    /// Send a request built by `build`, repeating it while `policy` allows.
    async fn send<F>(&self, build: F, policy: RetryPolicy) -> ReplicateResult<Prediction>
    where
        F: Fn() -> RequestBuilder,
    {
        let build = &build;
        let action = move || async move {
            let response = build()
                .send()
                .await
                .map_err(|e| RetryError::permanent(ReplicateError::from(e)))?;
            parse_prediction(response)
                .await
                .map_err(|e| policy.classify(e))
        };

        Retry::spawn(self.retry_strategy(), action).await
    }

    /// Start a prediction, waiting synchronously for as long as the API allows.
    async fn create_prediction(&self, model: &ModelId, input: &ModelInput) -> ReplicateResult<Prediction> {
        let (url, body) = match &model.version {
            Some(version) => (
                format!("{}/predictions", self.base_url),
                CreatePredictionRequest {
                    version: Some(version.as_str()),
                    input,
                },
            ),
            None => (
                format!("{}/models/{}/{}/predictions", self.base_url, model.owner, model.name),
                CreatePredictionRequest { version: None, input },
            ),
        };

        debug!(model = %model, "Creating Replicate prediction");

        self.send(
            || {
                self.client
                    .post(&url)
                    .bearer_auth(&self.api_token)
                    .header("Prefer", "wait")
                    .json(&body)
            },
            RetryPolicy::Throttled,
        )
        .await
    }

    async fn get_prediction(&self, prediction: &Prediction) -> ReplicateResult<Prediction> {
        let url = prediction
            .urls
            .as_ref()
            .and_then(|urls| urls.get.clone())
            .unwrap_or_else(|| format!("{}/predictions/{}", self.base_url, prediction.id));

        self.send(
            || self.client.get(&url).bearer_auth(&self.api_token),
            RetryPolicy::ThrottledOrServerError,
        )
        .await
    }
}

#[async_trait]
impl VideoGenerator for ReplicateClient {
    /// Run a model to completion and return its output.
    ///
    /// Follows the prediction until it reaches a terminal state, like the
    /// provider's own `run`. There is no deadline; dropping the future stops
    /// polling.
    async fn run(&self, model: &ModelId, input: &ModelInput) -> ReplicateResult<Value> {
        let mut prediction = self.create_prediction(model, input).await?;
        let mut polls = 0u32;

        loop {
            match prediction.status {
                PredictionStatus::Succeeded => {
                    info!(
                        prediction_id = %prediction.id,
                        polls,
                        "Replicate prediction succeeded"
                    );
                    return Ok(prediction.output);
                }
                PredictionStatus::Failed => {
                    let message = prediction.error.as_ref().map(error_text).unwrap_or_default();
                    return Err(ReplicateError::PredictionFailed(message));
                }
                PredictionStatus::Canceled => return Err(ReplicateError::Canceled),
                PredictionStatus::Starting | PredictionStatus::Processing => {
                    debug!(prediction_id = %prediction.id, status = ?prediction.status, "Waiting for prediction");
                }
                PredictionStatus::Unknown => {
                    warn!(prediction_id = %prediction.id, "Unknown prediction status");
                }
            }

            tokio::time::sleep(self.poll_interval).await;
            polls += 1;
            prediction = self.get_prediction(&prediction).await?;
        }
    }
}

async fn parse_prediction(response: Response) -> ReplicateResult<Prediction> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ReplicateError::Api {
            status: status.as_u16(),
            message: api_error_message(&body),
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body)
        .map_err(|e| ReplicateError::invalid_response(format!("Failed to parse prediction: {}", e)))
}

/// Replicate errors are problem+json documents with a `detail` field.
///
/// Empty when the response carried no text at all.
fn api_error_message(body: &str) -> String {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(Value::as_str).map(str::to_string));

    match detail {
        Some(detail) if !detail.is_empty() => detail,
        _ => body.trim().to_string(),
    }
}

fn error_text(error: &Value) -> String {
    match error {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
