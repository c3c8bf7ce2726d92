//! The "run model" seam used by the API server.

use async_trait::async_trait;
use serde_json::Value;
use vstudio_models::ModelInput;

use crate::error::ReplicateResult;
use crate::model_id::ModelId;

/// Runs a hosted video model and returns its raw output.
///
/// The output shape is whatever the model produces; callers are expected to
/// dig the video URL out with `vstudio_models::extract_video_url`.
#[async_trait]
pub trait VideoGenerator: Send + Sync {
    async fn run(&self, model: &ModelId, input: &ModelInput) -> ReplicateResult<Value>;
}
