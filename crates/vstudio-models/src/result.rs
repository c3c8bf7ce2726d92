//! Generation result returned to the browser.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::aspect_ratio::AspectRatio;
use crate::request::GenerationRequest;

/// A generated video plus the parameters that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub video_url: String,
    pub prompt: String,
    pub aspect_ratio: AspectRatio,
    /// Clip length in seconds
    pub duration: u32,
}

impl GenerationResult {
    pub fn new(video_url: impl Into<String>, request: GenerationRequest) -> Self {
        Self {
            video_url: video_url.into(),
            prompt: request.prompt,
            aspect_ratio: request.aspect_ratio,
            duration: request.duration_seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_with_browser_field_names() {
        let request = GenerationRequest {
            prompt: "rain on a tin roof".to_string(),
            aspect_ratio: AspectRatio::Square,
            duration_seconds: 8,
        };
        let result = GenerationResult::new("https://cdn/v.mp4", request);

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "videoUrl": "https://cdn/v.mp4",
                "prompt": "rain on a tin roof",
                "aspectRatio": "1:1",
                "duration": 8,
            })
        );
    }
}
