//! Generation request models and input normalization.
//!
//! The browser form posts a loosely typed JSON body. It is accepted as a
//! [`RawGenerationRequest`] whose fields may be missing or of the wrong
//! type, and immediately normalized into a [`GenerationRequest`]. Invalid
//! input is never rejected; every field falls back to a default.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::aspect_ratio::AspectRatio;

/// Prompt used when the request carries no usable prompt.
pub const DEFAULT_PROMPT: &str = "Anime style young man fixing a red motorcycle in a sunny street, detailed background, consistent character design, cinematic lighting";
/// Duration used when the request carries no usable duration.
pub const DEFAULT_DURATION_SECONDS: u32 = 6;
/// Shortest clip the model is asked for.
pub const MIN_DURATION_SECONDS: u32 = 4;
/// Longest clip the model is asked for.
pub const MAX_DURATION_SECONDS: u32 = 12;

/// Untrusted request body, exactly as posted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RawGenerationRequest {
    #[serde(default)]
    pub prompt: Option<Value>,
    #[serde(default, rename = "aspectRatio")]
    pub aspect_ratio: Option<Value>,
    #[serde(default)]
    pub duration: Option<Value>,
}

impl RawGenerationRequest {
    /// Parse a request body, treating anything that is not a JSON object as empty.
    pub fn from_body(body: &[u8]) -> Self {
        // Derived Deserialize also accepts positional arrays, so only objects get through.
        match serde_json::from_slice::<Value>(body) {
            Ok(value @ Value::Object(_)) => serde_json::from_value(value).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    /// Normalize into a fully populated request.
    pub fn normalize(&self) -> GenerationRequest {
        GenerationRequest {
            prompt: normalize_prompt(self),
            aspect_ratio: normalize_aspect_ratio(self),
            duration_seconds: normalize_duration(self),
        }
    }
}

/// Trimmed prompt, or [`DEFAULT_PROMPT`] when missing, non-text or blank.
pub fn normalize_prompt(payload: &RawGenerationRequest) -> String {
    match &payload.prompt {
        Some(Value::String(prompt)) if !prompt.trim().is_empty() => prompt.trim().to_string(),
        _ => DEFAULT_PROMPT.to_string(),
    }
}

/// Requested aspect ratio if it is one of the supported values, else 16:9.
pub fn normalize_aspect_ratio(payload: &RawGenerationRequest) -> AspectRatio {
    match &payload.aspect_ratio {
        Some(Value::String(ratio)) => ratio.parse().unwrap_or_default(),
        _ => AspectRatio::default(),
    }
}

/// Requested duration rounded half away from zero and clamped to
/// `[MIN_DURATION_SECONDS, MAX_DURATION_SECONDS]`. Non-numbers give the default.
pub fn normalize_duration(payload: &RawGenerationRequest) -> u32 {
    let seconds = match &payload.duration {
        Some(Value::Number(n)) => n.as_f64(),
        _ => None,
    };

    match seconds {
        Some(s) if s.is_finite() => s
            .round()
            .clamp(MIN_DURATION_SECONDS as f64, MAX_DURATION_SECONDS as f64)
            as u32,
        _ => DEFAULT_DURATION_SECONDS,
    }
}

/// A fully validated generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GenerationRequest {
    pub prompt: String,
    pub aspect_ratio: AspectRatio,
    pub duration_seconds: u32,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            aspect_ratio: AspectRatio::default(),
            duration_seconds: DEFAULT_DURATION_SECONDS,
        }
    }
}

impl GenerationRequest {
    /// Map onto the parameter names the video model expects.
    pub fn to_model_input(&self) -> ModelInput {
        ModelInput {
            prompt: self.prompt.clone(),
            aspect_ratio: self.aspect_ratio,
            duration: self.duration_seconds,
        }
    }
}

/// Input record sent to the video model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ModelInput {
    pub prompt: String,
    pub aspect_ratio: AspectRatio,
    pub duration: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> RawGenerationRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_prompt_defaults_when_unusable() {
        for body in [
            json!({}),
            json!({ "prompt": null }),
            json!({ "prompt": 42 }),
            json!({ "prompt": ["a"] }),
            json!({ "prompt": "" }),
            json!({ "prompt": "   \n\t " }),
        ] {
            assert_eq!(normalize_prompt(&payload(body)), DEFAULT_PROMPT);
        }
    }

    #[test]
    fn test_prompt_is_trimmed() {
        let p = payload(json!({ "prompt": "  a fox in the snow \n" }));
        assert_eq!(normalize_prompt(&p), "a fox in the snow");
    }

    #[test]
    fn test_prompt_trim_is_idempotent() {
        let once = normalize_prompt(&payload(json!({ "prompt": "\t drifting cars " })));
        let twice = normalize_prompt(&payload(json!({ "prompt": once.clone() })));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_aspect_ratio_accepts_supported_values() {
        for ratio in ["16:9", "9:16", "1:1", "4:3"] {
            let p = payload(json!({ "aspectRatio": ratio }));
            assert_eq!(normalize_aspect_ratio(&p).as_str(), ratio);
        }
    }

    #[test]
    fn test_aspect_ratio_defaults_otherwise() {
        for body in [
            json!({}),
            json!({ "aspectRatio": "21:9" }),
            json!({ "aspectRatio": "16:9 " }),
            json!({ "aspectRatio": 1.77 }),
            json!({ "aspect_ratio": "9:16" }),
        ] {
            assert_eq!(normalize_aspect_ratio(&payload(body)), AspectRatio::Landscape);
        }
    }

    #[test]
    fn test_duration_rounds_then_clamps() {
        let cases = [
            (json!(6), 6),
            (json!(7.4), 7),
            (json!(7.5), 8),
            (json!(4.5), 5),
            (json!(3.6), 4),
            (json!(4), 4),
            (json!(0), 4),
            (json!(-30), 4),
            (json!(12), 12),
            (json!(12.4), 12),
            (json!(99), 12),
            (json!(1e300), 12),
        ];
        for (value, expected) in cases {
            let p = payload(json!({ "duration": value }));
            assert_eq!(normalize_duration(&p), expected, "duration {value}");
        }
    }

    #[test]
    fn test_duration_defaults_for_non_numbers() {
        for body in [
            json!({}),
            json!({ "duration": null }),
            json!({ "duration": "8" }),
            json!({ "duration": true }),
            json!({ "duration": [8] }),
        ] {
            assert_eq!(normalize_duration(&payload(body)), DEFAULT_DURATION_SECONDS);
        }
    }

    #[test]
    fn test_duration_always_in_range() {
        let mut x = -50.0;
        while x <= 50.0 {
            let d = normalize_duration(&payload(json!({ "duration": x })));
            assert!((MIN_DURATION_SECONDS..=MAX_DURATION_SECONDS).contains(&d));
            x += 0.25;
        }
    }

    #[test]
    fn test_from_body_tolerates_garbage() {
        assert_eq!(RawGenerationRequest::from_body(b""), RawGenerationRequest::default());
        assert_eq!(RawGenerationRequest::from_body(b"{not json"), RawGenerationRequest::default());
        assert_eq!(RawGenerationRequest::from_body(b"[1,2]"), RawGenerationRequest::default());
        assert_eq!(RawGenerationRequest::from_body(b"null"), RawGenerationRequest::default());
        assert_eq!(RawGenerationRequest::from_body(b"\"hi\""), RawGenerationRequest::default());
    }

    #[test]
    fn test_normalize_empty_body_uses_defaults() {
        let request = RawGenerationRequest::from_body(b"{}").normalize();
        assert_eq!(request, GenerationRequest::default());
        assert_eq!(request.aspect_ratio.as_str(), "16:9");
        assert_eq!(request.duration_seconds, 6);
    }

    #[test]
    fn test_normalize_full_body() {
        let raw = RawGenerationRequest::from_body(
            br#"{"prompt":" neon city ","aspectRatio":"9:16","duration":10,"extra":true}"#,
        );
        let request = raw.normalize();
        assert_eq!(request.prompt, "neon city");
        assert_eq!(request.aspect_ratio, AspectRatio::Portrait);
        assert_eq!(request.duration_seconds, 10);
    }

    #[test]
    fn test_model_input_uses_provider_field_names() {
        let input = GenerationRequest::default().to_model_input();
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(
            json,
            json!({ "prompt": DEFAULT_PROMPT, "aspect_ratio": "16:9", "duration": 6 })
        );
    }
}
