//! Shared data models for the video studio backend.
//!
//! This crate provides Serde-serializable types for:
//! - Aspect ratios accepted by the video model
//! - Raw and normalized generation requests
//! - Generation results returned to the browser
//! - Video URL extraction from provider output

pub mod aspect_ratio;
pub mod extract;
pub mod request;
pub mod result;

// Re-export common types
pub use aspect_ratio::{AspectRatio, AspectRatioParseError};
pub use extract::{extract_video_url, MAX_EXTRACTION_DEPTH};
pub use request::{
    normalize_aspect_ratio, normalize_duration, normalize_prompt, GenerationRequest, ModelInput,
    RawGenerationRequest, DEFAULT_DURATION_SECONDS, DEFAULT_PROMPT, MAX_DURATION_SECONDS,
    MIN_DURATION_SECONDS,
};
pub use result::GenerationResult;
