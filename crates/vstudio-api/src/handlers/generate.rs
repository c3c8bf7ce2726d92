//! Video generation handler.

use std::fmt::Display;
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use tracing::{error, info, warn};
use vstudio_models::{extract_video_url, GenerationResult, RawGenerationRequest};

use crate::error::{ApiError, ApiResult};
use crate::metrics::{self, GenerationOutcome};
use crate::state::AppState;

/// Longest slice of model output written to logs.
const OUTPUT_PREVIEW_CHARS: usize = 200;

/// Generate a video from a prompt.
///
/// The body is read raw so malformed JSON falls back to defaults instead of
/// being rejected by the `Json` extractor.
pub async fn generate_video(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<GenerationResult>> {
    let request = RawGenerationRequest::from_body(&body).normalize();

    info!(
        aspect_ratio = %request.aspect_ratio,
        duration = request.duration_seconds,
        prompt_chars = request.prompt.chars().count(),
        model = %state.model,
        "Generating video"
    );

    let generator = state.generator().inspect_err(|e| {
        error!("Video generation failed: {}", e);
        metrics::record_generation(GenerationOutcome::ConfigError);
    })?;

    let start = Instant::now();
    let output = generator.run(&state.model, &request.to_model_input()).await;
    metrics::record_provider_duration(start.elapsed().as_secs_f64());

    let output = output.map_err(|e| {
        error!("Video generation failed: {}", e);
        metrics::record_generation(GenerationOutcome::ProviderError);
        ApiError::from(e)
    })?;

    let Some(video_url) = extract_video_url(&output) else {
        warn!(output = %output_preview(&output), "No video URL in model output");
        metrics::record_generation(GenerationOutcome::UpstreamError);
        return Err(ApiError::UpstreamData);
    };

    info!(
        video_url = %video_url,
        elapsed_ms = %start.elapsed().as_millis(),
        "Video generated"
    );
    metrics::record_generation(GenerationOutcome::Success);

    Ok(Json(GenerationResult::new(video_url, request)))
}

/// Model output is untrusted and unbounded; only its head is logged.
fn output_preview(output: &impl Display) -> String {
    let rendered = output.to_string();
    match rendered.char_indices().nth(OUTPUT_PREVIEW_CHARS) {
        Some((end, _)) => format!("{}...", &rendered[..end]),
        None => rendered,
    }
}
