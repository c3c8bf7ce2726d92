//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use vstudio_replicate::ReplicateError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Message used when the provider reported a failure without any text.
pub const GENERIC_FAILURE_MESSAGE: &str = "Video generation failed unexpectedly.";

#[derive(Debug, Error)]
pub enum ApiError {
    /// A required setting is missing; needs operator action.
    #[error("Missing {0}. Add it to your environment configuration.")]
    MissingConfiguration(&'static str),

    /// The model call itself failed.
    #[error(transparent)]
    Provider(#[from] ReplicateError),

    /// The model call succeeded but its output had no usable video URL.
    #[error("Unable to read a video URL from the model output.")]
    UpstreamData,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingConfiguration(_) | ApiError::Provider(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::UpstreamData => StatusCode::BAD_GATEWAY,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        }
    }

    /// Message sent back in the `error` field.
    fn client_message(&self) -> String {
        match self {
            ApiError::Provider(err)
                if err
                    .provider_message()
                    .is_some_and(|message| message.trim().is_empty()) =>
            {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let error = self.client_message();

        let mut response = (status, Json(ErrorResponse { error })).into_response();
        if status == StatusCode::TOO_MANY_REQUESTS {
            response
                .headers_mut()
                .insert("Retry-After", axum::http::HeaderValue::from_static("1"));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::MissingConfiguration("REPLICATE_API_TOKEN").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Provider(ReplicateError::Canceled).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ApiError::UpstreamData.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(ApiError::RateLimited.status_code(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_missing_configuration_names_the_variable() {
        let err = ApiError::MissingConfiguration("REPLICATE_API_TOKEN");
        assert_eq!(
            err.to_string(),
            "Missing REPLICATE_API_TOKEN. Add it to your environment configuration."
        );
    }

    #[test]
    fn test_provider_message_passes_through() {
        let err = ApiError::from(ReplicateError::PredictionFailed("out of memory".into()));
        assert_eq!(err.to_string(), "Prediction failed: out of memory");
        assert_eq!(err.client_message(), "Prediction failed: out of memory");
    }

    #[test]
    fn test_empty_provider_message_uses_generic_fallback() {
        let err = ApiError::from(ReplicateError::PredictionFailed(String::new()));
        assert_eq!(err.client_message(), GENERIC_FAILURE_MESSAGE);

        let err = ApiError::from(ReplicateError::Api {
            status: 500,
            message: " ".into(),
        });
        assert_eq!(err.client_message(), GENERIC_FAILURE_MESSAGE);

        let err = ApiError::from(ReplicateError::Canceled);
        assert_eq!(err.client_message(), "Prediction was canceled");
    }
}
