//! Replicate client error types.

use thiserror::Error;

/// Result type for Replicate operations.
pub type ReplicateResult<T> = Result<T, ReplicateError>;

/// Errors that can occur while running a model.
#[derive(Debug, Error)]
pub enum ReplicateError {
    #[error("Failed to configure Replicate client: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Replicate API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Prediction failed: {0}")]
    PredictionFailed(String),

    #[error("Prediction was canceled")]
    Canceled,

    #[error("Invalid response from Replicate: {0}")]
    InvalidResponse(String),
}

impl ReplicateError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// HTTP status of a rejected API call.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Text Replicate itself reported for the failure, which may be empty.
    pub fn provider_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => Some(message),
            Self::PredictionFailed(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReplicateError::Api {
            status: 422,
            message: "Invalid input".into(),
        };
        assert_eq!(err.to_string(), "Replicate API returned 422: Invalid input");

        let err = ReplicateError::PredictionFailed("NSFW content detected".into());
        assert_eq!(err.to_string(), "Prediction failed: NSFW content detected");
    }

    #[test]
    fn test_status_and_provider_message() {
        let err = ReplicateError::Api {
            status: 429,
            message: "Request was throttled".into(),
        };
        assert_eq!(err.status(), Some(429));
        assert_eq!(err.provider_message(), Some("Request was throttled"));

        let err = ReplicateError::PredictionFailed(String::new());
        assert_eq!(err.status(), None);
        assert_eq!(err.provider_message(), Some(""));

        assert_eq!(ReplicateError::Canceled.provider_message(), None);
    }
}
