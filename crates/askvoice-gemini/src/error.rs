//! Internal error types for Gemini operations.
//!
//! These errors are internal to `askvoice-gemini` and are mapped to core
//! port errors at the boundary.

use askvoice_core::AnswerError;
use thiserror::Error;

/// Result type alias for Gemini operations.
pub type GeminiResult<T> = Result<T, GeminiError>;

#[derive(Debug, Error)]
pub enum GeminiError {
    /// API request failed with an HTTP error status.
    #[error("Gemini API request failed with status {status}: {message}")]
    ApiRequestFailed { status: u16, message: String },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl From<GeminiError> for AnswerError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::ApiRequestFailed { status, message } => Self::Api { status, message },
            GeminiError::Network(e) => Self::Transport(e.to_string()),
            GeminiError::JsonParse(e) => Self::InvalidResponse(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_failure_maps_to_api_error() {
        let err: AnswerError = GeminiError::ApiRequestFailed {
            status: 403,
            message: "API key not valid".to_string(),
        }
        .into();
        assert!(matches!(err, AnswerError::Api { status: 403, .. }));
        assert!(err.to_string().contains("API key not valid"));
    }

    #[test]
    fn json_failure_maps_to_invalid_response() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: AnswerError = GeminiError::from(parse_err).into();
        assert!(matches!(err, AnswerError::InvalidResponse(_)));
    }
}
