//! Axum-specific error types and mappings.
//!
//! Each variant renders the body shape its route has always used: `/ask`
//! failures keep the `{response, sources}` shape, `/stop_speech` failures
//! the `{status, message}` shape, everything else `{error}`.

use askvoice_core::{QuestionError, SpeechError};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::dto::{AskFailure, ErrorResponse, StopSpeechResponse};

/// Shown when `/ask` fails for a reason other than the answering service.
pub const ASK_FAILED_TEXT: &str = "⚠️ An error occurred. Please try again.";

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The question failed validation.
    #[error(transparent)]
    InvalidQuestion(#[from] QuestionError),

    /// The request body was not usable JSON.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// `/ask` failed unexpectedly.
    #[error("Ask failed: {0}")]
    AskFailed(String),

    /// Stopping speech failed.
    #[error(transparent)]
    Speech(#[from] SpeechError),

    /// No route matched.
    #[error("Endpoint not found")]
    NotFound,
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                Self::BadRequest("Content-Type must be application/json".to_string())
            }
            other => Self::BadRequest(other.body_text()),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidQuestion(e) => {
                (StatusCode::BAD_REQUEST, Json(AskFailure::new(e.to_string()))).into_response()
            }
            Self::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: msg })).into_response()
            }
            Self::AskFailed(msg) => {
                error!("Error in /ask endpoint: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(AskFailure::new(ASK_FAILED_TEXT)),
                )
                    .into_response()
            }
            Self::Speech(e) => {
                error!("Error stopping speech: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(StopSpeechResponse::error(e.to_string())),
                )
                    .into_response()
            }
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Endpoint not found".to_string(),
                }),
            )
                .into_response(),
        }
    }
}
