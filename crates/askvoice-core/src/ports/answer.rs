//! Grounded-answering port.
//!
//! The remote service is an external collaborator. Adapters return the
//! raw, possibly incomplete payload; normalization into an
//! [`AnswerResult`](crate::domain::AnswerResult) is the orchestrator's job.

use async_trait::async_trait;
use thiserror::Error;

/// A citation as reported by the remote service, fields possibly missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCitation {
    /// Display title, if the service supplied one.
    pub title: Option<String>,
    /// Cited URL, if the service supplied one.
    pub url: Option<String>,
}

impl RawCitation {
    pub fn new(title: Option<String>, url: Option<String>) -> Self {
        Self { title, url }
    }
}

/// Unnormalized answer payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawAnswer {
    /// Answer text; `None` when the service produced no text.
    pub text: Option<String>,
    /// Every web citation found, in service order.
    pub citations: Vec<RawCitation>,
}

/// Failures obtaining an answer from the remote service.
#[derive(Debug, Error)]
pub enum AnswerError {
    /// The service answered with a non-success status.
    #[error("API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    /// Network or transport failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response could not be understood.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Remote grounded-answering collaborator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswerPort: Send + Sync {
    /// Ask a question with web grounding enabled.
    async fn ask(&self, question: &str) -> Result<RawAnswer, AnswerError>;
}
