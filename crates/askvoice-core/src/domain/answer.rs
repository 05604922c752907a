//! Answer domain types.
//!
//! These are the transport-agnostic shapes produced by the answer
//! orchestrator and serialized verbatim by the HTTP adapter.

use serde::{Deserialize, Serialize};

/// Maximum number of cited sources returned with an answer.
pub const MAX_SOURCES: usize = 3;

/// Title used when a citation carries no display title.
pub const DEFAULT_SOURCE_TITLE: &str = "Source";

/// A single web citation backing an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Display title of the cited page.
    pub title: String,
    /// URL of the cited page (may be empty when the service omits it).
    pub url: String,
}

impl Source {
    /// Create a new source.
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Normalized answer: the text to show and speak, plus up to
/// [`MAX_SOURCES`] citations in the order the service returned them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerResult {
    /// Answer text (or a user-visible apology when answering failed).
    pub text: String,
    /// Cited sources, never more than [`MAX_SOURCES`].
    pub sources: Vec<Source>,
}

impl AnswerResult {
    /// Build a result, keeping only the first [`MAX_SOURCES`] sources.
    pub fn new(text: impl Into<String>, mut sources: Vec<Source>) -> Self {
        sources.truncate(MAX_SOURCES);
        Self {
            text: text.into(),
            sources,
        }
    }

    /// A degraded result carrying only a message and no sources.
    pub fn degraded(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sources: Vec::new(),
        }
    }
}
