//! Answer orchestration: ask the remote service and normalize the result.

use std::sync::Arc;

use tracing::{debug, error};

use crate::domain::{AnswerResult, DEFAULT_SOURCE_TITLE, Question, Source};
use crate::ports::{AnswerPort, RawAnswer};

/// Shown when the service answered without any text.
pub const NO_RESPONSE_TEXT: &str = "⚠️ No response generated.";

/// Turns questions into [`AnswerResult`]s.
///
/// Every failure is contained here: callers always receive a valid result,
/// degraded to an apologetic message with no sources when answering fails.
pub struct AnswerService {
    port: Arc<dyn AnswerPort>,
}

impl AnswerService {
    pub fn new(port: Arc<dyn AnswerPort>) -> Self {
        Self { port }
    }

    /// Answer a validated question.
    pub async fn answer(&self, question: &Question) -> AnswerResult {
        match self.port.ask(question.as_str()).await {
            Ok(raw) => {
                let result = normalize(raw);
                debug!(
                    chars = result.text.chars().count(),
                    sources = result.sources.len(),
                    "Answer received"
                );
                result
            }
            Err(e) => {
                error!("Answering service error: {e}");
                AnswerResult::degraded(format!("⚠️ Error: {e}"))
            }
        }
    }
}

fn normalize(raw: RawAnswer) -> AnswerResult {
    let text = raw
        .text
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| NO_RESPONSE_TEXT.to_string());

    let sources = raw
        .citations
        .into_iter()
        .map(|c| {
            Source::new(
                c.title
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| DEFAULT_SOURCE_TITLE.to_string()),
                c.url.unwrap_or_default(),
            )
        })
        .collect();

    AnswerResult::new(text, sources)
}
