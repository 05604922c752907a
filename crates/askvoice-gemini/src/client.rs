//! Reqwest-backed Gemini client.

use askvoice_core::{AnswerError, AnswerPort, RawAnswer};
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::GeminiConfig;
use crate::error::{GeminiError, GeminiResult};
use crate::models::{ErrorEnvelope, GenerateRequest, GenerateResponse};

/// Grounded-answering client for the Gemini REST API.
///
/// Requests are sent once; failures are reported, never retried.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a client from configuration.
    pub fn new(config: GeminiConfig) -> GeminiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { http, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Ask `question` with web search grounding and return the raw payload.
    pub async fn generate(&self, question: &str) -> GeminiResult<RawAnswer> {
        let url = self.config.endpoint();
        debug!(model = %self.config.model, chars = question.chars().count(), "Sending question");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&GenerateRequest::grounded(question, self.config.temperature))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            warn!(status = status.as_u16(), "Gemini request failed");
            return Err(GeminiError::ApiRequestFailed {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = serde_json::from_str(&body)?;
        let answer = parsed.into_raw_answer();
        debug!(
            has_text = answer.text.is_some(),
            citations = answer.citations.len(),
            "Received answer"
        );
        Ok(answer)
    }
}

#[async_trait]
impl AnswerPort for GeminiClient {
    async fn ask(&self, question: &str) -> Result<RawAnswer, AnswerError> {
        self.generate(question).await.map_err(Into::into)
    }
}
