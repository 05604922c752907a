//! Request and response bodies for the HTTP surface.

use std::time::{SystemTime, UNIX_EPOCH};

use askvoice_core::{AnswerResult, Source};
use serde::{Deserialize, Serialize};

/// `POST /ask` body. A missing `message` reads as empty.
#[derive(Debug, Default, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub message: String,
}

/// Successful `POST /ask` response.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub response: String,
    pub sources: Vec<Source>,
    /// Seconds since the Unix epoch.
    pub timestamp: f64,
}

impl From<AnswerResult> for AskResponse {
    fn from(result: AnswerResult) -> Self {
        Self {
            response: result.text,
            sources: result.sources,
            timestamp: unix_timestamp(),
        }
    }
}

/// `POST /ask` body for rejected or failed questions.
#[derive(Debug, Serialize)]
pub struct AskFailure {
    pub response: String,
    pub sources: Vec<Source>,
}

impl AskFailure {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            sources: Vec::new(),
        }
    }
}

/// `POST /stop_speech` response.
#[derive(Debug, Serialize)]
pub struct StopSpeechResponse {
    pub status: &'static str,
    pub message: String,
}

impl StopSpeechResponse {
    pub fn success() -> Self {
        Self {
            status: "success",
            message: "Speech stopped".to_string(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: message.into(),
        }
    }
}

/// Generic `{ "error": ... }` body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn unix_timestamp() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_message_reads_as_empty() {
        let request: AskRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.message, "");
    }

    #[test]
    fn ask_response_carries_timestamp() {
        let response = AskResponse::from(AnswerResult::new(
            "Paris.",
            vec![Source::new("Wikipedia", "https://en.wikipedia.org/wiki/Paris")],
        ));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["response"], "Paris.");
        assert_eq!(json["sources"][0]["title"], "Wikipedia");
        assert!(json["timestamp"].as_f64().unwrap() > 1_600_000_000.0);
    }

    #[test]
    fn failure_has_empty_sources() {
        let json = serde_json::to_value(AskFailure::new("nope")).unwrap();
        assert_eq!(json, serde_json::json!({ "response": "nope", "sources": [] }));
    }
}
