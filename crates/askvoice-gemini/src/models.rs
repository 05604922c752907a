//! Wire types for the `generateContent` endpoint.
//!
//! Only the fields askvoice reads are modeled. Every response field is
//! optional because the service omits empty parts freely.

use askvoice_core::{RawAnswer, RawCitation};
use serde::{Deserialize, Serialize};

// ============================================================================
// Request
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateRequest<'a> {
    pub contents: Vec<Content<'a>>,
    pub tools: Vec<Tool>,
    pub generation_config: GenerationConfig,
}

impl<'a> GenerateRequest<'a> {
    /// Single-turn request with web search grounding enabled.
    pub fn grounded(question: &'a str, temperature: f32) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: question }],
            }],
            tools: vec![Tool {
                google_search: GoogleSearch {},
            }],
            generation_config: GenerationConfig { temperature },
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct Content<'a> {
    pub parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Part<'a> {
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct Tool {
    pub google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
pub(crate) struct GoogleSearch {}

#[derive(Debug, Serialize)]
pub(crate) struct GenerationConfig {
    pub temperature: f32,
}

// ============================================================================
// Response
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Candidate {
    #[serde(default)]
    pub content: Option<ResponseContent>,
    #[serde(default)]
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ResponseContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct GroundingChunk {
    #[serde(default)]
    pub web: Option<WebChunk>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WebChunk {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// Error envelope returned with non-success statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: String,
}

impl GenerateResponse {
    /// Text of the first candidate plus web citations from every candidate.
    pub fn into_raw_answer(self) -> RawAnswer {
        let text = self
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .filter(|text| !text.is_empty());

        let citations = self
            .candidates
            .into_iter()
            .filter_map(|c| c.grounding_metadata)
            .flat_map(|meta| meta.grounding_chunks)
            .filter_map(|chunk| chunk.web)
            .map(|web| RawCitation::new(web.title, web.uri))
            .collect();

        RawAnswer { text, citations }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> RawAnswer {
        serde_json::from_value::<GenerateResponse>(value)
            .unwrap()
            .into_raw_answer()
    }

    #[test]
    fn request_enables_search_tool() {
        let body = serde_json::to_value(GenerateRequest::grounded("why?", 0.5)).unwrap();
        assert_eq!(
            body,
            json!({
                "contents": [{ "parts": [{ "text": "why?" }] }],
                "tools": [{ "google_search": {} }],
                "generationConfig": { "temperature": 0.5 }
            })
        );
    }

    #[test]
    fn joins_parts_of_first_candidate() {
        let answer = parse(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "Paris " }, { "text": "is the capital." }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }));
        assert_eq!(answer.text.as_deref(), Some("Paris is the capital."));
    }

    #[test]
    fn collects_citations_across_candidates() {
        let answer = parse(json!({
            "candidates": [
                {
                    "content": { "parts": [{ "text": "x" }] },
                    "groundingMetadata": { "groundingChunks": [
                        { "web": { "uri": "https://a.example", "title": "A" } },
                        { "retrievedContext": {} }
                    ]}
                },
                {
                    "groundingMetadata": { "groundingChunks": [
                        { "web": { "uri": "https://b.example" } }
                    ]}
                }
            ]
        }));
        assert_eq!(
            answer.citations,
            vec![
                RawCitation::new(Some("A".into()), Some("https://a.example".into())),
                RawCitation::new(None, Some("https://b.example".into())),
            ]
        );
    }

    #[test]
    fn missing_candidates_yield_empty_answer() {
        assert_eq!(parse(json!({})), RawAnswer::default());
        assert_eq!(
            parse(json!({ "candidates": [{ "content": { "parts": [] } }] })).text,
            None
        );
    }
}
