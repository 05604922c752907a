//! Inbound question validation.

use thiserror::Error;

/// Longest accepted question, counted in characters after trimming.
pub const MAX_QUESTION_CHARS: usize = 500;

/// Reasons a raw message is rejected before reaching the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionError {
    /// Message was empty or whitespace only.
    #[error("⚠️ No question received.")]
    Empty,

    /// Message exceeded [`MAX_QUESTION_CHARS`].
    #[error("⚠️ Message too long. Please keep it under 500 characters.")]
    TooLong {
        /// Character count of the trimmed message.
        chars: usize,
    },
}

/// A validated, trimmed question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question(String);

impl Question {
    /// Trim and validate a raw message.
    pub fn parse(raw: &str) -> Result<Self, QuestionError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(QuestionError::Empty);
        }

        let chars = trimmed.chars().count();
        if chars > MAX_QUESTION_CHARS {
            return Err(QuestionError::TooLong { chars });
        }

        Ok(Self(trimmed.to_string()))
    }

    /// The question text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        let q = Question::parse("  capital of France \n").unwrap();
        assert_eq!(q.as_str(), "capital of France");
    }

    #[test]
    fn rejects_empty_and_blank() {
        assert_eq!(Question::parse(""), Err(QuestionError::Empty));
        assert_eq!(Question::parse("   \t"), Err(QuestionError::Empty));
    }

    #[test]
    fn accepts_exactly_max_chars() {
        let raw = "a".repeat(MAX_QUESTION_CHARS);
        assert!(Question::parse(&raw).is_ok());
    }

    #[test]
    fn rejects_one_over_max() {
        let raw = "a".repeat(MAX_QUESTION_CHARS + 1);
        assert_eq!(
            Question::parse(&raw),
            Err(QuestionError::TooLong { chars: 501 })
        );
    }

    #[test]
    fn counts_characters_not_bytes() {
        // 500 two-byte characters is still within the limit
        let raw = "é".repeat(MAX_QUESTION_CHARS);
        assert!(Question::parse(&raw).is_ok());
    }

    #[test]
    fn too_long_message_mentions_limit() {
        let err = Question::parse(&"x".repeat(600)).unwrap_err();
        assert!(err.to_string().contains("under 500 characters"));
    }
}
