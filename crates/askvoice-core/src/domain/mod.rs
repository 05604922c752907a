//! Domain types shared across adapters.

mod answer;
mod question;

pub use answer::{AnswerResult, DEFAULT_SOURCE_TITLE, MAX_SOURCES, Source};
pub use question::{MAX_QUESTION_CHARS, Question, QuestionError};
