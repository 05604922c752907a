//! Core domain types, ports and configuration for askvoice.
//!
//! This crate has no process, HTTP-server or HTTP-client code. Adapters
//! (`askvoice-runtime`, `askvoice-gemini`, `askvoice-axum`) implement the
//! ports defined here and are wired together at the composition root.

#![deny(unused_crate_dependencies)]

pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use config::{
    AdmissionPolicy, AdmissionSettings, AnswerSettings, AppConfig, ConfigError, ServerSettings,
    SpeechSettings, min_interval,
};
pub use domain::{AnswerResult, MAX_QUESTION_CHARS, MAX_SOURCES, Question, QuestionError, Source};
pub use ports::{
    AnswerError, AnswerPort, RawAnswer, RawCitation, SpeechError, SpeechPort, SpeechStatus,
};
pub use services::AnswerService;

