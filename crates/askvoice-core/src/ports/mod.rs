//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `reqwest` or `axum` types in any signature
//! - No process handles: the speech execution unit stays inside the runtime
//! - Intent-based methods (`speak`, `stop_speech`), not implementation-leaking ones

pub mod answer;
pub mod speech;

pub use answer::{AnswerError, AnswerPort, RawAnswer, RawCitation};
pub use speech::{SpeechError, SpeechPort, SpeechStatus};

#[cfg(test)]
pub use answer::MockAnswerPort;
