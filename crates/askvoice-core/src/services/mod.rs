//! Application services built on top of the ports.

mod answer_service;

pub use answer_service::{AnswerService, NO_RESPONSE_TEXT};
