//! Gemini grounded-answering client for askvoice.
//!
//! [`GeminiClient`] implements [`askvoice_core::AnswerPort`]. It sends a
//! single-turn question with the Google Search tool enabled and returns the
//! answer text together with the web citations the service reports.
//! Normalization (placeholder text, citation defaults, truncation) happens in
//! `askvoice-core`.
//!
//! # Example
//!
//! ```no_run
//! use askvoice_gemini::{GeminiClient, GeminiConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::new(GeminiConfig::new("api-key"))?;
//! let answer = client.generate("What is the capital of France?").await?;
//! println!("{:?}", answer.text);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use axum as _;
#[cfg(test)]
use tokio as _;

mod client;
mod config;
mod error;
mod models;

pub use client::GeminiClient;
pub use config::GeminiConfig;
pub use error::{GeminiError, GeminiResult};
