//! Axum web server adapter for askvoice.
//!
//! Exposes the question-answering surface over HTTP:
//!
//! - `POST /ask` answers a question with web-grounded sources and hands the
//!   answer to the speech supervisor
//! - `POST /stop_speech` silences any live speech
//! - `GET /speech_status` reports the current speech unit
//! - `GET /health` liveness probe
//!
//! [`bootstrap`] is the composition root; handlers only see ports, so tests
//! build an [`AxumContext`] from fakes.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings for the in-crate test build
#[cfg(test)]
use async_trait as _;
#[cfg(test)]
use http_body_util as _;
#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use tower as _;

// Used by main.rs binary
use clap as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

// Re-export primary types
pub use bootstrap::{AxumContext, CorsConfig, ServerConfig, bootstrap, start_server};
pub use error::HttpError;
pub use routes::{create_router, create_spa_router};
pub use state::AppState;
