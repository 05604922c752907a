//! Speech port: the surface the HTTP adapter needs from the speech
//! supervisor.
//!
//! The execution unit behind this port is never exposed. Callers can ask
//! for speech, ask for silence, and observe a status snapshot.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Snapshot of the current speech unit, observed lazily.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum SpeechStatus {
    /// No unit has been recorded.
    Idle,
    /// A unit is alive.
    Speaking {
        /// OS process ID of the unit.
        pid: u32,
        /// Length of the text being spoken, in characters.
        chars: usize,
    },
    /// The last unit ran to completion.
    Finished,
    /// The last unit exited unsuccessfully on its own.
    Crashed {
        /// Exit code, if the unit exited normally.
        code: Option<i32>,
    },
}

impl SpeechStatus {
    /// Whether a unit is currently alive.
    pub const fn is_speaking(&self) -> bool {
        matches!(self, Self::Speaking { .. })
    }
}

/// Errors raised by the speech subsystem.
#[derive(Debug, Error)]
pub enum SpeechError {
    /// The speech engine process could not be started.
    #[error("Failed to start speech engine: {0}")]
    SpawnFailed(String),

    /// Signalling or reaping the running unit failed.
    #[error("Failed to stop speech: {0}")]
    StopFailed(String),

    /// SIGKILL was sent but the unit could not be confirmed dead.
    #[error("Speech process {pid} did not exit after kill")]
    KillUnverified { pid: u32 },
}

/// Speech supervisor as seen by request handlers.
#[async_trait]
pub trait SpeechPort: Send + Sync {
    /// Supersede any live speech with `text`.
    ///
    /// Failures are logged by the implementation and never returned.
    async fn speak(&self, text: String);

    /// Stop any live speech. Succeeds as a no-op when nothing is speaking.
    async fn stop_speech(&self) -> Result<(), SpeechError>;

    /// Observe the current unit.
    async fn status(&self) -> SpeechStatus;
}
