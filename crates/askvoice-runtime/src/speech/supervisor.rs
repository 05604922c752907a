//! Speech supervisor: owns the single live speech process.
//!
//! The supervisor keeps at most one speech unit alive. Starting a new
//! utterance stops the previous one first, and both steps happen under one
//! async mutex so concurrent callers can never leave two units running.
//!
//! Key design decisions:
//! - **Internal state ownership**: the child handle never leaves this module
//! - **Process isolation**: the engine runs in its own process group so a hung
//!   or crashed engine can be killed without touching server state
//! - **Lazy crash detection**: exits are observed when the unit is next
//!   queried, there is no background reaper
//! - **Bounded teardown**: SIGTERM, grace period, SIGKILL, bounded reap

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use askvoice_core::{SpeechError, SpeechPort, SpeechSettings, SpeechStatus};

use super::command::{SpeechCommand, SpeechUnit};
use crate::millis;
use crate::shutdown::{ShutdownOutcome, shutdown_child};

#[derive(Debug)]
struct SupervisorState {
    unit: Option<SpeechUnit>,
    /// Status reported once no unit is recorded.
    last: SpeechStatus,
}

/// Supervisor for the speech engine process.
///
/// # Example
///
/// ```ignore
/// let command = SpeechCommand::new("espeak-ng", vec!["--stdin".into()]);
/// let supervisor = SpeechSupervisor::new(command, Duration::from_secs(1));
/// supervisor.start("Paris.").await?;
/// supervisor.stop().await?;
/// ```
#[derive(Debug)]
pub struct SpeechSupervisor {
    command: SpeechCommand,
    stop_timeout: Duration,
    state: Mutex<SupervisorState>,
}

impl SpeechSupervisor {
    pub fn new(command: SpeechCommand, stop_timeout: Duration) -> Self {
        Self {
            command,
            stop_timeout,
            state: Mutex::new(SupervisorState {
                unit: None,
                last: SpeechStatus::Idle,
            }),
        }
    }

    pub fn from_settings(settings: &SpeechSettings) -> Self {
        Self::new(SpeechCommand::from_settings(settings), settings.stop_timeout)
    }

    /// Stop any live unit, then start a new one speaking `text`.
    ///
    /// Returns the PID of the new unit. If the previous unit cannot be
    /// confirmed stopped, no new unit is started.
    pub async fn start(&self, text: impl Into<String>) -> Result<u32, SpeechError> {
        let text = text.into();
        let mut state = self.state.lock().await;

        self.stop_locked(&mut state).await?;

        let unit = self.command.spawn(text)?;
        let pid = unit.pid;
        info!(pid, chars = unit.chars, program = %self.command.program(), "Speech started");

        state.last = SpeechStatus::Speaking {
            pid,
            chars: unit.chars,
        };
        state.unit = Some(unit);
        Ok(pid)
    }

    /// Stop the live unit, if any. A no-op when nothing is speaking.
    pub async fn stop(&self) -> Result<(), SpeechError> {
        let mut state = self.state.lock().await;
        self.stop_locked(&mut state).await
    }

    /// Observe the current unit, clearing it if it has exited.
    pub async fn status(&self) -> SpeechStatus {
        let mut state = self.state.lock().await;
        Self::observe_locked(&mut state);
        state.last.clone()
    }

    /// Whether a unit is alive right now.
    pub async fn is_speaking(&self) -> bool {
        self.status().await.is_speaking()
    }

    fn observe_locked(state: &mut SupervisorState) {
        let Some(unit) = state.unit.as_mut() else {
            return;
        };

        match unit.child.try_wait() {
            Ok(None) => {}
            Ok(Some(status)) => {
                let elapsed_ms = millis(unit.started_at.elapsed());
                state.last = if status.success() {
                    debug!(pid = unit.pid, elapsed_ms, "Speech finished");
                    SpeechStatus::Finished
                } else {
                    warn!(
                        pid = unit.pid,
                        elapsed_ms,
                        %status,
                        "Speech engine exited unsuccessfully"
                    );
                    SpeechStatus::Crashed {
                        code: status.code(),
                    }
                };
                state.unit = None;
            }
            Err(e) => warn!(pid = unit.pid, "Failed to query speech process: {e}"),
        }
    }

    async fn stop_locked(&self, state: &mut SupervisorState) -> Result<(), SpeechError> {
        Self::observe_locked(state);

        // The handle is cleared whatever the outcome; a unit that survives
        // SIGKILL is left to `kill_on_drop` and reported to the caller.
        let Some(mut unit) = state.unit.take() else {
            return Ok(());
        };
        state.last = SpeechStatus::Idle;
        let pid = unit.pid;

        match shutdown_child(&mut unit.child, self.stop_timeout).await {
            Ok(ShutdownOutcome::Killed(status)) => {
                warn!(
                    pid,
                    %status,
                    timeout_ms = millis(self.stop_timeout),
                    "Speech process ignored SIGTERM and was killed"
                );
                Ok(())
            }
            Ok(outcome) => {
                debug!(pid, status = %outcome.status(), "Speech stopped");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::TimedOut => {
                error!(pid, "Speech process could not be confirmed dead: {e}");
                Err(SpeechError::KillUnverified { pid })
            }
            Err(e) => {
                error!(pid, "Failed to stop speech process: {e}");
                Err(SpeechError::StopFailed(e.to_string()))
            }
        }
    }
}

#[async_trait]
impl SpeechPort for SpeechSupervisor {
    async fn speak(&self, text: String) {
        if let Err(e) = self.start(text).await {
            warn!("Speech request dropped: {e}");
        }
    }

    async fn stop_speech(&self) -> Result<(), SpeechError> {
        self.stop().await
    }

    async fn status(&self) -> SpeechStatus {
        SpeechSupervisor::status(self).await
    }
}
