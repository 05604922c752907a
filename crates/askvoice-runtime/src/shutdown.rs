//! Escalating shutdown for `tokio::process::Child` with SIGTERM → SIGKILL.
//!
//! Speech units are spawned as process-group leaders, so signals go to the
//! whole group and helpers forked by the engine die with it.

use std::io;
use std::process::ExitStatus;
use std::time::Duration;

use tokio::process::Child;
use tokio::time::timeout;

#[cfg(unix)]
use nix::errno::Errno;
#[cfg(unix)]
use nix::sys::signal::{self, Signal};
#[cfg(unix)]
use nix::unistd::Pid;

/// How long to wait for the kernel to hand back a SIGKILLed child.
pub const KILL_REAP_TIMEOUT: Duration = Duration::from_secs(1);

/// How a child came to be stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// The child had already exited before any signal was sent.
    AlreadyExited(ExitStatus),
    /// The child exited within the grace period after SIGTERM.
    Terminated(ExitStatus),
    /// The child ignored SIGTERM and was killed.
    Killed(ExitStatus),
}

impl ShutdownOutcome {
    /// Exit status the child was reaped with.
    pub const fn status(&self) -> ExitStatus {
        match self {
            Self::AlreadyExited(s) | Self::Terminated(s) | Self::Killed(s) => *s,
        }
    }
}

/// Stop a child process, escalating to SIGKILL if it outlives `grace`.
///
/// # Strategy
/// 1. If the child has already exited, reap it and return
/// 2. Send SIGTERM to its process group and wait up to `grace`
/// 3. If still running, send SIGKILL
/// 4. Wait up to [`KILL_REAP_TIMEOUT`] for reaping
///
/// # Platform behavior
/// - Unix: SIGTERM via nix, SIGKILL via nix on the process group
/// - Other: immediately kills the child (no graceful shutdown available)
///
/// # Errors
/// - `io::ErrorKind::TimedOut` if the child could not be reaped after SIGKILL
/// - Any other error if signalling or waiting fails
pub async fn shutdown_child(child: &mut Child, grace: Duration) -> io::Result<ShutdownOutcome> {
    if let Some(status) = child.try_wait()? {
        return Ok(ShutdownOutcome::AlreadyExited(status));
    }

    #[cfg(unix)]
    {
        shutdown_unix(child, grace).await
    }

    #[cfg(not(unix))]
    {
        let _ = grace;
        shutdown_forced(child).await
    }
}

#[cfg(unix)]
async fn shutdown_unix(child: &mut Child, grace: Duration) -> io::Result<ShutdownOutcome> {
    let pid = child
        .id()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "child has no PID"))?;
    let pgid = Pid::from_raw(
        i32::try_from(pid)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "PID out of range"))?,
    );

    // Phase 1: SIGTERM with grace period
    if let Err(e) = signal_group(pgid, Signal::SIGTERM) {
        // Process may have already exited
        if e == Errno::ESRCH {
            return child.wait().await.map(ShutdownOutcome::AlreadyExited);
        }
        return Err(io::Error::other(e));
    }

    if let Ok(result) = timeout(grace, child.wait()).await {
        return result.map(ShutdownOutcome::Terminated);
    }

    // Phase 2: SIGKILL
    match signal_group(pgid, Signal::SIGKILL) {
        Ok(()) | Err(Errno::ESRCH) => {}
        Err(e) => return Err(io::Error::other(e)),
    }

    // Phase 3: bounded wait for reaping
    reap_after_kill(child, pid).await
}

#[cfg(unix)]
fn signal_group(pgid: Pid, sig: Signal) -> Result<(), Errno> {
    match signal::killpg(pgid, sig) {
        // Not a group leader (e.g. spawned without its own group): signal it directly.
        Err(Errno::ESRCH) => signal::kill(pgid, sig),
        other => other,
    }
}

#[cfg(not(unix))]
async fn shutdown_forced(child: &mut Child) -> io::Result<ShutdownOutcome> {
    let pid = child.id().unwrap_or_default();
    child.start_kill()?;
    reap_after_kill(child, pid).await
}

async fn reap_after_kill(child: &mut Child, pid: u32) -> io::Result<ShutdownOutcome> {
    match timeout(KILL_REAP_TIMEOUT, child.wait()).await {
        Ok(result) => result.map(ShutdownOutcome::Killed),
        Err(_) => Err(io::Error::new(
            io::ErrorKind::TimedOut,
            format!("process {pid} did not exit after SIGKILL"),
        )),
    }
}
