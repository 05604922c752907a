//! Process runtime and OS-level concerns for askvoice.
//!
//! - [`speech`] - the speech supervisor, which owns the one live speech process
//! - [`admission`] - the rate limiter that paces `/ask`
//! - [`shutdown`] - SIGTERM → SIGKILL escalation for child processes

#![deny(unsafe_code)]

pub mod admission;
pub mod shutdown;
pub mod speech;

use std::time::Duration;

pub use admission::RateLimiter;
pub use shutdown::{KILL_REAP_TIMEOUT, ShutdownOutcome, shutdown_child};
pub use speech::{SpeechCommand, SpeechSupervisor};

/// Whole milliseconds in `d`, saturating, for log fields.
pub(crate) fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_saturates_instead_of_truncating() {
        assert_eq!(millis(Duration::from_millis(1500)), 1500);
        assert_eq!(millis(Duration::MAX), u64::MAX);
    }
}
