//! Admission control: space out starts of a guarded operation.
//!
//! Excess callers are delayed, never rejected. Two policies exist:
//!
//! - [`AdmissionPolicy::BestEffort`] waits out the remainder of the interval
//!   since the last call, runs the operation, then records the time. Callers
//!   that pass the check before any of them records a timestamp run together.
//! - [`AdmissionPolicy::Strict`] reserves the next free start slot under the
//!   lock before waiting, so starts are always at least one interval apart.
//!
//! Time comes from `tokio::time`, so paused-clock tests are deterministic.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use askvoice_core::{AdmissionPolicy, AdmissionSettings, ConfigError, min_interval};
use tokio::time::{Instant, sleep, sleep_until};
use tracing::debug;

use crate::millis;

/// Minimum-spacing guard for one operation.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    policy: AdmissionPolicy,
    /// Best-effort: end of the last call. Strict: last reserved start slot.
    last: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Create a limiter admitting at most `max_per_second` starts per second.
    ///
    /// Rejects zero, negative and non-finite rates.
    pub fn new(max_per_second: f64, policy: AdmissionPolicy) -> Result<Self, ConfigError> {
        Ok(Self {
            min_interval: min_interval(max_per_second)?,
            policy,
            last: Mutex::new(None),
        })
    }

    pub fn from_settings(settings: &AdmissionSettings) -> Result<Self, ConfigError> {
        Self::new(settings.max_per_second, settings.policy)
    }

    pub const fn min_interval(&self) -> Duration {
        self.min_interval
    }

    pub const fn policy(&self) -> AdmissionPolicy {
        self.policy
    }

    /// Run `op` once admitted, delaying the caller if needed.
    pub async fn run<F, Fut, T>(&self, op: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        match self.policy {
            AdmissionPolicy::BestEffort => self.run_best_effort(op).await,
            AdmissionPolicy::Strict => self.run_strict(op).await,
        }
    }

    async fn run_best_effort<F, Fut, T>(&self, op: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let wait = (*self.lock())
            .map(|last| self.min_interval.saturating_sub(last.elapsed()))
            .unwrap_or_default();

        if !wait.is_zero() {
            debug!(wait_ms = millis(wait), "Delaying admission");
            sleep(wait).await;
        }

        let output = op().await;
        *self.lock() = Some(Instant::now());
        output
    }

    async fn run_strict<F, Fut, T>(&self, op: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let slot = {
            let mut last = self.lock();
            let now = Instant::now();
            let slot = last.map_or(now, |prev| (prev + self.min_interval).max(now));
            *last = Some(slot);
            slot
        };

        let now = Instant::now();
        if slot > now {
            debug!(wait_ms = millis(slot - now), "Delaying admission");
            sleep_until(slot).await;
        }

        op().await
    }

    fn lock(&self) -> MutexGuard<'_, Option<Instant>> {
        // The guarded value is a plain timestamp; a poisoned lock is still usable.
        self.last.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    type Starts = Arc<Mutex<Vec<Instant>>>;

    fn record(starts: &Starts) {
        starts.lock().unwrap().push(Instant::now());
    }

    fn gaps(starts: &Starts) -> Vec<Duration> {
        let starts = starts.lock().unwrap();
        starts.windows(2).map(|w| w[1] - w[0]).collect()
    }

    async fn slow_call(limiter: &RateLimiter, starts: &Starts) {
        limiter
            .run(|| async {
                record(starts);
                sleep(Duration::from_millis(10)).await;
            })
            .await;
    }

    #[test]
    fn rejects_non_positive_rates() {
        for rate in [0.0, -3.0, f64::NAN, f64::INFINITY] {
            assert!(
                RateLimiter::new(rate, AdmissionPolicy::BestEffort).is_err(),
                "rate {rate} should be rejected"
            );
        }
    }

    #[test]
    fn interval_is_reciprocal_of_rate() {
        let limiter = RateLimiter::new(3.0, AdmissionPolicy::BestEffort).unwrap();
        assert_eq!(limiter.min_interval(), Duration::from_secs_f64(1.0 / 3.0));
    }

    #[tokio::test(start_paused = true)]
    async fn first_call_is_not_delayed() {
        let limiter = RateLimiter::new(3.0, AdmissionPolicy::BestEffort).unwrap();
        let before = Instant::now();
        limiter.run(|| async {}).await;
        assert_eq!(Instant::now(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn sequential_calls_are_spaced() {
        let limiter = RateLimiter::new(3.0, AdmissionPolicy::BestEffort).unwrap();
        let starts: Starts = Arc::default();

        for _ in 0..5 {
            limiter.run(|| async { record(&starts) }).await;
        }

        let gaps = gaps(&starts);
        assert_eq!(gaps.len(), 4);
        for gap in gaps {
            assert!(gap >= limiter.min_interval(), "gap {gap:?} too short");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn best_effort_measures_from_end_of_previous_call() {
        let limiter = RateLimiter::new(2.0, AdmissionPolicy::BestEffort).unwrap();
        let starts: Starts = Arc::default();

        for _ in 0..2 {
            limiter
                .run(|| async {
                    record(&starts);
                    sleep(Duration::from_millis(200)).await;
                })
                .await;
        }

        // 200ms of work plus the full 500ms interval after it completed
        let gaps = gaps(&starts);
        assert!(gaps[0] >= Duration::from_millis(700), "gap {:?}", gaps[0]);
    }

    #[tokio::test(start_paused = true)]
    async fn best_effort_admits_concurrent_burst() {
        let limiter = RateLimiter::new(3.0, AdmissionPolicy::BestEffort).unwrap();
        let starts: Starts = Arc::default();

        tokio::join!(
            slow_call(&limiter, &starts),
            slow_call(&limiter, &starts),
            slow_call(&limiter, &starts),
        );

        // Nobody had recorded a timestamp when the others checked
        let gaps = gaps(&starts);
        assert!(gaps.iter().all(Duration::is_zero), "gaps {gaps:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn strict_spaces_concurrent_callers() {
        let limiter = Arc::new(RateLimiter::new(4.0, AdmissionPolicy::Strict).unwrap());
        let starts: Starts = Arc::default();

        let mut tasks = Vec::new();
        for _ in 0..5 {
            let limiter = Arc::clone(&limiter);
            let starts = Arc::clone(&starts);
            tasks.push(tokio::spawn(async move {
                limiter
                    .run(|| async {
                        record(&starts);
                        sleep(Duration::from_millis(10)).await;
                    })
                    .await;
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let mut recorded = starts.lock().unwrap().clone();
        recorded.sort();
        for pair in recorded.windows(2) {
            assert!(pair[1] - pair[0] >= limiter.min_interval());
        }
    }
}
