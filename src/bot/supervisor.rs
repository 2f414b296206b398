//! Bounded-backoff supervisor for the polling loop.
//!
//! Restarts the long-poll loop after a fatal error with exponential backoff,
//! a delay cap, and a consecutive-failure ceiling. A run that stayed healthy
//! long enough resets the failure budget, so transient outages days apart do
//! not accumulate toward the ceiling.

use std::future::Future;
use std::time::{Duration, Instant};

use tokio::time::sleep;
use tracing::{info, warn};

/// Restart policy for the supervised loop.
#[derive(Debug, Clone)]
pub struct BackoffPolicy {
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub multiplier: f64,
    /// Consecutive failures tolerated before giving up.
    pub max_consecutive_failures: u32,
    /// Run duration after which the failure budget resets.
    pub healthy_run: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(60),
            multiplier: 2.0,
            max_consecutive_failures: 5,
            healthy_run: Duration::from_secs(300),
        }
    }
}

/// Backoff state tracked across restarts.
struct Backoff {
    policy: BackoffPolicy,
    consecutive_failures: u32,
    current_delay: Duration,
}

impl Backoff {
    fn new(policy: BackoffPolicy) -> Self {
        let current_delay = policy.initial_delay;
        Self {
            policy,
            consecutive_failures: 0,
            current_delay,
        }
    }

    /// Return the delay to wait now and advance the state for the next call.
    fn next_delay(&mut self) -> Duration {
        let delay = self.current_delay;
        let next = self.current_delay.mul_f64(self.policy.multiplier);
        self.current_delay = next.min(self.policy.max_delay);
        delay
    }

    fn record_failure(&mut self) {
        self.consecutive_failures += 1;
    }

    fn exhausted(&self) -> bool {
        self.consecutive_failures >= self.policy.max_consecutive_failures
    }

    fn reset(&mut self) {
        self.consecutive_failures = 0;
        self.current_delay = self.policy.initial_delay;
    }
}

/// Run `task` until it completes cleanly, restarting on failure per `policy`.
///
/// # Errors
///
/// Returns the last task error once the consecutive-failure ceiling is
/// reached.
pub async fn supervise<F, Fut>(policy: BackoffPolicy, mut task: F) -> anyhow::Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<()>>,
{
    let healthy_run = policy.healthy_run;
    let mut backoff = Backoff::new(policy);

    loop {
        let started = Instant::now();

        match task().await {
            Ok(()) => return Ok(()),
            Err(err) => {
                if started.elapsed() >= healthy_run {
                    info!("Run was healthy before failing, resetting failure budget");
                    backoff.reset();
                }

                backoff.record_failure();
                if backoff.exhausted() {
                    return Err(err.context(format!(
                        "polling loop failed {} times in a row",
                        backoff.consecutive_failures
                    )));
                }

                let delay = backoff.next_delay();
                warn!(
                    error = %err,
                    attempt = backoff.consecutive_failures,
                    delay_ms = delay.as_millis() as u64,
                    "Polling loop failed, restarting after delay"
                );
                sleep(delay).await;
            }
        }
    }
}
