//! Retry-with-deadline polling.

use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, sleep};

/// How often, and for how long, to repeat an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Pause between attempts.
    pub interval: Duration,
    /// Ceiling measured from the start of the first attempt.
    pub timeout: Duration,
}

/// Outcome of [`RetryPolicy::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polled<T> {
    /// Value produced by the last attempt.
    pub value: T,
    /// Number of attempts made (at least one).
    pub attempts: u32,
    /// Whether the last value satisfied the condition.
    pub satisfied: bool,
}

impl RetryPolicy {
    /// Create a policy polling every `interval` for up to `timeout`.
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }

    /// A policy that makes exactly one attempt.
    pub fn once() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// Run `attempt` until `satisfied` accepts its value or the timeout has
    /// elapsed, sleeping `interval` in between.
    ///
    /// The first attempt always runs. An attempt error is returned at once.
    pub async fn run<T, E, F, Fut, P>(&self, mut attempt: F, satisfied: P) -> Result<Polled<T>, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: Fn(&T) -> bool,
    {
        let start = Instant::now();
        let mut attempts = 0;

        loop {
            let value = attempt().await?;
            attempts += 1;

            if satisfied(&value) {
                return Ok(Polled {
                    value,
                    attempts,
                    satisfied: true,
                });
            }

            if start.elapsed() >= self.timeout {
                return Ok(Polled {
                    value,
                    attempts,
                    satisfied: false,
                });
            }

            sleep(self.interval).await;
        }
    }
}
