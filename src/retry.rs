//! Bounded retry with linear backoff for remote calls
//!
//! The hosted generation APIs rate-limit free-tier callers aggressively, so
//! every remote call goes through [`RetryPolicy::run`]. Only rate-limit
//! failures are retried; anything else propagates after a single attempt.

use crate::{Error, Result};
use std::future::Future;
use std::time::Duration;
use tokio_retry::RetryIf;
use tracing::warn;

/// Linear backoff strategy yielding `base * 1, base * 2, base * 3, ...`.
///
/// One delay is consumed before each retry, so `take(n)` allows `n + 1`
/// total attempts.
#[derive(Debug, Clone, Copy)]
pub struct LinearBackoff {
    base: Duration,
    attempt: u32,
}

impl LinearBackoff {
    pub fn new(base: Duration) -> Self {
        Self { base, attempt: 0 }
    }
}

impl Iterator for LinearBackoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        self.attempt += 1;
        Some(self.base.saturating_mul(self.attempt))
    }
}

/// Retry policy for a single remote call.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. Must be at least 1.
    pub max_attempts: usize,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: usize, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Delays slept between attempts: `[base, base * 2, ...]`, one fewer than
    /// `max_attempts`.
    pub fn delays(&self) -> impl Iterator<Item = Duration> {
        LinearBackoff::new(self.base_delay).take(self.max_attempts.saturating_sub(1))
    }

    /// Execute `make_request`, retrying rate-limited failures.
    ///
    /// The callable is invocation-agnostic: any zero-argument unit of work
    /// that may fail. On success the result is returned immediately. A
    /// rate-limited error triggers a backoff sleep and another attempt, up to
    /// `max_attempts` total; the final error propagates once attempts are
    /// exhausted. Any other error propagates immediately with no delay.
    pub async fn run<T, F, Fut>(&self, mut make_request: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let max_attempts = self.max_attempts;
        let base_delay = self.base_delay;
        let mut attempt: u32 = 0;

        RetryIf::spawn(
            self.delays(),
            || {
                attempt += 1;
                let current = attempt;
                let request = make_request();
                async move {
                    request.await.map_err(|e| {
                        if e.is_rate_limited() && (current as usize) < max_attempts {
                            let delay = base_delay.saturating_mul(current);
                            warn!(
                                "Rate limited on attempt {}/{}, retrying in {:?}",
                                current, max_attempts, delay
                            );
                        }
                        e
                    })
                }
            },
            |e: &Error| e.is_rate_limited(),
        )
        .await
    }
}
