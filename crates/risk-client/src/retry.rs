use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use risk_protocol::config::{DEFAULT_BASE_DELAY_MS, DEFAULT_MAX_ATTEMPTS};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one. Never below 1.
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    pub fn single_attempt() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Backoff before retry number `retry` (1-based): `base_delay * 2^retry`.
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(retry))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_MAX_ATTEMPTS,
            Duration::from_millis(DEFAULT_BASE_DELAY_MS),
        )
    }
}

/// Runs `operation` until it succeeds, the error is not retryable, or the
/// attempt budget is spent. The closure receives the 1-based attempt number.
/// The last error is returned unchanged.
pub async fn retry_with_backoff<T, E, F, Fut, P>(
    policy: &RetryPolicy,
    is_retryable: P,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
    E: Display,
{
    let mut attempt = 1u32;
    loop {
        match operation(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if attempt >= policy.max_attempts || !is_retryable(&err) {
                    return Err(err);
                }
                let backoff = policy.delay_for(attempt);
                warn!(
                    attempt = attempt,
                    max_attempts = policy.max_attempts,
                    backoff_ms = backoff.as_millis() as u64,
                    error = %err,
                    "request attempt failed, backing off"
                );
                tokio::time::sleep(backoff).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tokio::time::Instant;

    fn assert_elapsed(started: Instant, expected: Duration) {
        let elapsed = started.elapsed();
        assert!(
            elapsed >= expected && elapsed < expected + Duration::from_millis(50),
            "elapsed {elapsed:?}, expected {expected:?}"
        );
    }

    #[test]
    fn default_policy_backs_off_two_then_four_seconds() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.delay_for(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for(2), Duration::from_secs(4));
    }

    #[test]
    fn zero_attempts_is_clamped() {
        assert_eq!(RetryPolicy::new(0, Duration::from_millis(5)).max_attempts, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_budget_with_last_error() {
        let calls = Cell::new(0u32);
        let started = Instant::now();
        let result: Result<(), String> =
            retry_with_backoff(&RetryPolicy::default(), |_| true, |attempt| {
                calls.set(calls.get() + 1);
                async move { Err(format!("failure {attempt}")) }
            })
            .await;
        assert_eq!(result.unwrap_err(), "failure 3");
        assert_eq!(calls.get(), 3);
        assert_elapsed(started, Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn stops_retrying_once_an_attempt_succeeds() {
        let started = Instant::now();
        let result: Result<u32, String> =
            retry_with_backoff(&RetryPolicy::default(), |_| true, |attempt| async move {
                if attempt < 2 {
                    Err("flaky".to_string())
                } else {
                    Ok(attempt)
                }
            })
            .await;
        assert_eq!(result, Ok(2));
        assert_elapsed(started, Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn non_retryable_error_returns_immediately() {
        let calls = Cell::new(0u32);
        let started = Instant::now();
        let result: Result<(), String> = retry_with_backoff(
            &RetryPolicy::default(),
            |err: &String| err != "fatal",
            |_| {
                calls.set(calls.get() + 1);
                async { Err("fatal".to_string()) }
            },
        )
        .await;
        assert!(result.is_err());
        assert_eq!(calls.get(), 1);
        assert_elapsed(started, Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn single_attempt_policy_never_sleeps() {
        let calls = Cell::new(0u32);
        let result: Result<(), &str> =
            retry_with_backoff(&RetryPolicy::single_attempt(), |_| true, |_| {
                calls.set(calls.get() + 1);
                async { Err("nope") }
            })
            .await;
        assert_eq!(result, Err("nope"));
        assert_eq!(calls.get(), 1);
    }
}
