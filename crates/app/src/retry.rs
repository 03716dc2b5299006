//! Bounded retries with exponential backoff for startup connections.

use std::{fmt::Display, future::Future, time::Duration};

use tracing::{info, warn};

/// How often and how patiently to retry a failing operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first; `0` behaves like `1`.
    pub max_attempts: u32,

    /// Wait after the first failure.
    pub initial_delay: Duration,

    /// Upper bound on any single wait.
    pub max_delay: Duration,

    /// Growth factor applied to the wait after each failure.
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
            multiplier: 1.5,
        }
    }
}

impl RetryPolicy {
    /// A policy that tries once and never waits.
    #[must_use]
    pub fn once() -> Self {
        Self {
            max_attempts: 1,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            multiplier: 1.0,
        }
    }

    fn next_delay(&self, delay: Duration) -> Duration {
        Duration::try_from_secs_f64(delay.as_secs_f64() * self.multiplier)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}

/// Run `attempt` until it succeeds or the policy's attempts are spent.
///
/// Returns the last error once every attempt has failed.
///
/// # Errors
///
/// Returns the error of the final attempt.
pub async fn retry<T, E, F, Fut>(
    policy: &RetryPolicy,
    operation: &str,
    mut attempt: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut delay = policy.initial_delay.min(policy.max_delay);
    let mut tried = 1;

    loop {
        match attempt().await {
            Ok(value) => {
                if tried > 1 {
                    info!(operation, attempt = tried, "succeeded after retrying");
                }

                return Ok(value);
            }
            Err(error) if tried < max_attempts => {
                warn!(
                    operation,
                    attempt = tried,
                    max_attempts,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %error,
                    "failed, retrying"
                );

                tokio::time::sleep(delay).await;

                delay = policy.next_delay(delay);
                tried += 1;
            }
            Err(error) => return Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    fn immediate(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            ..RetryPolicy::once()
        }
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let calls = AtomicU32::new(0);

        let result: Result<(), String> = retry(&immediate(4), "connect", || {
            let call = calls.fetch_add(1, Ordering::SeqCst) + 1;

            async move { Err(format!("refused on attempt {call}")) }
        })
        .await;

        assert_eq!(result, Err("refused on attempt 4".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn stops_at_the_first_success() {
        let calls = AtomicU32::new(0);

        let result: Result<u32, String> = retry(&immediate(10), "connect", || {
            let call = calls.fetch_add(1, Ordering::SeqCst) + 1;

            async move {
                if call < 3 {
                    Err("not ready".to_string())
                } else {
                    Ok(call)
                }
            }
        })
        .await;

        assert_eq!(result, Ok(3));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn zero_attempts_still_tries_once() {
        let calls = AtomicU32::new(0);

        let result: Result<(), &str> = retry(&immediate(0), "connect", || {
            calls.fetch_add(1, Ordering::SeqCst);

            async { Err("refused") }
        })
        .await;

        assert_eq!(result, Err("refused"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn delays_grow_until_capped() {
        let policy = RetryPolicy::default();

        let mut delay = policy.initial_delay;
        let mut delays = vec![delay];

        for _ in 0..7 {
            delay = policy.next_delay(delay);
            delays.push(delay);
        }

        let millis: Vec<u128> = delays.iter().map(Duration::as_millis).collect();

        assert_eq!(
            millis,
            vec![1_000, 1_500, 2_250, 3_375, 5_062, 7_593, 10_000, 10_000]
        );
    }
}
