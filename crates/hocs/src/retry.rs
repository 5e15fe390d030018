use std::future::Future;
use std::time::Duration;

use crate::config::UpstreamConfig;

/// Fixed-delay retry budget applied at the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    attempts: u32,
    backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(100))
    }
}

impl RetryPolicy {
    /// `attempts` counts the first call; zero is treated as one.
    pub fn new(attempts: u32, backoff: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            backoff,
        }
    }

    pub fn from_config(config: &UpstreamConfig) -> Self {
        Self::new(config.retry_attempts, config.retry_backoff)
    }

    pub fn none() -> Self {
        Self::new(1, Duration::ZERO)
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Runs `operation` until it succeeds, fails with an error `retryable`
    /// rejects, or the attempt budget is spent.
    pub async fn run<T, E, F, Fut>(
        &self,
        operation_name: &str,
        retryable: impl Fn(&E) -> bool,
        mut operation: F,
    ) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let mut attempt = 1;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(error) if attempt < self.attempts && retryable(&error) => {
                    tracing::warn!(
                        operation = operation_name,
                        attempt,
                        max_attempts = self.attempts,
                        %error,
                        "upstream call failed, retrying"
                    );
                    attempt += 1;
                    if !self.backoff.is_zero() {
                        tokio::time::sleep(self.backoff).await;
                    }
                }
                Err(error) => return Err(error),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Debug, PartialEq)]
    enum Failure {
        Transient,
        Permanent,
    }

    impl std::fmt::Display for Failure {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{self:?}")
        }
    }

    fn transient(error: &Failure) -> bool {
        *error == Failure::Transient
    }

    #[tokio::test]
    async fn retries_transient_failures_until_success() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let policy = RetryPolicy::new(3, Duration::ZERO);

        let result = policy
            .run("lookup", transient, move || async move {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(Failure::Transient)
                } else {
                    Ok("record")
                }
            })
            .await;

        assert_eq!(result, Ok("record"));
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_the_attempt_budget() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let policy = RetryPolicy::new(3, Duration::ZERO);

        let result: Result<(), Failure> = policy
            .run("lookup", transient, move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(Failure::Transient)
            })
            .await;

        assert_eq!(result, Err(Failure::Transient));
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn never_retries_permanent_failures() {
        let counter = AtomicU32::new(0);
        let calls = &counter;

        let result: Result<(), Failure> = RetryPolicy::default()
            .run("lookup", transient, move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(Failure::Permanent)
            })
            .await;

        assert_eq!(result, Err(Failure::Permanent));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn zero_attempts_still_calls_once() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).attempts(), 1);
        assert_eq!(RetryPolicy::none().attempts(), 1);
    }
}
