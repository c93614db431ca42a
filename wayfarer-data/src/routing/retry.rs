//! Bounded exponential-backoff retry for distance lookups.

use std::future::Future;
use std::time::Duration;

use log::warn;
use wayfarer_core::DistanceError;

/// How often, and how patiently, transient lookup failures are retried.
///
/// Only errors for which [`DistanceError::is_transient`] holds are retried.
/// The `n`th retry waits `base_delay * 2^(n - 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt; zero disables retrying.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// A policy that never retries.
    pub const NONE: Self = Self {
        max_retries: 0,
        base_delay: Duration::ZERO,
    };

    /// Delay before retry number `attempt`, counting from one.
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.base_delay.saturating_mul(1 << exponent)
    }

    /// Run `operation` until it succeeds, fails permanently or the retry
    /// budget is exhausted.
    pub(crate) async fn run<F, Fut, T>(&self, operation: F) -> Result<T, DistanceError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, DistanceError>>,
    {
        let mut attempt = 0;
        loop {
            match operation().await {
                Err(error) if error.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    let delay = self.delay_for(attempt);
                    warn!("distance lookup failed (attempt {attempt}): {error}; retrying in {delay:?}");
                    tokio::time::sleep(delay).await;
                }
                result => return result,
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn timeout() -> DistanceError {
        DistanceError::Timeout {
            url: "http://localhost".to_owned(),
            timeout_secs: 1,
        }
    }

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime should build")
    }

    #[rstest]
    #[case(1, 100)]
    #[case(2, 200)]
    #[case(4, 800)]
    fn delays_double_per_attempt(#[case] attempt: u32, #[case] millis: u64) {
        let policy = RetryPolicy {
            max_retries: 5,
            base_delay: Duration::from_millis(100),
        };
        assert_eq!(policy.delay_for(attempt), Duration::from_millis(millis));
    }

    #[rstest]
    fn transient_failures_are_retried_until_success() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy {
            max_retries: 3,
            base_delay: Duration::from_millis(1),
        };
        let counter = &calls;
        let result = runtime().block_on(policy.run(move || async move {
            if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(timeout())
            } else {
                Ok(7)
            }
        }));
        assert_eq!(result, Ok(7));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[rstest]
    fn retry_budget_is_bounded() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy {
            max_retries: 2,
            base_delay: Duration::from_millis(1),
        };
        let counter = &calls;
        let result: Result<(), _> = runtime().block_on(policy.run(move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(timeout())
        }));
        assert_eq!(result, Err(timeout()));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[rstest]
    fn permanent_failures_are_not_retried() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result: Result<(), _> = runtime().block_on(RetryPolicy::default().run(move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(DistanceError::HttpError {
                url: "http://localhost".to_owned(),
                status: 400,
                message: "bad request".to_owned(),
            })
        }));
        assert!(matches!(result, Err(DistanceError::HttpError { status: 400, .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
