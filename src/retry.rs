//! Bounded retry with linear backoff for single RPC calls.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::Result;
use crate::traits::Clock;

/// Default number of attempts for a single RPC call
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;

/// Default base delay between attempts
pub const DEFAULT_RETRY_BASE_DELAY: Duration = Duration::from_millis(500);

/// Bounded-retry policy applied to individual RPC calls.
///
/// Backoff is linear: the wait after attempt `n` (zero-indexed) is
/// `base_delay * (n + 1)`. Linear rather than exponential is deliberate:
/// the outer polling loop already bounds total time, so the policy only
/// needs to ride out short endpoint hiccups, not model long outages.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use txwatch_rs::RetryPolicy;
///
/// // Use defaults (3 attempts, 500 ms base delay)
/// let policy = RetryPolicy::default();
///
/// // Customize
/// let policy = RetryPolicy::default()
///     .with_max_attempts(5)
///     .with_base_delay(Duration::from_millis(200));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts before the last error is propagated.
    /// A value of zero is treated as one attempt.
    pub max_attempts: u32,
    /// Base delay; multiplied by the attempt number for linear backoff.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_RETRY_ATTEMPTS,
            base_delay: DEFAULT_RETRY_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Sets the maximum number of attempts.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Sets the base backoff delay.
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Runs `operation` up to `max_attempts` times, sleeping between
    /// attempts through the injected clock.
    ///
    /// On exhaustion the final error is propagated to the caller rather than
    /// swallowed; the call site decides whether that is fatal.
    pub async fn run<C, T, F, Fut>(&self, clock: &C, mut operation: F) -> Result<T>
    where
        C: Clock,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let attempts = self.max_attempts.max(1);
        let mut last_error = None;

        for attempt in 0..attempts {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(error) => {
                    warn!(
                        attempt = attempt + 1,
                        max_attempts = attempts,
                        error = %error,
                        event = "retry_attempt_failed"
                    );
                    let remaining = attempt + 1 < attempts;
                    last_error = Some(error);
                    if remaining {
                        clock.sleep(self.base_delay * (attempt + 1)).await;
                    }
                }
            }
        }

        // attempts >= 1, so at least one error was recorded
        Err(last_error.unwrap_or_else(|| {
            crate::error::TrackError::Adapter("retry ran zero attempts".to_string())
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrackError;
    use crate::testing::FakeClock;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn flaky_operation(
        calls: Arc<AtomicU32>,
        failures_before_success: u32,
    ) -> impl FnMut() -> std::pin::Pin<Box<dyn Future<Output = Result<u64>> + Send>> {
        move || {
            let calls = calls.clone();
            Box::pin(async move {
                let call = calls.fetch_add(1, Ordering::SeqCst);
                if call < failures_before_success {
                    Err(TrackError::Adapter("connection reset".to_string()))
                } else {
                    Ok(42)
                }
            })
        }
    }

    #[tokio::test]
    async fn test_first_attempt_success_does_not_sleep() {
        let clock = FakeClock::new();
        let calls = Arc::new(AtomicU32::new(0));

        let result = RetryPolicy::default()
            .run(&clock, flaky_operation(calls.clone(), 0))
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(clock.sleep_count(), 0);
    }

    #[tokio::test]
    async fn test_linear_backoff_delays() {
        let clock = FakeClock::new();
        let calls = Arc::new(AtomicU32::new(0));
        let policy = RetryPolicy::default()
            .with_max_attempts(3)
            .with_base_delay(Duration::from_millis(100));

        let result = policy.run(&clock, flaky_operation(calls.clone(), 2)).await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // 100 ms after the first failure, 200 ms after the second
        assert_eq!(
            clock.sleep_log(),
            vec![Duration::from_millis(100), Duration::from_millis(200)]
        );
    }

    #[tokio::test]
    async fn test_exhaustion_propagates_last_error() {
        let clock = FakeClock::new();
        let calls = Arc::new(AtomicU32::new(0));
        let policy = RetryPolicy::default().with_max_attempts(3);

        let result = policy
            .run(&clock, flaky_operation(calls.clone(), u32::MAX))
            .await;

        assert!(matches!(result.unwrap_err(), TrackError::Adapter(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // no sleep after the final attempt
        assert_eq!(clock.sleep_count(), 2);
    }

    #[tokio::test]
    async fn test_zero_attempts_treated_as_one() {
        let clock = FakeClock::new();
        let calls = Arc::new(AtomicU32::new(0));
        let policy = RetryPolicy::default().with_max_attempts(0);

        let result = policy.run(&clock, flaky_operation(calls.clone(), 0)).await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
