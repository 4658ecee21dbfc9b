use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::domain::errors::TrackerError;
use crate::domain::models::RetryConfig;

/// Predicate deciding whether a failed attempt is tried again.
pub type RetryPredicate = fn(&TrackerError) -> bool;

/// Bounded retry policy for tracker calls
///
/// Attempts stop at `max_attempts` (first call included). Only errors for which
/// the predicate returns true are retried; everything else is returned as is.
/// With a zero initial backoff retries run back to back, otherwise the delay
/// doubles per attempt up to `max_backoff`.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    initial_backoff: Duration,
    max_backoff: Duration,
    retry_if: RetryPredicate,
}

impl RetryPolicy {
    /// Create a retry policy using the default predicate
    ///
    /// # Arguments
    /// * `max_attempts` - Total attempts, including the first (clamped to 1)
    /// * `initial_backoff_ms` - Delay before the first retry
    /// * `max_backoff_ms` - Upper bound for the doubled delay
    ///
    /// # Example
    /// ```
    /// use yatracker::infrastructure::tracker::RetryPolicy;
    ///
    /// let policy = RetryPolicy::new(3, 0, 0);
    /// assert_eq!(policy.max_attempts(), 3);
    /// ```
    pub fn new(max_attempts: u32, initial_backoff_ms: u64, max_backoff_ms: u64) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_backoff: Duration::from_millis(initial_backoff_ms),
            max_backoff: Duration::from_millis(max_backoff_ms.max(initial_backoff_ms)),
            retry_if: TrackerError::is_retryable,
        }
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(
            config.max_attempts,
            config.initial_backoff_ms,
            config.max_backoff_ms,
        )
    }

    /// Replace the retryable-condition predicate.
    #[must_use]
    pub const fn with_predicate(mut self, retry_if: RetryPredicate) -> Self {
        self.retry_if = retry_if;
        self
    }

    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Execute an operation, retrying retryable failures
    ///
    /// # Returns
    /// * `Ok(T)` - An attempt succeeded
    /// * `Err(TrackerError)` - A non-retryable error, or the error of the final
    ///   attempt once the ceiling is reached
    pub async fn execute<F, Fut, T>(&self, mut operation: F) -> Result<T, TrackerError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, TrackerError>>,
    {
        let mut attempt = 1;

        loop {
            match operation().await {
                Ok(result) => {
                    if attempt > 1 {
                        debug!(attempt, "operation succeeded after retry");
                    }
                    return Ok(result);
                }
                Err(err) => {
                    if !self.should_retry(&err, attempt) {
                        if attempt >= self.max_attempts && (self.retry_if)(&err) {
                            warn!(attempts = attempt, error = %err, "retry attempts exhausted");
                        } else {
                            debug!(error = %err, "permanent error, not retrying");
                        }
                        return Err(err);
                    }

                    let backoff = self.calculate_backoff(attempt);
                    warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %err,
                        backoff_ms = u64::try_from(backoff.as_millis()).unwrap_or(u64::MAX),
                        "attempt failed with retryable error"
                    );
                    if !backoff.is_zero() {
                        sleep(backoff).await;
                    }
                    attempt += 1;
                }
            }
        }
    }

    /// Delay after failed attempt `attempt` (1-based):
    /// `min(initial * 2^(attempt - 1), max)`.
    fn calculate_backoff(&self, attempt: u32) -> Duration {
        let factor = 2_u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }

    fn should_retry(&self, error: &TrackerError, attempt: u32) -> bool {
        attempt < self.max_attempts && (self.retry_if)(error)
    }
}

impl Default for RetryPolicy {
    /// Three attempts, back to back, retrying connect timeouts and HTTP error
    /// statuses.
    fn default() -> Self {
        Self::new(3, 0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{ConnectionError, TrackerApiError};
    use reqwest::StatusCode;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn server_error(attempt: u32) -> TrackerError {
        TrackerApiError::Status {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: format!("attempt {attempt}"),
        }
        .into()
    }

    #[test]
    fn test_backoff_calculation() {
        let policy = RetryPolicy::new(5, 100, 1000);

        assert_eq!(policy.calculate_backoff(1), Duration::from_millis(100));
        assert_eq!(policy.calculate_backoff(2), Duration::from_millis(200));
        assert_eq!(policy.calculate_backoff(3), Duration::from_millis(400));
        assert_eq!(policy.calculate_backoff(4), Duration::from_millis(800));
        assert_eq!(policy.calculate_backoff(5), Duration::from_millis(1000));
    }

    #[test]
    fn test_default_policy_is_immediate() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), 3);
        assert_eq!(policy.calculate_backoff(1), Duration::ZERO);
        assert_eq!(policy.calculate_backoff(2), Duration::ZERO);
    }

    #[test]
    fn test_zero_attempts_clamped_to_one() {
        assert_eq!(RetryPolicy::new(0, 0, 0).max_attempts(), 1);
    }

    #[tokio::test]
    async fn test_execute_succeeds_immediately() {
        let policy = RetryPolicy::default();
        let calls = Arc::new(AtomicU32::new(0));

        let result = policy
            .execute(|| {
                let calls = Arc::clone(&calls);
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, TrackerError>(42)
                }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_execute_succeeds_on_third_attempt() {
        let policy = RetryPolicy::default();
        let calls = Arc::new(AtomicU32::new(0));

        let result = policy
            .execute(|| {
                let calls = Arc::clone(&calls);
                async move {
                    let attempt = calls.fetch_add(1, Ordering::SeqCst) + 1;
                    if attempt < 3 {
                        Err(server_error(attempt))
                    } else {
                        Ok("done")
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_execute_surfaces_last_error_when_exhausted() {
        let policy = RetryPolicy::default();
        let calls = Arc::new(AtomicU32::new(0));

        let result: Result<(), _> = policy
            .execute(|| {
                let calls = Arc::clone(&calls);
                async move {
                    let attempt = calls.fetch_add(1, Ordering::SeqCst) + 1;
                    Err(server_error(attempt))
                }
            })
            .await;

        let err = result.unwrap_err();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(err.to_string().contains("attempt 3"));
    }

    #[tokio::test]
    async fn test_execute_does_not_retry_permanent_errors() {
        let policy = RetryPolicy::default();
        let calls = Arc::new(AtomicU32::new(0));

        let result: Result<(), _> = policy
            .execute(|| {
                let calls = Arc::clone(&calls);
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(ConnectionError::MissingHost("conn".to_string()).into())
                }
            })
            .await;

        assert!(matches!(result, Err(TrackerError::Connection(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_custom_predicate() {
        let policy = RetryPolicy::new(4, 0, 0).with_predicate(|_| false);
        let calls = Arc::new(AtomicU32::new(0));

        let result: Result<(), _> = policy
            .execute(|| {
                let calls = Arc::clone(&calls);
                async move {
                    let attempt = calls.fetch_add(1, Ordering::SeqCst) + 1;
                    Err(server_error(attempt))
                }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_backoff_waits_between_attempts() {
        let policy = RetryPolicy::new(3, 20, 100);
        let calls = Arc::new(AtomicU32::new(0));
        let start = std::time::Instant::now();

        let _: Result<(), _> = policy
            .execute(|| {
                let calls = Arc::clone(&calls);
                async move {
                    let attempt = calls.fetch_add(1, Ordering::SeqCst) + 1;
                    Err(server_error(attempt))
                }
            })
            .await;

        // 20ms + 40ms of backoff
        assert!(start.elapsed() >= Duration::from_millis(60));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
