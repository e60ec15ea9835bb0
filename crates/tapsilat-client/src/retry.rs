//! Retry logic for order operations.
//!
//! Only [`OrderError::Network`] faults are retried. Status-derived,
//! validation and domain errors are returned on the first attempt.

use std::future::Future;
use std::time::Duration;
use tapsilat_core::{OrderError, OrderResult};
use tracing::{debug, warn};

/// Default number of attempts, including the first.
pub const MAX_ATTEMPTS: u32 = 3;

/// Default base delay between attempts.
pub const RETRY_DELAY: Duration = Duration::from_secs(1);

/// How many times to run an operation and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(MAX_ATTEMPTS, RETRY_DELAY)
    }
}

impl RetryPolicy {
    /// `max_attempts` is clamped to at least 1.
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// A policy that runs the operation exactly once
    pub fn no_retry() -> Self {
        Self::new(1, Duration::ZERO)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Sleep after failed attempt `attempt` (1-based): `base_delay * attempt`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }

    /// Run `operation` until it succeeds, fails non-retryably, or the
    /// attempts run out. Each attempt starts from scratch.
    pub async fn run<T, F, Fut>(&self, operation_name: &str, mut operation: F) -> OrderResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = OrderResult<T>>,
    {
        let mut attempt = 1;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if !e.is_retryable() => {
                    debug!("{}: non-retryable error: {}", operation_name, e);
                    return Err(e);
                }
                Err(e) if attempt >= self.max_attempts => {
                    warn!(
                        "{}: giving up after {} attempts ({})",
                        operation_name, attempt, e
                    );
                    return Err(OrderError::RetryExhausted {
                        attempts: self.max_attempts,
                        last_error: last_error_message(&e),
                    });
                }
                Err(e) => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        "{}: attempt {}/{} failed ({}), retrying in {:?}...",
                        operation_name, attempt, self.max_attempts, e, delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

/// The transport-level message behind a retryable error.
fn last_error_message(error: &OrderError) -> String {
    error
        .transport_error()
        .map(ToString::to_string)
        .unwrap_or_else(|| error.to_string())
}

/// Run `operation` under a policy; see [`RetryPolicy::run`].
pub async fn with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    operation_name: &str,
    operation: F,
) -> OrderResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = OrderResult<T>>,
{
    policy.run(operation_name, operation).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;
    use tapsilat_core::{Operation, TransportError, ValidationError};
    use tokio::time::Instant;

    fn timeout() -> OrderError {
        OrderError::Network {
            operation: Operation::Fetch,
            source: TransportError::Timeout("read timed out".into()),
        }
    }

    #[test]
    fn test_backoff_grows_linearly() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(1), Duration::from_secs(1));
        assert_eq!(policy.delay_for(2), Duration::from_secs(2));
        assert_eq!(policy.delay_for(3), Duration::from_secs(3));
        assert_eq!(RetryPolicy::new(0, RETRY_DELAY).max_attempts(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_on_third_attempt() {
        let calls = AtomicU32::new(0);
        let started = Instant::now();
        let call_times = Mutex::new(Vec::new());

        let result = with_retry(&RetryPolicy::default(), "test", || {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            call_times.lock().unwrap().push(started.elapsed());
            async move {
                if n < 3 {
                    Err(timeout())
                } else {
                    Ok("done")
                }
            }
        })
        .await;

        assert_eq!(result, Ok("done"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(
            *call_times.lock().unwrap(),
            vec![Duration::ZERO, Duration::from_secs(1), Duration::from_secs(3)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausts_after_max_attempts() {
        let calls = AtomicU32::new(0);

        let result: OrderResult<()> = with_retry(&RetryPolicy::default(), "test", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(timeout()) }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        let err = result.unwrap_err();
        assert_eq!(
            err,
            OrderError::RetryExhausted {
                attempts: 3,
                last_error: "Request timed out: read timed out".into(),
            }
        );
        assert!(err.to_string().starts_with("Max retry attempts (3) exceeded"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_retryable_errors_propagate_unmodified() {
        let calls = AtomicU32::new(0);
        let server_error = OrderError::Server {
            operation: Operation::Create,
            source: TransportError::ServerError,
        };

        let result: OrderResult<()> = with_retry(&RetryPolicy::default(), "test", || {
            calls.fetch_add(1, Ordering::SeqCst);
            let err = server_error.clone();
            async move { Err(err) }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(result.unwrap_err(), server_error);

        let result: OrderResult<()> = with_retry(&RetryPolicy::default(), "test", || async {
            Err(ValidationError::EmptyBasket.into())
        })
        .await;
        assert_eq!(result.unwrap_err(), OrderError::Validation(ValidationError::EmptyBasket));
    }

    #[tokio::test]
    async fn test_single_attempt_policy() {
        let calls = AtomicU32::new(0);

        let result: OrderResult<()> = with_retry(&RetryPolicy::no_retry(), "test", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(timeout()) }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(OrderError::RetryExhausted { attempts: 1, .. })));
    }
}
