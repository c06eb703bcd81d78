//! Bounded retry with exponential backoff for the archive request.
//!
//! Only transient failures are retried: timeouts, connection errors, 5xx,
//! 408 and 429. Client errors (4xx) are final.

use log::{debug, warn};
use reqwest::{Response, StatusCode};
use std::future::Future;
use std::time::Duration;

pub const DEFAULT_MAX_RETRIES: u32 = 5;
pub const DEFAULT_INITIAL_DELAY_MS: u64 = 200;
pub const DEFAULT_MAX_DELAY_MS: u64 = 10_000;

#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the initial attempt.
    pub max_retries: u32,
    /// Delay before the first retry; doubles per attempt.
    pub initial_delay: Duration,
    /// Ceiling for the backoff delay.
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_delay: Duration::from_millis(DEFAULT_INITIAL_DELAY_MS),
            max_delay: Duration::from_millis(DEFAULT_MAX_DELAY_MS),
        }
    }
}

impl RetryConfig {
    pub fn new(max_retries: u32, initial_delay_ms: u64, max_delay_ms: u64) -> Self {
        Self {
            max_retries,
            initial_delay: Duration::from_millis(initial_delay_ms),
            max_delay: Duration::from_millis(max_delay_ms),
        }
    }

    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt);
        let delay_ms = (self.initial_delay.as_millis() as u64).saturating_mul(factor);
        Duration::from_millis(delay_ms.min(self.max_delay.as_millis() as u64))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    Retry,
    NoRetry,
}

pub fn is_retryable_error(error: &reqwest::Error) -> RetryDecision {
    if error.is_timeout() || error.is_connect() {
        return RetryDecision::Retry;
    }
    if error.is_request() {
        return RetryDecision::NoRetry;
    }
    if let Some(status) = error.status() {
        return is_retryable_status(status);
    }
    RetryDecision::NoRetry
}

pub fn is_retryable_status(status: StatusCode) -> RetryDecision {
    if status.is_server_error()
        || status == StatusCode::TOO_MANY_REQUESTS
        || status == StatusCode::REQUEST_TIMEOUT
    {
        return RetryDecision::Retry;
    }
    RetryDecision::NoRetry
}

/// A transport failure together with the number of attempts actually made, so
/// a non-retryable first-attempt error is not reported as a spent budget.
#[derive(Debug)]
pub struct RetryFailure {
    pub attempts: u32,
    pub source: reqwest::Error,
}

/// Runs `operation` until it yields a non-retryable outcome or the retry budget
/// is spent. The final attempt's response is returned as-is; status-code
/// handling beyond retry classification is left to the caller.
pub async fn with_retry<F, Fut>(config: &RetryConfig, operation: F) -> Result<Response, RetryFailure>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<Response, reqwest::Error>>,
{
    for attempt in 0..config.max_retries {
        match operation().await {
            Ok(response) => {
                let status = response.status();
                if is_retryable_status(status) == RetryDecision::NoRetry {
                    if attempt > 0 {
                        debug!("Archive request succeeded after {} retries", attempt);
                    }
                    return Ok(response);
                }
                warn!(
                    "Archive returned retryable status {} (attempt {} of {})",
                    status,
                    attempt + 1,
                    config.max_retries + 1
                );
            }
            Err(e) => {
                if is_retryable_error(&e) == RetryDecision::NoRetry {
                    debug!("Non-retryable error: {}", e);
                    return Err(RetryFailure {
                        attempts: attempt + 1,
                        source: e,
                    });
                }
                warn!(
                    "Retryable error on attempt {} of {}: {}",
                    attempt + 1,
                    config.max_retries + 1,
                    e
                );
            }
        }
        tokio::time::sleep(config.delay_for_attempt(attempt)).await;
    }
    operation().await.map_err(|e| RetryFailure {
        attempts: config.max_retries + 1,
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_archive_policy() {
        let config = RetryConfig::default();
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.initial_delay, Duration::from_millis(200));
        assert_eq!(config.max_delay, Duration::from_millis(10_000));
    }

    #[test]
    fn delay_doubles_per_attempt() {
        let config = RetryConfig::new(5, 200, 10_000);
        assert_eq!(config.delay_for_attempt(0), Duration::from_millis(200));
        assert_eq!(config.delay_for_attempt(1), Duration::from_millis(400));
        assert_eq!(config.delay_for_attempt(2), Duration::from_millis(800));
        assert_eq!(config.delay_for_attempt(3), Duration::from_millis(1600));
    }

    #[test]
    fn delay_is_capped_at_max() {
        let config = RetryConfig::new(10, 200, 1000);
        assert_eq!(config.delay_for_attempt(4), Duration::from_millis(1000));
        assert_eq!(config.delay_for_attempt(10), Duration::from_millis(1000));
    }

    #[test]
    fn status_classification() {
        assert_eq!(
            is_retryable_status(StatusCode::INTERNAL_SERVER_ERROR),
            RetryDecision::Retry
        );
        assert_eq!(
            is_retryable_status(StatusCode::SERVICE_UNAVAILABLE),
            RetryDecision::Retry
        );
        assert_eq!(
            is_retryable_status(StatusCode::TOO_MANY_REQUESTS),
            RetryDecision::Retry
        );
        assert_eq!(
            is_retryable_status(StatusCode::REQUEST_TIMEOUT),
            RetryDecision::Retry
        );
        assert_eq!(
            is_retryable_status(StatusCode::BAD_REQUEST),
            RetryDecision::NoRetry
        );
        assert_eq!(
            is_retryable_status(StatusCode::NOT_FOUND),
            RetryDecision::NoRetry
        );
        assert_eq!(is_retryable_status(StatusCode::OK), RetryDecision::NoRetry);
    }

    #[tokio::test]
    async fn non_retryable_error_reports_a_single_attempt() {
        let config = RetryConfig::new(5, 1, 10);
        let client = reqwest::Client::new();
        let calls = std::sync::atomic::AtomicU32::new(0);

        // An unsupported scheme fails at request build time, before any I/O,
        // and is classified non-retryable.
        let failure = with_retry(&config, || {
            calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            client.get("ftp://127.0.0.1/archive").send()
        })
        .await
        .unwrap_err();

        assert_eq!(failure.attempts, 1);
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn exhausted_budget_reports_every_attempt() {
        let config = RetryConfig::new(2, 1, 2);
        let client = reqwest::Client::new();
        let calls = std::sync::atomic::AtomicU32::new(0);

        // Port 9 (discard) is closed on loopback; connection refusal is a
        // retryable transport error.
        let failure = with_retry(&config, || {
            calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            client.get("http://127.0.0.1:9/archive").send()
        })
        .await
        .unwrap_err();

        assert_eq!(failure.attempts, 3);
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 3);
    }
}
