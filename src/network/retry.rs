//! Retry logic with exponential backoff and a per-attempt timeout

use std::future::Future;
use std::time::Duration;
use anyhow::Result;
use tracing::warn;
use crate::config::Config;
use crate::errors::{DashboardError, DashboardResult};

#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub exponential_base: f64,
    pub attempt_timeout: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 250,
            max_delay_ms: 5000,
            exponential_base: 2.0,
            attempt_timeout: Duration::from_secs(10),
        }
    }
}

impl From<&Config> for RetryConfig {
    fn from(config: &Config) -> Self {
        Self {
            max_attempts: config.fetch_max_attempts,
            attempt_timeout: config.fetch_timeout(),
            ..Self::default()
        }
    }
}

enum AttemptError {
    TimedOut,
    Failed(anyhow::Error),
}

/// Runs `operation` until it succeeds or `max_attempts` is reached.
///
/// An operation that fails with a `DashboardError::DataParsing` is not
/// retried: the response arrived, it just could not be read.
pub async fn retry_with_backoff<F, Fut, T>(
    operation: F,
    config: &RetryConfig,
    context: &str,
) -> DashboardResult<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 0;
    let mut delay = config.initial_delay_ms;

    loop {
        attempt += 1;

        let outcome = match tokio::time::timeout(config.attempt_timeout, operation()).await {
            Ok(Ok(result)) => return Ok(result),
            Ok(Err(e)) => match e.downcast::<DashboardError>() {
                Ok(parse @ DashboardError::DataParsing { .. }) => return Err(parse),
                Ok(other) => AttemptError::Failed(other.into()),
                Err(e) => AttemptError::Failed(e),
            },
            Err(_) => AttemptError::TimedOut,
        };

        if attempt >= max_attempts {
            return Err(match outcome {
                AttemptError::TimedOut => DashboardError::Timeout {
                    context: format!("{} ({} attempts)", context, attempt),
                    after: config.attempt_timeout,
                },
                AttemptError::Failed(e) => DashboardError::Network {
                    message: format!("{} failed after {} attempts", context, attempt),
                    source: Some(e),
                    retry_count: attempt,
                },
            });
        }

        let reason = match &outcome {
            AttemptError::TimedOut => format!("timed out after {:?}", config.attempt_timeout),
            AttemptError::Failed(e) => e.to_string(),
        };
        warn!(
            "Attempt {}/{} failed for {}: {}. Retrying in {}ms...",
            attempt, max_attempts, context, reason, delay
        );

        tokio::time::sleep(Duration::from_millis(delay)).await;

        delay = (delay as f64 * config.exponential_base) as u64;
        let jitter = (delay as f64 * 0.1 * (rand::random::<f64>() - 0.5)) as i64;
        delay = delay.saturating_add_signed(jitter).min(config.max_delay_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast(max_attempts: u32) -> RetryConfig {
        RetryConfig {
            max_attempts,
            initial_delay_ms: 1,
            max_delay_ms: 5,
            exponential_base: 2.0,
            attempt_timeout: Duration::from_millis(200),
        }
    }

    #[tokio::test]
    async fn succeeds_after_transient_failures() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result = retry_with_backoff(
            move || async move {
                if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(anyhow::anyhow!("connection reset"))
                } else {
                    Ok(7)
                }
            },
            &fast(3),
            "flaky fetch",
        )
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_with_network_error_after_max_attempts() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result: DashboardResult<()> = retry_with_backoff(
            move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(anyhow::anyhow!("connection refused"))
            },
            &fast(2),
            "pairs fetch",
        )
        .await;

        match result {
            Err(DashboardError::Network { retry_count, message, .. }) => {
                assert_eq!(retry_count, 2);
                assert!(message.contains("pairs fetch"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn slow_attempts_time_out() {
        let mut config = fast(2);
        config.attempt_timeout = Duration::from_millis(10);

        let result: DashboardResult<()> = retry_with_backoff(
            || async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            },
            &config,
            "oracle fetch",
        )
        .await;

        assert!(matches!(result, Err(DashboardError::Timeout { .. })));
    }

    #[tokio::test]
    async fn parse_failures_are_not_retried() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result: DashboardResult<()> = retry_with_backoff(
            move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(DashboardError::DataParsing {
                    context: "pairs body".to_string(),
                    source: anyhow::anyhow!("expected value"),
                }
                .into())
            },
            &fast(5),
            "pairs fetch",
        )
        .await;

        assert!(matches!(result, Err(DashboardError::DataParsing { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
