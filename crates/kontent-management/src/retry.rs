//! Retries with exponential backoff for transient API failures

use std::future::Future;
use std::time::Duration;

use kontent_import_types::{ManagementError, ManagementResult};
use tokio::time::sleep;
use tracing::{debug, warn};

/// Retry configuration for management API calls
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

/// Run `operation` until it succeeds, fails permanently or runs out of retries
pub async fn with_retry<F, Fut, T>(
    operation: F,
    config: &RetryConfig,
    operation_name: &str,
) -> ManagementResult<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = ManagementResult<T>>,
{
    let mut attempt = 0;
    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    debug!(
                        "{} succeeded on attempt {} after {} retries",
                        operation_name,
                        attempt + 1,
                        attempt
                    );
                }
                return Ok(result);
            }
            Err(error) if !is_retryable(&error) => {
                debug!("{} failed with non-retryable error: {}", operation_name, error);
                return Err(error);
            }
            Err(error) if attempt >= config.max_retries => {
                warn!(
                    "{} failed on final attempt {} ({}), giving up",
                    operation_name,
                    attempt + 1,
                    error
                );
                return Err(error);
            }
            Err(error) => {
                let delay = calculate_delay(attempt, config);
                warn!(
                    "{} failed on attempt {} ({}), retrying in {:?}",
                    operation_name,
                    attempt + 1,
                    error,
                    delay
                );
                sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

/// Exponential delay for the given attempt, capped, plus up to 10% jitter
pub(crate) fn calculate_delay(attempt: u32, config: &RetryConfig) -> Duration {
    let exponential_delay =
        config.base_delay.as_millis() as f64 * config.backoff_multiplier.powi(attempt as i32);

    let mut delay = Duration::from_millis(exponential_delay as u64).min(config.max_delay);

    if config.jitter {
        let jitter_ms = (delay.as_millis() as f64 * 0.1 * rand::random::<f64>()) as u64;
        delay += Duration::from_millis(jitter_ms);
    }

    delay
}

/// Transport failures, timeouts, throttling and server errors are transient
pub(crate) fn is_retryable(error: &ManagementError) -> bool {
    match error {
        ManagementError::Transport(_) => true,
        ManagementError::Api { status, .. } => matches!(*status, 408 | 429 | 500..=599),
        ManagementError::InvalidResponse(_) | ManagementError::Serialization(_) => false,
    }
}
