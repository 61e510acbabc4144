//! Retry policies for HTTP requests.
//!
//! Reads are retried on transport failures and gateway errors; writes are
//! never retried, so a create that timed out is not submitted twice.

use crate::error::HttpError;
use std::time::Duration;

/// Retry policy for one request.
#[derive(Debug, Clone, Default)]
pub enum RetryPolicy {
    /// Single attempt. Used for create/update/delete and login.
    #[default]
    None,
    /// The client's read configuration (see [`RetryConfig::reads`]).
    Reads,
    /// Caller-provided configuration.
    Custom(RetryConfig),
}

/// Backoff configuration.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Attempts after the first one.
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_factor: f64,
    /// Spread delays by ±25%.
    pub jitter: bool,
    /// Server statuses worth another attempt.
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::reads()
    }
}

impl RetryConfig {
    /// Default for list and get-by-id requests.
    pub fn reads() -> Self {
        Self {
            max_retries: 2,
            initial_delay: Duration::from_millis(300),
            max_delay: Duration::from_secs(5),
            backoff_factor: 2.0,
            jitter: true,
            retryable_statuses: vec![502, 503, 504],
        }
    }

    /// Whether `error` may succeed on another attempt.
    ///
    /// Authorization failures never are: a rejected token stays rejected.
    pub fn is_retryable(&self, error: &HttpError) -> bool {
        match error {
            HttpError::ServerError { status, .. } => self.retryable_statuses.contains(status),
            HttpError::RateLimited { .. } => true,
            #[cfg(feature = "http")]
            HttpError::Reqwest(e) => {
                #[cfg(not(target_arch = "wasm32"))]
                let transient = e.is_connect() || e.is_timeout();
                #[cfg(target_arch = "wasm32")]
                let transient = e.is_timeout() || e.is_request();
                transient
            }
            _ => false,
        }
    }

    /// Delay before retry number `attempt` (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base = self.initial_delay.as_millis() as f64 * self.backoff_factor.powi(attempt as i32);
        let capped = base.min(self.max_delay.as_millis() as f64);

        let ms = if self.jitter {
            let spread = capped * 0.25;
            (capped + (rand::random::<f64>() * 2.0 - 1.0) * spread).max(0.0)
        } else {
            capped
        };

        Duration::from_millis(ms as u64)
    }
}
