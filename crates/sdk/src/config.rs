//! Configuration types for the Moodle client.

use std::fmt;
use std::time::Duration;
use url::Url;

/// Configuration for the Moodle client.
#[derive(Clone)]
pub struct ClientConfig {
    /// Full REST endpoint, e.g. `https://lms.example.edu/webservice/rest/server.php`.
    pub base_url: Url,
    /// Web service token sent as `wstoken` on every call.
    pub token: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Retry behaviour for read calls.
    pub retry_config: RetryConfig,
}

impl ClientConfig {
    /// Create a configuration with default timeout and retries.
    pub fn new(base_url: Url, token: impl Into<String>) -> Self {
        Self {
            base_url,
            token: token.into(),
            timeout: Duration::from_secs(30),
            retry_config: RetryConfig::default(),
        }
    }
}

// The token is a credential; keep it out of logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("retry_config", &self.retry_config)
            .finish()
    }
}

/// Backoff policy for read-only web service calls.
///
/// Writes (`mod_assign_save_grade`) are never retried regardless of this
/// configuration.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_backoff: Duration,
    /// Upper bound for any single delay.
    pub max_backoff: Duration,
    /// Growth factor between consecutive delays.
    pub backoff_multiplier: f64,
    /// HTTP statuses worth retrying.
    pub retry_on_status_codes: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_backoff: Duration::from_millis(200),
            max_backoff: Duration::from_secs(5),
            backoff_multiplier: 2.0,
            retry_on_status_codes: vec![429, 500, 502, 503, 504],
        }
    }
}

impl RetryConfig {
    /// A policy that gives up after the first failure.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    /// Default policy with a different retry count.
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Default::default()
        }
    }

    /// Delay before retry number `attempt` (zero-based).
    pub fn backoff_for_attempt(&self, attempt: u32) -> Duration {
        let millis = self.initial_backoff.as_millis() as f64
            * self.backoff_multiplier.powi(attempt as i32);
        std::cmp::min(Duration::from_millis(millis as u64), self.max_backoff)
    }

    pub fn should_retry_status(&self, status: u16) -> bool {
        self.retry_on_status_codes.contains(&status)
    }
}
