//! HTTP transport for web service calls.

use crate::config::ClientConfig;
use crate::error::{MoodleError, MoodleResult};
use crate::transport::params::WsParams;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Issues `GET <base_url>?wstoken=..&moodlewsrestformat=json&wsfunction=..`
/// calls and decodes the JSON body.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> MoodleResult<Self> {
        if config.token.trim().is_empty() {
            return Err(MoodleError::Config("token is required".to_string()));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("moodle-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    fn request(&self, function: &str, params: &WsParams) -> RequestBuilder {
        self.client
            .get(self.config.base_url.clone())
            .query(&[
                ("wstoken", self.config.token.as_str()),
                ("moodlewsrestformat", "json"),
                ("wsfunction", function),
            ])
            .query(params.pairs())
    }

    /// One attempt: status check, JSON decode, exception detection.
    async fn call_once(&self, function: &str, params: &WsParams) -> MoodleResult<Value> {
        debug!(function, params = params.pairs().len(), "Web service call");

        let response = self.request(function, params).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(MoodleError::from_status(status.as_u16(), &body));
        }

        // Void functions answer with an empty body or a literal null
        let value: Value = if body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&body)?
        };

        match MoodleError::from_exception_body(&value) {
            Some(error) => Err(error),
            None => Ok(value),
        }
    }

    fn should_retry(&self, error: &MoodleError) -> bool {
        match error {
            MoodleError::Status { status, .. } => {
                self.config.retry_config.should_retry_status(*status)
            }
            other => other.is_retryable(),
        }
    }

    async fn call_with_retry(&self, function: &str, params: &WsParams) -> MoodleResult<Value> {
        let retry_config = &self.config.retry_config;
        let mut attempts = 0;

        loop {
            match self.call_once(function, params).await {
                Ok(value) => return Ok(value),
                Err(e) if attempts < retry_config.max_retries && self.should_retry(&e) => {
                    let backoff = retry_config.backoff_for_attempt(attempts);
                    warn!(
                        function,
                        attempt = attempts + 1,
                        backoff_ms = backoff.as_millis() as u64,
                        error = %e,
                        "Web service call failed, retrying"
                    );
                    tokio::time::sleep(backoff).await;
                    attempts += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Read-only call, retried per the retry configuration.
    pub async fn read<T: DeserializeOwned>(&self, function: &str, params: WsParams) -> MoodleResult<T> {
        let value = self.call_with_retry(function, &params).await?;
        decode(function, value)
    }

    /// State-changing call, issued exactly once.
    pub async fn write<T: DeserializeOwned>(&self, function: &str, params: WsParams) -> MoodleResult<T> {
        let value = self.call_once(function, &params).await?;
        decode(function, value)
    }
}

fn decode<T: DeserializeOwned>(function: &str, value: Value) -> MoodleResult<T> {
    serde_json::from_value(value).map_err(|e| MoodleError::unexpected(function, e.to_string()))
}
