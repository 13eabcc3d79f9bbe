//! Error types for the Moodle client.

use serde::Deserialize;
use serde_json::Value;

/// Result type for client operations.
pub type MoodleResult<T> = Result<T, MoodleError>;

/// Errors raised while talking to the Moodle web service.
#[derive(Debug, thiserror::Error)]
pub enum MoodleError {
    /// Transport failure (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status.
    #[error("HTTP status {status}: {message}")]
    Status { status: u16, message: String },

    /// Moodle answered with an exception payload (usually with HTTP 200).
    #[error("{errorcode}: {message}")]
    Exception { errorcode: String, message: String },

    /// The body did not have the shape the function is documented to return.
    #[error("Unexpected response from {function}: {detail}")]
    UnexpectedResponse { function: String, detail: String },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Body was not JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl MoodleError {
    /// Worth retrying for an idempotent call.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// The message to show a caller: the upstream payload's own message when
    /// there was one, the transport error otherwise.
    pub fn upstream_message(&self) -> String {
        match self {
            Self::Status { message, .. } | Self::Exception { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Build an error from a non-success status and its body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ExceptionBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    format!("HTTP {}", status)
                } else {
                    body.trim().to_string()
                }
            });
        Self::Status { status, message }
    }

    /// Recognise Moodle's `{"exception": ..., "errorcode": ..., "message": ...}`
    /// payload. Returns `None` for any other body.
    pub fn from_exception_body(body: &Value) -> Option<Self> {
        let object = body.as_object()?;
        if !object.contains_key("exception") {
            return None;
        }
        let parsed: ExceptionBody = serde_json::from_value(body.clone()).unwrap_or_default();
        Some(Self::Exception {
            errorcode: parsed
                .errorcode
                .or(parsed.exception)
                .unwrap_or_else(|| "unknown".to_string()),
            message: parsed
                .message
                .unwrap_or_else(|| "Moodle reported an exception".to_string()),
        })
    }

    pub(crate) fn unexpected(function: &str, detail: impl Into<String>) -> Self {
        Self::UnexpectedResponse {
            function: function.to_string(),
            detail: detail.into(),
        }
    }
}

impl From<MoodleError> for moodle_mcp_core::Error {
    fn from(error: MoodleError) -> Self {
        moodle_mcp_core::Error::upstream(error.upstream_message())
    }
}

/// Moodle's exception payload.
#[derive(Debug, Default, Deserialize)]
struct ExceptionBody {
    #[serde(default)]
    exception: Option<String>,
    #[serde(default)]
    errorcode: Option<String>,
    #[serde(default)]
    message: Option<String>,
}
