// Error taxonomy shared by the resolver, the aggregator and the tool layer

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The caller must fix the request (missing or malformed parameter).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A lookup by human-friendly name matched nothing.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The remote web service failed or answered with an error payload.
    #[error("{message}")]
    Upstream { message: String },

    /// A local fault that is neither the caller's nor the upstream's.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Errors the caller is expected to correct before retrying.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::InvalidArgument(_) | Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_displays_bare_message() {
        let err = Error::upstream("Invalid token - token not found");
        assert_eq!(err.to_string(), "Invalid token - token not found");
    }

    #[test]
    fn test_caller_errors() {
        assert!(Error::invalid_argument("courseName is required").is_caller_error());
        assert!(Error::not_found("course").is_caller_error());
        assert!(!Error::upstream("boom").is_caller_error());
        assert!(!Error::Internal("join".into()).is_caller_error());
    }
}
