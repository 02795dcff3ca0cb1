//! Error types for feed calls.

use thiserror::Error;

/// Errors that can occur when talking to the monitoring backend.
///
/// Every feed call either returns a fully populated result or one of these.
/// An empty result is never an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeedError {
    /// A required field was missing or out of range; nothing was sent.
    #[error("Invalid input: {0}")]
    InputInvalid(String),

    /// The backend could not be reached.
    #[error("Connection error: {0}")]
    NetworkUnreachable(String),

    /// Connect, read or write exceeded its bound.
    #[error("Connection error: request timed out")]
    Timeout,

    /// The backend answered with a non-2xx status.
    #[error("Server error (Code: {status})")]
    Server {
        status: u16,
        /// The `error` field of the response body, when there was one.
        message: Option<String>,
    },

    /// The body did not contain what the endpoint promises.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A write was answered with `success: false`.
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// This feed does not offer the operation.
    #[error("Not supported: {0}")]
    Unsupported(String),
}

/// Coarse failure classes used by presentation.
///
/// Timeouts and unreachable hosts are the same class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InputInvalid,
    Unreachable,
    Server,
    Malformed,
    Rejected,
    Unsupported,
}

impl FeedError {
    /// Classify this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            FeedError::InputInvalid(_) => FailureKind::InputInvalid,
            FeedError::NetworkUnreachable(_) | FeedError::Timeout => FailureKind::Unreachable,
            FeedError::Server { .. } => FailureKind::Server,
            FeedError::MalformedResponse(_) => FailureKind::Malformed,
            FeedError::Rejected(_) => FailureKind::Rejected,
            FeedError::Unsupported(_) => FailureKind::Unsupported,
        }
    }

    /// The HTTP status, for server errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            FeedError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        FeedError::InputInvalid(message.into())
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FeedError::Timeout
        } else if err.is_decode() {
            FeedError::MalformedResponse(err.to_string())
        } else if let Some(status) = err.status() {
            FeedError::Server {
                status: status.as_u16(),
                message: None,
            }
        } else {
            FeedError::NetworkUnreachable(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::MalformedResponse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_classified_as_unreachable() {
        assert_eq!(FeedError::Timeout.kind(), FailureKind::Unreachable);
        assert_eq!(
            FeedError::NetworkUnreachable("refused".to_string()).kind(),
            FailureKind::Unreachable
        );
    }

    #[test]
    fn test_server_error_display() {
        let err = FeedError::Server {
            status: 503,
            message: Some("ML models not loaded".to_string()),
        };
        assert_eq!(err.to_string(), "Server error (Code: 503)");
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.kind(), FailureKind::Server);
    }

    #[test]
    fn test_json_error_is_malformed() {
        let err: FeedError = serde_json::from_str::<u32>("\"nope\"").unwrap_err().into();
        assert_eq!(err.kind(), FailureKind::Malformed);
    }
}
