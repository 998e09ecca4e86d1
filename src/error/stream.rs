//! Streaming-related error types.
//!
//! Terminal failures of an explore stream. Per-frame JSON failures are not
//! terminal and live in [`crate::sse::FrameParseError`].

use std::time::Duration;

use thiserror::Error;

use super::category::ErrorCategory;
use crate::traits::HttpError;

/// Terminal error for one explore stream.
///
/// Reported exactly once per search. Records emitted before the error stay
/// valid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StreamError {
    /// The backend answered with a non-success status.
    #[error("server returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// The connection failed before or during streaming.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// No response or chunk arrived within the configured read timeout.
    #[error("no data received for {after:?}")]
    Timeout { after: Duration },

    /// The stream was superseded or cancelled by the caller.
    #[error("stream cancelled")]
    Cancelled,

    /// `read` was called on a reader that already reached a terminal state.
    #[error("reader already finished")]
    ReaderFinished,
}

impl StreamError {
    /// Check if this error is a transport failure (status or connection).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            StreamError::Status { .. }
                | StreamError::Connection { .. }
                | StreamError::Timeout { .. }
        )
    }

    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            StreamError::Status { status, .. } => ErrorCategory::from_status(*status),
            StreamError::Connection { .. } | StreamError::Timeout { .. } => {
                ErrorCategory::Network
            }
            StreamError::Cancelled | StreamError::ReaderFinished => ErrorCategory::Client,
        }
    }

    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            StreamError::Status { status, message } if (400..500).contains(status) => {
                message.clone()
            }
            StreamError::Status { status, .. } => {
                format!("The species service failed (status {}). Please try again.", status)
            }
            StreamError::Connection { .. } => {
                "Could not reach the species service. Please try again.".to_string()
            }
            StreamError::Timeout { after } => {
                format!("The species service stopped responding after {:?}.", after)
            }
            StreamError::Cancelled => "The search was cancelled.".to_string(),
            StreamError::ReaderFinished => "This search has already finished.".to_string(),
        }
    }
}

impl From<HttpError> for StreamError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::ServerError { status, message } => StreamError::Status { status, message },
            HttpError::Timeout(message)
            | HttpError::ConnectionFailed(message)
            | HttpError::Io(message)
            | HttpError::InvalidUrl(message)
            | HttpError::Other(message) => StreamError::Connection { message },
        }
    }
}
