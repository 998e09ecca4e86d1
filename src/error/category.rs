//! Error category classification for unified error handling.
//!
//! Categories drive retry decisions and which message the view layer shows.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection, DNS, timeout, dropped stream.
    /// Generally transient and retryable.
    Network,

    /// Backend-side errors (HTTP 5xx).
    /// Generally transient and retryable after delay.
    Server,

    /// Client-side errors (invalid state, unexpected payload shape).
    Client,

    /// User action required (empty location, unknown place).
    User,

    /// Invalid settings in the environment or on the command line.
    Configuration,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient
    /// and the operation can be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::User => "user",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check that the backend is reachable and try again.",
            ErrorCategory::Server => "The backend had a problem. Try again in a moment.",
            ErrorCategory::Client => "Try again, or use --sample to browse sample species.",
            ErrorCategory::User => "Check the location you entered.",
            ErrorCategory::Configuration => "Check VIRTUARY_* environment variables and flags.",
        }
    }

    /// Classify an HTTP status code.
    pub fn from_status(status: u16) -> Self {
        match status {
            500..=599 => ErrorCategory::Server,
            // The backend answers 400 for a missing location and 404 for an
            // address it cannot geocode.
            400 | 404 | 422 => ErrorCategory::User,
            _ => ErrorCategory::Client,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
