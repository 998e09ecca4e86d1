//! Unified error type for explore operations.

use thiserror::Error;

use super::category::ErrorCategory;
use super::stream::StreamError;
use crate::models::SpeciesError;
use crate::sse::FrameParseError;

/// Top-level error for the explore feature.
///
/// Wraps the domain-specific errors so callers can use a single
/// `ExploreResult<T>` and still ask for a category or user message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExploreError {
    /// Terminal stream failure.
    #[error(transparent)]
    Stream(#[from] StreamError),

    /// One data frame carried invalid JSON.
    #[error(transparent)]
    Frame(#[from] FrameParseError),

    /// A record did not have the species shape.
    #[error(transparent)]
    Species(#[from] SpeciesError),

    /// The search term was empty after trimming.
    #[error("location not provided")]
    EmptyLocation,

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ExploreError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ExploreError::Stream(e) => e.category(),
            ExploreError::Frame(_) | ExploreError::Species(_) => ErrorCategory::Client,
            ExploreError::EmptyLocation => ErrorCategory::User,
            ExploreError::Config(_) => ErrorCategory::Configuration,
        }
    }

    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ExploreError::Stream(e) => e.user_message(),
            ExploreError::Frame(_) => "Received invalid data from the server.".to_string(),
            ExploreError::Species(_) => "A result could not be displayed.".to_string(),
            ExploreError::EmptyLocation => "Please enter a location to explore.".to_string(),
            ExploreError::Config(msg) => format!("Configuration problem: {}", msg),
        }
    }
}

/// Type alias for Results using [`ExploreError`].
pub type ExploreResult<T> = Result<T, ExploreError>;
