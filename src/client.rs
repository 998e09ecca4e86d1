//! Explore API client.
//!
//! Issues the search request and hands back the live response body. Parsing
//! the body is the reader's job.

use std::sync::Arc;

use crate::error::StreamError;
use crate::models::{BackendErrorBody, ExploreRequest};
use crate::startup::ExploreConfig;
use crate::traits::{ByteStream, Headers, HttpClient, HttpError};

/// Client for the species search endpoint.
#[derive(Clone)]
pub struct ExploreClient {
    http: Arc<dyn HttpClient>,
    explore_url: String,
}

impl ExploreClient {
    pub fn new(http: Arc<dyn HttpClient>, config: &ExploreConfig) -> Self {
        Self {
            http,
            explore_url: config.explore_url(),
        }
    }

    pub fn explore_url(&self) -> &str {
        &self.explore_url
    }

    /// Start a search and return the streaming body.
    ///
    /// A non-success status becomes [`StreamError::Status`] whose message is
    /// the backend's `{"error": ...}` text when present.
    pub async fn open_stream(&self, location: &str) -> Result<ByteStream, StreamError> {
        let body = serde_json::to_string(&ExploreRequest::new(location))
            .map_err(|e| StreamError::Connection {
                message: format!("could not encode request: {}", e),
            })?;

        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "text/event-stream".to_string());

        tracing::debug!(url = %self.explore_url, location, "Opening explore stream");

        match self.http.post_stream(&self.explore_url, &body, &headers).await {
            Ok(stream) => Ok(stream),
            Err(HttpError::ServerError { status, message }) => {
                let message = BackendErrorBody::message_from(&message).unwrap_or_else(|| {
                    let trimmed = message.trim();
                    if trimmed.is_empty() {
                        "Unknown error".to_string()
                    } else {
                        trimmed.to_string()
                    }
                });
                Err(StreamError::Status { status, message })
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl std::fmt::Debug for ExploreClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExploreClient")
            .field("explore_url", &self.explore_url)
            .finish_non_exhaustive()
    }
}
