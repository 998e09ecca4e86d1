use serde::{Deserialize, Serialize};

/// Body of the explore search request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExploreRequest {
    /// Free-text place name to geocode
    pub location: String,
}

impl ExploreRequest {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

/// Error body the backend sends with a non-success status.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BackendErrorBody {
    pub error: String,
}

impl BackendErrorBody {
    /// Pull the `error` message out of a response body, if it is one.
    pub fn message_from(body: &str) -> Option<String> {
        serde_json::from_str::<BackendErrorBody>(body)
            .ok()
            .map(|b| b.error)
    }
}
