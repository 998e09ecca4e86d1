//! Explore configuration.
//!
//! Defaults, then environment, then command-line flags (applied by the
//! binary through the `with_*` builders).

use std::time::Duration;

use crate::error::{ExploreError, ExploreResult};

/// Default backend the web client talked to during development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
/// Path of the search endpoint.
pub const DEFAULT_EXPLORE_PATH: &str = "/explore";
/// Per-chunk read timeout.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(30);
/// TCP connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variable overriding the backend base URL.
pub const ENV_API_URL: &str = "VIRTUARY_API_URL";
/// Environment variable overriding the read timeout, in seconds (0 disables).
pub const ENV_READ_TIMEOUT_SECS: &str = "VIRTUARY_READ_TIMEOUT_SECS";

/// Configuration for explore searches.
///
/// # Example
///
/// ```ignore
/// use virtuary::startup::ExploreConfig;
///
/// let config = ExploreConfig::from_env()
///     .with_base_url("http://species.internal:5000")
///     .with_read_timeout(None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExploreConfig {
    /// Backend base URL, without trailing slash
    pub base_url: String,
    /// Path of the streaming search endpoint
    pub explore_path: String,
    /// Maximum wait for each body chunk; `None` waits forever
    pub read_timeout: Option<Duration>,
    /// Maximum wait for the TCP connection
    pub connect_timeout: Duration,
}

impl Default for ExploreConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            explore_path: DEFAULT_EXPLORE_PATH.to_string(),
            read_timeout: Some(DEFAULT_READ_TIMEOUT),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl ExploreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend base URL. A trailing slash is removed.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Set the search endpoint path.
    pub fn with_explore_path(mut self, path: impl Into<String>) -> Self {
        self.explore_path = path.into();
        self
    }

    /// Set the per-chunk read timeout.
    pub fn with_read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Build config from defaults overlaid with `VIRTUARY_*` variables.
    ///
    /// Unparsable timeouts are ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(ENV_API_URL) {
            if !url.trim().is_empty() {
                config = config.with_base_url(url.trim());
            }
        }

        if let Ok(raw) = std::env::var(ENV_READ_TIMEOUT_SECS) {
            match parse_timeout_secs(&raw) {
                Some(timeout) => config.read_timeout = timeout,
                None => tracing::warn!(
                    "Ignoring {}={:?}: expected a whole number of seconds",
                    ENV_READ_TIMEOUT_SECS,
                    raw
                ),
            }
        }

        config
    }

    /// Full URL of the search endpoint.
    pub fn explore_url(&self) -> String {
        if self.explore_path.starts_with('/') {
            format!("{}{}", self.base_url, self.explore_path)
        } else {
            format!("{}/{}", self.base_url, self.explore_path)
        }
    }

    /// Check the settings that would otherwise only fail at request time.
    pub fn validate(&self) -> ExploreResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ExploreError::Config(format!(
                "base URL must start with http:// or https://, got {:?}",
                self.base_url
            )));
        }
        if self.read_timeout == Some(Duration::ZERO) {
            return Err(ExploreError::Config(
                "read timeout must be positive; use None to disable it".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parse a timeout given in whole seconds. `0` means no timeout.
pub fn parse_timeout_secs(raw: &str) -> Option<Option<Duration>> {
    let secs: u64 = raw.trim().parse().ok()?;
    if secs == 0 {
        Some(None)
    } else {
        Some(Some(Duration::from_secs(secs)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExploreConfig::default();
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.explore_url(), "http://localhost:5000/explore");
        assert_eq!(config.read_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let config = ExploreConfig::new()
            .with_base_url("https://api.example.com/")
            .with_explore_path("v2/explore");
        assert_eq!(config.explore_url(), "https://api.example.com/v2/explore");
    }

    #[test]
    fn test_parse_timeout_secs() {
        assert_eq!(parse_timeout_secs("15"), Some(Some(Duration::from_secs(15))));
        assert_eq!(parse_timeout_secs(" 0 "), Some(None));
        assert_eq!(parse_timeout_secs("soon"), None);
        assert_eq!(parse_timeout_secs("-3"), None);
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let config = ExploreConfig::new().with_base_url("localhost:5000");
        assert!(matches!(config.validate(), Err(ExploreError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = ExploreConfig::new().with_read_timeout(Some(Duration::ZERO));
        assert!(config.validate().is_err());
    }
}
