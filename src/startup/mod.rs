//! Startup configuration.
//!
//! - [`config`] - `ExploreConfig` with environment overlay and builders
//!
//! # Usage
//!
//! ```ignore
//! use virtuary::startup::ExploreConfig;
//!
//! let config = ExploreConfig::from_env();
//! config.validate()?;
//! ```

pub mod config;

pub use config::{parse_timeout_secs, ExploreConfig};
