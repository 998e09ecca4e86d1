//! Mock implementations for testing.
//!
//! Enables exercising the explore flow without network access.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with scripted chunked bodies

pub mod http;

pub use http::{MockChunk, MockHttpClient, MockResponse, RecordedRequest};
