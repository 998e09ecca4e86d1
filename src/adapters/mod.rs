//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - Streaming HTTP client using reqwest
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockHttpClient`] - Scripted chunked responses

pub mod mock;
pub mod reqwest_http;

pub use mock::{MockChunk, MockHttpClient, MockResponse};
pub use reqwest_http::ReqwestHttpClient;
