//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - Streaming HTTP POST
//! - [`RecordSink`] - Receiver for parsed stream records

pub mod http;
pub mod sink;

pub use http::{ByteStream, Headers, HttpClient, HttpError};
pub use sink::{FnSink, RecordSink};
