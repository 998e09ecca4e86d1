//! Mock configurations for integration tests.
//!
//! Re-exports the mocks from `virtuary::adapters::mock` and adds builders for
//! common stream shapes.

pub use virtuary::adapters::mock::{MockChunk, MockHttpClient, MockResponse};
pub use virtuary::traits::{HttpClient, HttpError};

use std::time::Duration;

use bytes::Bytes;

/// Builder for scripted explore responses.
#[derive(Default)]
pub struct MockStreamBuilder {
    chunks: Vec<MockChunk>,
}

#[allow(dead_code)]
impl MockStreamBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `text` as one chunk.
    pub fn data(mut self, text: &str) -> Self {
        self.chunks.push(MockChunk::Data(Bytes::from(text.to_string())));
        self
    }

    /// Pause before the next chunk.
    pub fn delay_ms(mut self, ms: u64) -> Self {
        self.chunks.push(MockChunk::Delay(Duration::from_millis(ms)));
        self
    }

    /// Fail the body with a connection error.
    pub fn fail(mut self, message: &str) -> Self {
        self.chunks
            .push(MockChunk::Error(HttpError::Io(message.to_string())));
        self
    }

    /// Never deliver anything again.
    pub fn stall(mut self) -> Self {
        self.chunks.push(MockChunk::Stall);
        self
    }

    pub fn build(self) -> MockResponse {
        MockResponse::Stream(self.chunks)
    }
}
