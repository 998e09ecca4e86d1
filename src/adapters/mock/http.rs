//! Mock HTTP client for testing.
//!
//! Returns scripted chunk sequences or errors per URL and records every
//! request for later verification.

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::StreamExt;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::traits::{ByteStream, Headers, HttpClient, HttpError};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body
    pub body: String,
}

/// One scripted item of a mock body.
#[derive(Debug, Clone)]
pub enum MockChunk {
    /// Deliver these bytes
    Data(Bytes),
    /// Fail the body with this error
    Error(HttpError),
    /// Wait before delivering the next item
    Delay(Duration),
    /// Never deliver anything again
    Stall,
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a stream of scripted chunks
    Stream(Vec<MockChunk>),
    /// Fail the request before any body is returned
    Error(HttpError),
}

impl MockResponse {
    /// Convenience constructor for a body made of text chunks.
    pub fn chunks<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MockResponse::Stream(
            parts
                .into_iter()
                .map(|p| MockChunk::Data(Bytes::from(p.into())))
                .collect(),
        )
    }
}

/// Mock HTTP client for testing.
///
/// # Example
///
/// ```ignore
/// use virtuary::adapters::mock::{MockHttpClient, MockResponse};
///
/// let client = MockHttpClient::new();
/// client.set_response(
///     "http://localhost:5000/explore",
///     MockResponse::chunks(["data: {\"A\":1}\n\n"]),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct MockHttpClient {
    /// Configured responses by URL pattern
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// Responses served in order, before falling back to `responses`
    queued: Arc<Mutex<Vec<MockResponse>>>,
    /// Default response when no specific match
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            queued: Arc::new(Mutex::new(Vec::new())),
            default_response: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set a response for a specific URL.
    ///
    /// The URL is matched exactly, then by prefix.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(url.to_string(), response);
    }

    /// Queue a response for the next request, whatever its URL.
    ///
    /// Queued responses are consumed first-in first-out.
    pub fn push_response(&self, response: MockResponse) {
        self.queued.lock().unwrap().push(response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        let mut default = self.default_response.lock().unwrap();
        *default = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    fn record_request(&self, url: &str, headers: &Headers, body: &str) {
        let mut requests = self.requests.lock().unwrap();
        requests.push(RecordedRequest {
            url: url.to_string(),
            headers: headers.clone(),
            body: body.to_string(),
        });
    }

    fn get_response(&self, url: &str) -> Option<MockResponse> {
        {
            let mut queued = self.queued.lock().unwrap();
            if !queued.is_empty() {
                return Some(queued.remove(0));
            }
        }

        let responses = self.responses.lock().unwrap();

        // First try exact match
        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }

        // Then try prefix match (for URL patterns)
        for (pattern, response) in responses.iter() {
            if url.starts_with(pattern) {
                return Some(response.clone());
            }
        }

        // Finally use default
        let default = self.default_response.lock().unwrap();
        default.clone()
    }
}

impl Default for MockHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

fn scripted_body(chunks: Vec<MockChunk>) -> ByteStream {
    let stream = futures::stream::unfold(chunks.into_iter(), |mut items| async move {
        loop {
            match items.next()? {
                MockChunk::Data(bytes) => return Some((Ok(bytes), items)),
                MockChunk::Error(err) => return Some((Err(err), items)),
                MockChunk::Delay(duration) => tokio::time::sleep(duration).await,
                MockChunk::Stall => futures::future::pending::<()>().await,
            }
        }
    });
    stream.boxed()
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError> {
        self.record_request(url, headers, body);

        match self.get_response(url) {
            Some(MockResponse::Stream(chunks)) => Ok(scripted_body(chunks)),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn collect(mut stream: ByteStream) -> Vec<Result<Bytes, HttpError>> {
        let mut items = Vec::new();
        while let Some(item) = stream.next().await {
            items.push(item);
        }
        items
    }

    #[test]
    fn test_mock_http_client_new() {
        let client = MockHttpClient::new();
        assert!(client.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_post_stream_with_chunks() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://example.com/stream",
            MockResponse::chunks(["chunk1", "chunk2", "chunk3"]),
        );

        let stream = client
            .post_stream("https://example.com/stream", "{}", &Headers::new())
            .await
            .unwrap();
        let chunks = collect(stream).await;

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0], Ok(Bytes::from("chunk1")));
        assert_eq!(chunks[2], Ok(Bytes::from("chunk3")));

        let requests = client.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].body, "{}");
    }

    #[tokio::test]
    async fn test_request_error() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://example.com/error",
            MockResponse::Error(HttpError::ServerError {
                status: 500,
                message: "Internal Server Error".to_string(),
            }),
        );

        let result = client
            .post_stream("https://example.com/error", "{}", &Headers::new())
            .await;

        match result {
            Err(HttpError::ServerError { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal Server Error");
            }
            _ => panic!("Expected ServerError"),
        }
    }

    #[tokio::test]
    async fn test_mid_stream_error() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::Stream(vec![
            MockChunk::Data(Bytes::from("a")),
            MockChunk::Error(HttpError::Io("reset".to_string())),
        ]));

        let stream = client
            .post_stream("https://example.com/x", "{}", &Headers::new())
            .await
            .unwrap();
        let items = collect(stream).await;

        assert_eq!(items.len(), 2);
        assert_eq!(items[1], Err(HttpError::Io("reset".to_string())));
    }

    #[tokio::test]
    async fn test_queued_responses_served_in_order() {
        let client = MockHttpClient::new();
        client.push_response(MockResponse::chunks(["first"]));
        client.push_response(MockResponse::chunks(["second"]));
        client.set_default_response(MockResponse::chunks(["default"]));

        let mut bodies = Vec::new();
        for _ in 0..3 {
            let stream = client
                .post_stream("https://example.com/x", "{}", &Headers::new())
                .await
                .unwrap();
            bodies.push(collect(stream).await);
        }

        assert_eq!(bodies[0], vec![Ok(Bytes::from("first"))]);
        assert_eq!(bodies[1], vec![Ok(Bytes::from("second"))]);
        assert_eq!(bodies[2], vec![Ok(Bytes::from("default"))]);
    }

    #[tokio::test]
    async fn test_no_response_configured() {
        let client = MockHttpClient::new();

        let result = client
            .post_stream("https://example.com/missing", "{}", &Headers::new())
            .await;

        assert!(matches!(result, Err(HttpError::Other(_))));
    }

    #[tokio::test]
    async fn test_headers_recorded() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::chunks(Vec::<String>::new()));

        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "text/event-stream".to_string());

        client
            .post_stream("https://example.com/explore", "{}", &headers)
            .await
            .unwrap();

        let requests = client.get_requests();
        assert_eq!(
            requests[0].headers.get("Accept"),
            Some(&"text/event-stream".to_string())
        );

        client.clear_requests();
        assert!(client.get_requests().is_empty());
    }
}
