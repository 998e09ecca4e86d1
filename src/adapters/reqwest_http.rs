//! Reqwest-based HTTP client adapter.
//!
//! Production implementation of [`HttpClient`], streaming the response body
//! chunk by chunk as reqwest receives it.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;

use crate::traits::{ByteStream, Headers, HttpClient, HttpError};

/// HTTP client implementation using reqwest.
///
/// # Example
///
/// ```ignore
/// use virtuary::adapters::ReqwestHttpClient;
/// use virtuary::traits::HttpClient;
///
/// let client = ReqwestHttpClient::with_connect_timeout(Duration::from_secs(10))?;
/// let body = client.post_stream(url, r#"{"location":"Goa"}"#, &Headers::new()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
    /// Cap on reading an error response body
    read_timeout: Option<Duration>,
}

impl ReqwestHttpClient {
    /// Create a new ReqwestHttpClient with default settings.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            read_timeout: None,
        }
    }

    /// Create a client that gives up connecting after `timeout`.
    ///
    /// No overall request timeout is set: the body of a search streams for
    /// as long as the backend keeps producing species. Stalls are caught by
    /// the reader's per-chunk timeout instead.
    pub fn with_connect_timeout(timeout: Duration) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .build()
            .map_err(Self::convert_error)?;
        Ok(Self {
            client,
            read_timeout: None,
        })
    }

    /// Give up reading an error response body after `timeout`.
    ///
    /// The status is still reported, with an empty message.
    pub fn with_read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Read an error body, bounded by the read timeout.
    async fn error_body(&self, response: reqwest::Response) -> String {
        let text = response.text();
        let body = match self.read_timeout {
            Some(after) => match tokio::time::timeout(after, text).await {
                Ok(body) => body,
                Err(_) => {
                    tracing::warn!("Error body not received within {:?}", after);
                    return String::new();
                }
            },
            None => text.await,
        };
        body.unwrap_or_default()
    }

    /// Convert reqwest error to HttpError.
    fn convert_error(err: reqwest::Error) -> HttpError {
        if err.is_timeout() {
            HttpError::Timeout(err.to_string())
        } else if err.is_connect() {
            HttpError::ConnectionFailed(err.to_string())
        } else if err.is_builder() {
            HttpError::InvalidUrl(err.to_string())
        } else {
            HttpError::Other(err.to_string())
        }
    }

    /// Apply headers to a request builder.
    fn apply_headers(
        builder: reqwest::RequestBuilder,
        headers: &Headers,
    ) -> reqwest::RequestBuilder {
        let mut builder = builder;
        for (key, value) in headers {
            builder = builder.header(key, value);
        }
        builder
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError> {
        let builder = self.client.post(url).body(body.to_string());
        let builder = Self::apply_headers(builder, headers);

        let response = builder.send().await.map_err(Self::convert_error)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = self.error_body(response).await;
            return Err(HttpError::ServerError { status, message });
        }

        let stream = response.bytes_stream().map(|result| {
            result.map_err(|e| {
                if e.is_timeout() {
                    HttpError::Timeout(e.to_string())
                } else {
                    HttpError::Io(e.to_string())
                }
            })
        });

        Ok(Box::pin(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reqwest_http_client_new() {
        let client = ReqwestHttpClient::new().with_read_timeout(Some(Duration::from_secs(1)));
        assert_eq!(client.read_timeout, Some(Duration::from_secs(1)));
    }

    #[tokio::test]
    async fn test_stalled_error_body_is_cut_off() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        // Sends the status line and half of a declared body, then goes quiet.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            socket
                .write_all(b"HTTP/1.1 502 Bad Gateway\r\nContent-Length: 100\r\n\r\n{\"err")
                .await
                .unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let client = ReqwestHttpClient::new().with_read_timeout(Some(Duration::from_millis(200)));
        let url = format!("http://{}/explore", addr);
        let started = std::time::Instant::now();
        let err = client
            .post_stream(&url, "{}", &Headers::new())
            .await
            .err()
            .unwrap();

        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(
            err,
            HttpError::ServerError {
                status: 502,
                message: String::new()
            }
        );
        server.abort();
    }

    #[test]
    fn test_reqwest_http_client_with_connect_timeout() {
        let client = ReqwestHttpClient::with_connect_timeout(Duration::from_secs(5));
        assert!(client.is_ok());
    }

    #[test]
    fn test_apply_headers() {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "text/event-stream".to_string());

        let client = reqwest::Client::new();
        let builder = client.post("http://localhost:5000/explore");
        let request = ReqwestHttpClient::apply_headers(builder, &headers)
            .build()
            .unwrap();
        assert_eq!(
            request.headers().get("accept").unwrap(),
            "text/event-stream"
        );
    }

    #[tokio::test]
    async fn test_post_stream_invalid_url() {
        let client = ReqwestHttpClient::new();
        let result = client
            .post_stream("not-a-valid-url", "{}", &Headers::new())
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_post_stream_connection_refused() {
        let client = ReqwestHttpClient::new();
        // Use a port that's unlikely to be in use
        let result = client
            .post_stream("http://127.0.0.1:59999/explore", "{}", &Headers::new())
            .await;
        assert!(matches!(
            result,
            Err(HttpError::ConnectionFailed(_) | HttpError::Other(_))
        ));
    }
}
