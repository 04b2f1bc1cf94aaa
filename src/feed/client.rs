use futures::StreamExt;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

use crate::util::{validate_url, UrlValidationError};

const CONNECT_TIMEOUT: Duration = Duration::from_millis(15_000);
const READ_TIMEOUT: Duration = Duration::from_millis(10_000);
const MAX_RESPONSE_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// Errors from a single search request.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request URL was malformed; no connection was attempted
    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] UrlValidationError),
    /// Network-level error (DNS, connection, TLS, timeout, broken stream)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// Any status other than 200 OK
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Response body exceeded the 10MB size limit
    #[error("Response too large")]
    ResponseTooLarge,
    /// Body was not valid UTF-8
    #[error("Invalid UTF-8 in response")]
    InvalidUtf8,
}

/// Source of raw search responses.
///
/// [`HttpFeedClient`] is the real implementation; tests substitute canned
/// responses.
pub trait FeedClient {
    /// Performs one GET against `url` and returns the body text.
    ///
    /// Exactly one attempt is made. Retrying is left to the caller.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// reqwest-backed [`FeedClient`] with a 15s connect and 10s read timeout.
#[derive(Debug, Clone)]
pub struct HttpFeedClient {
    client: reqwest::Client,
}

impl HttpFeedClient {
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_timeouts(CONNECT_TIMEOUT, READ_TIMEOUT)
    }

    pub fn with_timeouts(connect: Duration, read: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect)
            .read_timeout(read)
            .user_agent(concat!("artfeed/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl FeedClient for HttpFeedClient {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let url = validate_url(url)?;
        let host = url.host_str().unwrap_or_default().to_string();

        // The URL carries the API key, so only the host is logged
        tracing::debug!(host = %host, "Requesting search results");

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status != reqwest::StatusCode::OK {
            tracing::warn!(host = %host, status = status.as_u16(), "Search request failed");
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let bytes = read_limited_bytes(response, MAX_RESPONSE_SIZE).await?;
        String::from_utf8(bytes).map_err(|_| FetchError::InvalidUtf8)
    }
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    // hyper already fails a body shorter than its Content-Length
    if let Some(len) = response.content_length() {
        if len > limit as u64 {
            return Err(FetchError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const BODY: &str = r#"{"response":{"results":[]}}"#;

    #[test]
    fn test_default_timeouts() {
        assert_eq!(CONNECT_TIMEOUT, Duration::from_millis(15_000));
        assert_eq!(READ_TIMEOUT, Duration::from_millis(10_000));
    }

    #[tokio::test]
    async fn test_fetch_success_returns_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "art"))
            .respond_with(ResponseTemplate::new(200).set_body_string(BODY))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = HttpFeedClient::new().unwrap();
        let body = client
            .fetch(&format!("{}/search?q=art", mock_server.uri()))
            .await
            .unwrap();
        assert_eq!(body, BODY);
    }

    #[tokio::test]
    async fn test_fetch_404_is_http_status() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
            .mount(&mock_server)
            .await;

        let client = HttpFeedClient::new().unwrap();
        match client.fetch(&mock_server.uri()).await {
            Err(FetchError::HttpStatus(404)) => {}
            other => panic!("Expected HttpStatus(404), got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_non_200_success_status_is_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;

        let client = HttpFeedClient::new().unwrap();
        assert!(matches!(
            client.fetch(&mock_server.uri()).await,
            Err(FetchError::HttpStatus(204))
        ));
    }

    #[tokio::test]
    async fn test_fetch_500_is_not_retried() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = HttpFeedClient::new().unwrap();
        assert!(matches!(
            client.fetch(&mock_server.uri()).await,
            Err(FetchError::HttpStatus(500))
        ));
    }

    #[tokio::test]
    async fn test_fetch_invalid_url_makes_no_request() {
        let client = HttpFeedClient::new().unwrap();
        assert!(matches!(
            client.fetch("not a url").await,
            Err(FetchError::InvalidUrl(_))
        ));
        assert!(matches!(
            client.fetch("file:///etc/passwd").await,
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_network_error() {
        // Grab a free port, then close it so nothing is listening
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = HttpFeedClient::new().unwrap();
        assert!(matches!(
            client.fetch(&format!("http://127.0.0.1:{}/search", port)).await,
            Err(FetchError::Network(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_slow_server_times_out() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(BODY)
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&mock_server)
            .await;

        let client =
            HttpFeedClient::with_timeouts(Duration::from_secs(1), Duration::from_millis(100))
                .unwrap();
        assert!(matches!(
            client.fetch(&mock_server.uri()).await,
            Err(FetchError::Network(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_invalid_utf8() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xff, 0xfe, 0x00]))
            .mount(&mock_server)
            .await;

        let client = HttpFeedClient::new().unwrap();
        assert!(matches!(
            client.fetch(&mock_server.uri()).await,
            Err(FetchError::InvalidUtf8)
        ));
    }

    #[tokio::test]
    async fn test_fetch_oversized_body_rejected() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![b' '; MAX_RESPONSE_SIZE + 1]))
            .mount(&mock_server)
            .await;

        let client = HttpFeedClient::new().unwrap();
        assert!(matches!(
            client.fetch(&mock_server.uri()).await,
            Err(FetchError::ResponseTooLarge)
        ));
    }
}
