// src/unsplash/client.rs
// =============================================================================
// This module makes the actual HTTP requests to Unsplash.
//
// Two kinds of requests:
// - Search: GET <endpoint>?client_id=..&query=..&page=..&per_page=..
//   A non-success status is NOT an error here; it is reported back as
//   SearchOutcome::Failed so the crawl loop can skip the page.
// - Image download: GET <regular url>, returns the raw bytes.
//
// Both go through a single reqwest::Client with a request timeout.
//
// Rust concepts:
// - Traits: SearchApi describes what the crawl loop needs from the API
// - async-trait: async functions inside a trait
// - Serialize: turning a struct into URL query parameters
// =============================================================================

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use url::Url;

/// Search endpoint used when UNSPLASH_API_URL is not set
pub const DEFAULT_SEARCH_URL: &str = "https://api.unsplash.com/search/photos";

/// What came back from one search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// 2xx status, with the response body exactly as received
    Success { body: String },
    /// Any other status code
    Failed { status: u16 },
}

/// Everything the crawl loop needs from the remote API
///
/// Implemented by UnsplashClient for real runs and by in-memory fakes in tests.
#[async_trait]
pub trait SearchApi: Send + Sync {
    /// Requests one page of search results
    async fn search(&self, query: &str, page: u32, per_page: u32) -> Result<SearchOutcome>;

    /// Downloads the bytes behind an image URL
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>>;
}

// Query parameters of the search endpoint, in the order the API documents them
#[derive(Debug, Serialize)]
struct SearchParams<'a> {
    client_id: &'a str,
    query: &'a str,
    page: u32,
    per_page: u32,
}

/// reqwest-backed client for the Unsplash search API
pub struct UnsplashClient {
    client: Client,
    endpoint: Url,
    access_key: String,
}

impl UnsplashClient {
    /// Creates a client for `endpoint`, authenticated with `access_key`
    ///
    /// `timeout` applies to every request (search and image downloads).
    pub fn new(endpoint: Url, access_key: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint,
            access_key,
        })
    }

    // Builds (but does not send) the search request for one page
    fn search_request(&self, query: &str, page: u32, per_page: u32) -> Result<reqwest::Request> {
        let params = SearchParams {
            client_id: &self.access_key,
            query,
            page,
            per_page,
        };

        self.client
            .get(self.endpoint.clone())
            .query(&params)
            .build()
            .context("Failed to build search request")
    }
}

#[async_trait]
impl SearchApi for UnsplashClient {
    async fn search(&self, query: &str, page: u32, per_page: u32) -> Result<SearchOutcome> {
        let request = self.search_request(query, page, per_page)?;
        let response = self
            .client
            .execute(request)
            .await
            .with_context(|| format!("Search request for page {} failed", page))?;

        let status = response.status();
        if !status.is_success() {
            return Ok(SearchOutcome::Failed {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read search response for page {}", page))?;

        Ok(SearchOutcome::Success { body })
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Image request failed: {}", url))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "Failed to fetch image {}: HTTP {}",
                url,
                response.status()
            ));
        }

        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read image body: {}", url))?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn test_client() -> UnsplashClient {
        client_for(Url::parse(DEFAULT_SEARCH_URL).unwrap())
    }

    // Same client as production, minus any proxy from the environment
    fn client_for(endpoint: Url) -> UnsplashClient {
        let client = Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        UnsplashClient {
            client,
            endpoint,
            access_key: "test-key".to_string(),
        }
    }

    // Serves one canned HTTP response on a local port and returns its base URL
    async fn serve_once(status_line: &'static str, body: &'static str) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = vec![0u8; 8192];
            let _ = socket.read(&mut request).await;

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\
                 Connection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });

        Url::parse(&format!("http://{}/search/photos", addr)).unwrap()
    }

    #[tokio::test]
    async fn test_search_success_returns_body_verbatim() {
        let body = r#"{"total":1,"total_pages":1,"results":[]}"#;
        let client = client_for(serve_once("200 OK", body).await);

        let outcome = client.search("pattern", 0, 30).await.unwrap();

        assert_eq!(
            outcome,
            SearchOutcome::Success {
                body: body.to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_search_error_status_is_skippable_failure() {
        let endpoint = serve_once("500 Internal Server Error", r#"{"errors":["boom"]}"#).await;
        let client = client_for(endpoint);

        let outcome = client.search("pattern", 0, 30).await.unwrap();

        assert_eq!(outcome, SearchOutcome::Failed { status: 500 });
    }

    #[tokio::test]
    async fn test_search_rate_limited_is_skippable_failure() {
        let client = client_for(serve_once("403 Forbidden", "Rate Limit Exceeded").await);

        let outcome = client.search("pattern", 4, 30).await.unwrap();

        assert_eq!(outcome, SearchOutcome::Failed { status: 403 });
    }

    #[tokio::test]
    async fn test_search_transport_error_is_fatal() {
        // Bind, remember the port, then close it so the connection is refused
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = client_for(Url::parse(&format!("http://{}/search/photos", addr)).unwrap());

        let result = client.search("pattern", 0, 30).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fetch_image_returns_bytes() {
        let endpoint = serve_once("200 OK", "JPEGDATA").await;
        let client = test_client();

        let bytes = client.fetch_image(endpoint.as_str()).await.unwrap();

        assert_eq!(bytes, b"JPEGDATA".to_vec());
    }

    #[tokio::test]
    async fn test_fetch_image_error_status_is_error() {
        let endpoint = serve_once("404 Not Found", "missing").await;
        let client = test_client();

        let result = client.fetch_image(endpoint.as_str()).await;

        let err = result.unwrap_err();
        assert!(format!("{:#}", err).contains("404"));
    }

    #[test]
    fn test_search_request_carries_all_params() {
        let request = test_client().search_request("pattern", 3, 30).unwrap();
        let url = request.url();

        assert_eq!(url.host_str(), Some("api.unsplash.com"));
        assert_eq!(url.path(), "/search/photos");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("client_id".to_string(), "test-key".to_string()),
                ("query".to_string(), "pattern".to_string()),
                ("page".to_string(), "3".to_string()),
                ("per_page".to_string(), "30".to_string()),
            ]
        );
    }

    #[test]
    fn test_search_request_encodes_query_text() {
        let request = test_client().search_request("stone wall", 0, 10).unwrap();
        let query = request.url().query().unwrap_or("");
        assert!(query.contains("query=stone+wall"));
        assert!(query.contains("page=0"));
    }
}
