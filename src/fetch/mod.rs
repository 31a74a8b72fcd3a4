//! Page fetching and content type classification.
//!
//! [`Fetcher`] issues one GET per link with a browser-like `User-Agent`, a
//! bounded timeout and redirects followed. It never retries: the first
//! failure is final for that link and is reported as a [`FetchOutcome`].

mod classify;

pub use classify::classify;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::sync::Arc;

use crate::config::{FetchConfig, RECOMMENDED_TIMEOUT_SECS};
use crate::models::DocType;

/// Result of trying to retrieve one link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The page was retrieved; `content_type` is lower-cased and may be empty
    Success { body: String, content_type: String },
    Timeout,
    /// Non-success HTTP status
    HttpError(u16),
    /// Transport failure (DNS, connection, TLS, invalid URL, ...)
    NetworkError,
    /// The status line arrived but reading the body failed
    Unreadable,
    /// The result had no link, so nothing was requested
    NoLink,
}

impl FetchOutcome {
    /// Document type for this outcome: the classified content type on
    /// success, a failure marker otherwise.
    pub fn doc_type(&self) -> DocType {
        match self {
            FetchOutcome::Success { content_type, .. } => classify(content_type),
            FetchOutcome::Timeout => DocType::Timeout,
            FetchOutcome::HttpError(code) => DocType::HttpError(*code),
            FetchOutcome::NetworkError => DocType::RequestError,
            FetchOutcome::Unreadable => DocType::ProcessingError,
            FetchOutcome::NoLink => DocType::NoLink,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success { .. })
    }
}

/// Errors building the fetcher
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Failed to create HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// HTTP client for target pages
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Arc<Client>,
}

impl Fetcher {
    /// Create a fetcher from configuration
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        if config.timeout_secs == 0 {
            tracing::warn!(
                "Page timeout of 0s would fail every request, using {}s",
                config.timeout().as_secs()
            );
        } else if config.timeout_out_of_range() {
            tracing::warn!(
                "Page timeout of {}s is outside the recommended {}-{}s",
                config.timeout_secs,
                RECOMMENDED_TIMEOUT_SECS.start(),
                RECOMMENDED_TIMEOUT_SECS.end()
            );
        }

        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout())
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Retrieve a link and classify what happened.
    pub async fn fetch(&self, url: &str) -> FetchOutcome {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => return Self::failure(url, &e),
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("{} returned status {}", url, status);
            return FetchOutcome::HttpError(status.as_u16());
        }

        let header_type = content_type_of(response.headers());

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) if e.is_timeout() => {
                tracing::warn!("Timed out reading {}", url);
                return FetchOutcome::Timeout;
            }
            Err(e) => {
                tracing::warn!("Failed to read body of {}: {}", url, e);
                return FetchOutcome::Unreadable;
            }
        };

        let content_type = match header_type {
            Some(ctype) => ctype,
            None => self.probe_content_type(url).await.unwrap_or_default(),
        };

        FetchOutcome::Success { body, content_type }
    }

    /// Ask for the content type with a HEAD request.
    pub async fn probe_content_type(&self, url: &str) -> Option<String> {
        let response = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|e| tracing::debug!("HEAD {} failed: {}", url, e))
            .ok()?;

        if !response.status().is_success() {
            return None;
        }
        content_type_of(response.headers())
    }

    fn failure(url: &str, err: &reqwest::Error) -> FetchOutcome {
        if err.is_timeout() {
            tracing::warn!("Timed out fetching {}", url);
            FetchOutcome::Timeout
        } else if let Some(status) = err.status() {
            tracing::warn!("{} returned status {}", url, status);
            FetchOutcome::HttpError(status.as_u16())
        } else {
            tracing::warn!("Request to {} failed: {}", url, err);
            FetchOutcome::NetworkError
        }
    }
}

/// Lower-cased `Content-Type` header, if present and non-empty
fn content_type_of(headers: &reqwest::header::HeaderMap) -> Option<String> {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use std::time::Duration;

    fn fetcher(timeout_secs: u64) -> Fetcher {
        let config = FetchConfig {
            timeout_secs,
            ..Default::default()
        };
        Fetcher::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_html_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/article")
            .with_status(200)
            .with_header("content-type", "Text/HTML; charset=UTF-8")
            .with_body("<html><body>hi</body></html>")
            .expect(1)
            .create_async()
            .await;

        let outcome = fetcher(10).fetch(&format!("{}/article", server.url())).await;

        assert_eq!(
            outcome,
            FetchOutcome::Success {
                body: "<html><body>hi</body></html>".to_string(),
                content_type: "text/html; charset=utf-8".to_string(),
            }
        );
        assert_eq!(outcome.doc_type(), DocType::Html);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_sends_browser_user_agent() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/ua")
            .match_header("user-agent", mockito::Matcher::Regex("Mozilla/5.0".to_string()))
            .with_status(200)
            .with_header("content-type", "text/plain")
            .with_body("ok")
            .create_async()
            .await;

        let outcome = fetcher(10).fetch(&format!("{}/ua", server.url())).await;
        assert!(outcome.is_success());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_http_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .with_body("Not Found")
            .create_async()
            .await;

        let outcome = fetcher(10).fetch(&format!("{}/missing", server.url())).await;

        assert_eq!(outcome, FetchOutcome::HttpError(404));
        assert_eq!(outcome.doc_type().label(), "HTTP_ERROR_404");
    }

    #[tokio::test]
    async fn test_fetch_follows_redirects() {
        let mut server = Server::new_async().await;
        let target = format!("{}/new", server.url());
        let _redirect = server
            .mock("GET", "/old")
            .with_status(301)
            .with_header("location", &target)
            .create_async()
            .await;
        let _target = server
            .mock("GET", "/new")
            .with_status(200)
            .with_header("content-type", "application/pdf")
            .with_body("%PDF-1.4")
            .create_async()
            .await;

        let outcome = fetcher(10).fetch(&format!("{}/old", server.url())).await;
        assert_eq!(outcome.doc_type(), DocType::Pdf);
    }

    #[tokio::test]
    async fn test_missing_content_type_is_probed_with_head() {
        let mut server = Server::new_async().await;
        let _get = server
            .mock("GET", "/bare")
            .with_status(200)
            .with_body("data")
            .create_async()
            .await;
        let head = server
            .mock("HEAD", "/bare")
            .with_status(200)
            .with_header("content-type", "application/json")
            .expect(1)
            .create_async()
            .await;

        let outcome = fetcher(10).fetch(&format!("{}/bare", server.url())).await;

        assert_eq!(outcome.doc_type(), DocType::Json);
        head.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_network_error() {
        // Port 9 (discard) on localhost is expected to refuse connections
        let outcome = fetcher(10).fetch("http://127.0.0.1:9/").await;
        assert_eq!(outcome, FetchOutcome::NetworkError);
        assert_eq!(outcome.doc_type().label(), "REQUEST_ERROR");
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let outcome = fetcher(1).fetch(&format!("http://{}/slow", addr)).await;

        assert_eq!(outcome, FetchOutcome::Timeout);
        assert_eq!(outcome.doc_type().label(), "TIMEOUT");
        server.abort();
    }

    #[tokio::test]
    async fn test_invalid_url_is_network_error() {
        let outcome = fetcher(10).fetch("not a url").await;
        assert_eq!(outcome, FetchOutcome::NetworkError);
        assert_eq!(outcome.doc_type().label(), "REQUEST_ERROR");
    }

    #[test]
    fn test_outcome_doc_types() {
        assert_eq!(FetchOutcome::Timeout.doc_type().label(), "TIMEOUT");
        assert_eq!(FetchOutcome::Unreadable.doc_type().label(), "PROCESSING_ERROR");
        assert_eq!(FetchOutcome::NoLink.doc_type().label(), "NO_LINK");
        assert_eq!(
            FetchOutcome::Success {
                body: String::new(),
                content_type: String::new()
            }
            .doc_type(),
            DocType::Unknown
        );
    }
}
