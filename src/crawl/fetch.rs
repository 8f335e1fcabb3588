// src/crawl/fetch.rs
// =============================================================================
// HTTP GET with a browser-like header set.
//
// One reqwest client is built per crawl and reused for every page and image,
// so connections are pooled. Redirects are followed by reqwest itself
// (its default policy); we never follow them by hand.
//
// Failure modes, all reported as CrawlError::Fetch:
// - network errors (DNS, refused connection, timeout, TLS)
// - non-2xx status codes
// - pages whose body is empty or whitespace only
// =============================================================================

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use url::Url;

use crate::config::CrawlConfig;
use crate::errors::CrawlError;

#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    // Builds the shared client from the configured headers and timeout
    pub fn new(config: &CrawlConfig) -> Result<Self, CrawlError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| CrawlError::Client(format!("header name '{name}': {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| CrawlError::Client(format!("header value for '{name}': {e}")))?;
            headers.insert(name, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| CrawlError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    // Fetches an HTML page; an empty body counts as a failure
    pub async fn fetch_page(&self, url: &Url) -> Result<Vec<u8>, CrawlError> {
        let body = self.fetch_bytes(url).await?;

        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(CrawlError::fetch(url.as_str(), "empty content"));
        }

        Ok(body)
    }

    // Fetches any resource and returns the raw body bytes
    pub async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>, CrawlError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| CrawlError::fetch(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::fetch(url.as_str(), format!("HTTP {status}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CrawlError::fetch(url.as_str(), e))?;

        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::GET, MockServer};

    fn fetcher() -> PageFetcher {
        PageFetcher::new(&CrawlConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_sends_browser_headers() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/")
                    .header("referer", "https://www.google.com/")
                    .header("accept-language", "en-US,en;q=0.5")
                    .header_exists("user-agent");
                then.status(200).body("<html><body><p>hi</p></body></html>");
            })
            .await;

        let url = Url::parse(&server.url("/")).unwrap();
        let body = fetcher().fetch_page(&url).await.unwrap();

        mock.assert_async().await;
        assert!(String::from_utf8_lossy(&body).contains("<p>hi</p>"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_fetch_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/missing");
                then.status(404);
            })
            .await;

        let url = Url::parse(&server.url("/missing")).unwrap();
        let err = fetcher().fetch_page(&url).await.unwrap_err();

        assert!(matches!(err, CrawlError::Fetch { .. }));
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_whitespace_body_is_fetch_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/blank");
                then.status(200).body("  \n\t ");
            })
            .await;

        let url = Url::parse(&server.url("/blank")).unwrap();
        let err = fetcher().fetch_page(&url).await.unwrap_err();

        assert!(err.to_string().contains("empty content"));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_fetch_error() {
        let url = Url::parse("http://127.0.0.1:1/").unwrap();
        let err = fetcher().fetch_bytes(&url).await.unwrap_err();

        assert!(matches!(err, CrawlError::Fetch { .. }));
    }

    #[test]
    fn test_invalid_header_is_client_error() {
        let mut config = CrawlConfig::default();
        config.headers.push(("Bad Header".to_string(), "x".to_string()));

        assert!(matches!(
            PageFetcher::new(&config),
            Err(CrawlError::Client(_))
        ));
    }
}
