//! Blocking HTTP access for release lookups.

use anyhow::Context;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::time::Duration;

use super::UpstreamError;

/// Fetches release pages and JSON endpoints over HTTP/HTTPS.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a fetcher with the default 30-second timeout.
    pub fn new() -> anyhow::Result<Self> {
        Self::with_timeout(Self::DEFAULT_TIMEOUT)
    }

    /// Create a fetcher with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("toolprobe/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, timeout })
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// GET `url` and return the body of a 200 response.
    pub fn get_text(&self, url: &str) -> Result<String, UpstreamError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| UpstreamError::network(url, &e))?;

        if response.status() != StatusCode::OK {
            tracing::debug!("{} answered {}", url, response.status());
            return Err(UpstreamError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        response.text().map_err(|e| UpstreamError::network(url, &e))
    }

    /// GET `url` and decode a 200 response as JSON.
    pub fn get_json(&self, url: &str) -> Result<serde_json::Value, UpstreamError> {
        let body = self.get_text(url)?;
        serde_json::from_str(&body).map_err(|e| UpstreamError::Parse {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn default_timeout_is_30_seconds() {
        let fetcher = HttpFetcher::new().unwrap();
        assert_eq!(fetcher.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn custom_timeout() {
        let fetcher = HttpFetcher::with_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(fetcher.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn get_text_returns_body_on_200() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/page");
            then.status(200).body("hello");
        });

        let fetcher = HttpFetcher::new().unwrap();
        assert_eq!(fetcher.get_text(&server.url("/page")).unwrap(), "hello");
        mock.assert();
    }

    #[test]
    fn get_text_rejects_other_statuses() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/moved");
            then.status(204);
        });

        let url = server.url("/moved");
        let err = HttpFetcher::new().unwrap().get_text(&url).unwrap_err();
        assert_eq!(err, UpstreamError::Status { url, status: 204 });
    }

    #[test]
    fn get_json_reports_invalid_json() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/index.json");
            then.status(200).body("<html>");
        });

        let err = HttpFetcher::new()
            .unwrap()
            .get_json(&server.url("/index.json"))
            .unwrap_err();
        assert!(matches!(err, UpstreamError::Parse { .. }));
    }

    #[test]
    fn refused_connection_is_network_error() {
        let err = HttpFetcher::with_timeout(Duration::from_secs(5))
            .unwrap()
            .get_text("http://127.0.0.1:1/")
            .unwrap_err();
        assert!(matches!(err, UpstreamError::Network { .. }));
        assert!(err.to_string().starts_with("Error fetching data:"));
    }
}
