//! Readwise API client
//!
//! Wraps the two versioned Readwise surfaces: the cursor-paginated Reader
//! API (v3) and the page-number-paginated Highlights API (v2). Every call
//! is a stateless pass-through; aggregation loops run strictly
//! sequentially and a mid-loop failure discards all pages fetched so far.

mod highlights;
mod reader;

pub use highlights::{BookQuery, HighlightQuery};
pub use reader::DocumentQuery;

use std::time::Duration;

use reqwest::header;
use serde::de::DeserializeOwned;

use crate::error::{ReadwiseError, Result};

/// Maximum page size the v2 API accepts; used when aggregating all pages
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Fixed per-request timeout. Applies per HTTP call, not per aggregated
/// operation.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default cap on pages fetched by one aggregation loop
pub const DEFAULT_MAX_PAGES: u32 = 500;

/// Client configuration
///
/// Passed explicitly into [`ReadwiseClient::new`]; there is no ambient
/// global. Base URLs are overridable so tests can point the client at a
/// local stub server.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Readwise API token, sent as `Authorization: Token <token>`
    pub token: String,
    /// Reader (v3) base URL
    pub reader_base_url: String,
    /// Highlights (v2) base URL
    pub highlights_base_url: String,
    pub timeout: Duration,
    /// Safety cap on pages fetched per aggregation loop
    pub max_pages: u32,
}

impl ClientConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            reader_base_url: "https://readwise.io/api/v3".to_string(),
            highlights_base_url: "https://readwise.io/api/v2".to_string(),
            timeout: REQUEST_TIMEOUT,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }
}

/// Client for the Readwise APIs (v2 and v3)
pub struct ReadwiseClient {
    http: reqwest::Client,
    token: String,
    reader_base_url: String,
    highlights_base_url: String,
    max_pages: u32,
}

impl ReadwiseClient {
    /// Build a client from explicit configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.token.is_empty() {
            return Err(ReadwiseError::Config(
                "Readwise API token must not be empty".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            token: config.token,
            reader_base_url: config.reader_base_url,
            highlights_base_url: config.highlights_base_url,
            max_pages: config.max_pages,
        })
    }

    pub(crate) fn reader_url(&self, path: &str) -> String {
        format!("{}{}", self.reader_base_url, path)
    }

    pub(crate) fn highlights_url(&self, path: &str) -> String {
        format!("{}{}", self.highlights_base_url, path)
    }

    pub(crate) fn max_pages(&self) -> u32 {
        self.max_pages
    }

    pub(crate) fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.http.get(url)
    }

    pub(crate) fn post(&self, url: &str) -> reqwest::RequestBuilder {
        self.http.post(url)
    }

    pub(crate) fn patch(&self, url: &str) -> reqwest::RequestBuilder {
        self.http.patch(url)
    }

    pub(crate) fn delete(&self, url: &str) -> reqwest::RequestBuilder {
        self.http.delete(url)
    }

    /// Execute a request and decode the JSON body
    ///
    /// Injects the auth header, maps non-2xx to [`ReadwiseError::Api`] with
    /// the status and response body, and transport failures to
    /// [`ReadwiseError::Transport`]. No retries.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T> {
        let response = self.send(request).await?;
        Ok(response.json().await?)
    }

    /// Execute a request, discarding the response body. DELETE returns 204
    /// with an empty body, which must not go through a JSON decode.
    pub(crate) async fn execute_empty(&self, request: reqwest::RequestBuilder) -> Result<()> {
        self.send(request).await?;
        Ok(())
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let response = request
            .header(header::AUTHORIZATION, format!("Token {}", self.token))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Readwise API error {}: {}", status, body);
            return Err(ReadwiseError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}
