//! HTTP client for the arXiv query API.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, instrument};
use url::Url;

use super::atom::parse_feed;
use super::{FeedPage, FeedRequest, FetchError, SortBy, SortOrder};
use crate::http::build_http_client;
use crate::paper::PaperRecord;
use crate::query::SearchQuery;
use crate::rate_limiter::RateLimiter;

/// Default arXiv query endpoint.
pub const DEFAULT_API_URL: &str = "https://export.arxiv.org/api/query";

/// Default minimum delay between two API requests (arXiv asks for 3 seconds).
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_secs(3);

/// Default HTTP connect timeout (30 seconds).
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (60 seconds).
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 60;

/// Client for the arXiv Atom API.
///
/// Holds its own [`RateLimiter`]; consecutive [`fetch`](Self::fetch) calls on
/// the same client are spaced by at least the configured request delay.
#[derive(Debug)]
pub struct FeedClient {
    client: Client,
    base_url: Url,
    rate_limiter: RateLimiter,
}

/// Builder for [`FeedClient`].
#[derive(Debug, Clone)]
pub struct FeedClientBuilder {
    base_url: String,
    request_delay: Duration,
    connect_timeout: Duration,
    read_timeout: Duration,
}

impl Default for FeedClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            request_delay: DEFAULT_REQUEST_DELAY,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            read_timeout: Duration::from_secs(DEFAULT_READ_TIMEOUT_SECS),
        }
    }
}

impl FeedClientBuilder {
    /// Overrides the API endpoint.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the minimum delay between requests. Zero disables pacing.
    #[must_use]
    pub fn request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    /// Sets the connect timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the read timeout for a whole request.
    #[must_use]
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidUrl`] for an unparsable or non-HTTP base
    /// URL and [`FetchError::Client`] when reqwest cannot build a client.
    pub fn build(self) -> Result<FeedClient, FetchError> {
        let base_url =
            Url::parse(&self.base_url).map_err(|_| FetchError::invalid_url(&self.base_url))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(FetchError::invalid_url(&self.base_url));
        }

        let client = build_http_client(self.connect_timeout, self.read_timeout)
            .map_err(FetchError::client)?;

        debug!(
            base_url = %base_url,
            delay_ms = self.request_delay.as_millis(),
            "feed client configured"
        );

        Ok(FeedClient {
            client,
            base_url,
            rate_limiter: RateLimiter::new(self.request_delay),
        })
    }
}

impl FeedClient {
    /// Creates a client with default endpoint, pacing and timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] when reqwest cannot build a client.
    pub fn new() -> Result<Self, FetchError> {
        Self::builder().build()
    }

    /// Returns a builder with default settings.
    #[must_use]
    pub fn builder() -> FeedClientBuilder {
        FeedClientBuilder::default()
    }

    /// Returns the configured API endpoint.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Returns the full request URL for `request`.
    #[must_use]
    pub fn request_url(&self, request: &FeedRequest) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in request.query_pairs() {
                pairs.append_pair(key, &value);
            }
        }
        url
    }

    /// Fetches and parses one page of results.
    ///
    /// Waits for the client's rate limiter first. There is no retry: any
    /// failure is returned to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] for network failures, timeouts, non-success
    /// statuses, malformed feeds and API error entries. A 4xx response that
    /// carries an error entry is reported as [`FetchError::Api`].
    #[instrument(
        skip(self, request),
        fields(query = %request.query.as_str(), start = request.start, max_results = request.max_results)
    )]
    pub async fn fetch(&mut self, request: &FeedRequest) -> Result<FeedPage, FetchError> {
        let url = self.request_url(request);
        self.rate_limiter.acquire().await;

        debug!(url = %url, "requesting feed");
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| FetchError::network(url.as_str(), e))?;

        let status = response.status();
        if status.is_client_error() {
            // arXiv explains rejected queries in an Atom error entry.
            let body = response.text().await.unwrap_or_default();
            return Err(match parse_feed(&body) {
                Err(api @ FetchError::Api { .. }) => api,
                _ => FetchError::http_status(url.as_str(), status.as_u16()),
            });
        }
        if !status.is_success() {
            return Err(FetchError::http_status(url.as_str(), status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::network(url.as_str(), e))?;

        let page = parse_feed(&body)?;
        info!(
            papers = page.papers.len(),
            skipped = page.skipped,
            total_results = ?page.total_results,
            "feed fetched"
        );
        Ok(page)
    }

    /// Looks up a single paper by an already-normalized identifier.
    ///
    /// Returns `Ok(None)` when arXiv has no matching entry.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`fetch`](Self::fetch).
    pub async fn get_by_id(&mut self, id: &str) -> Result<Option<PaperRecord>, FetchError> {
        let request = FeedRequest {
            query: SearchQuery::direct_id(id),
            start: 0,
            max_results: 1,
            sort_by: SortBy::Relevance,
            sort_order: SortOrder::Descending,
        };
        let page = self.fetch(&request).await?;
        Ok(page.papers.into_iter().next())
    }
}
