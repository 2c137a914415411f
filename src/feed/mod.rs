//! arXiv API access: request types, the HTTP client and the Atom parser.
//!
//! # Example
//!
//! ```no_run
//! use paper_extractor_core::feed::FeedClient;
//! use paper_extractor_core::query::SearchSpec;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut client = FeedClient::new()?;
//! let request = SearchSpec::keywords("machine learning")
//!     .with_max_results(5)
//!     .feed_request()?;
//! let page = client.fetch(&request).await?;
//! for paper in &page.papers {
//!     println!("{paper}");
//! }
//! # Ok(())
//! # }
//! ```

mod atom;
mod client;
mod error;

use serde::{Deserialize, Serialize};

pub use atom::parse_feed;
pub use client::{
    DEFAULT_API_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_READ_TIMEOUT_SECS,
    DEFAULT_REQUEST_DELAY, FeedClient, FeedClientBuilder,
};
pub use error::FetchError;

use crate::paper::PaperRecord;
use crate::query::SearchQuery;

/// Result ordering supported by the arXiv API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    /// Search relevance.
    #[default]
    Relevance,
    /// Time of the latest revision.
    LastUpdatedDate,
    /// Time of first submission.
    SubmittedDate,
}

impl SortBy {
    /// Returns the value of the `sortBy` query parameter.
    #[must_use]
    pub fn as_api_str(self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::LastUpdatedDate => "lastUpdatedDate",
            Self::SubmittedDate => "submittedDate",
        }
    }
}

/// Direction of the result ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Oldest / least relevant first.
    Ascending,
    /// Newest / most relevant first.
    #[default]
    Descending,
}

impl SortOrder {
    /// Returns the value of the `sortOrder` query parameter.
    #[must_use]
    pub fn as_api_str(self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }
}

/// One page request against the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRequest {
    /// Query string or identifier list.
    pub query: SearchQuery,
    /// Zero-based offset of the first result.
    pub start: u32,
    /// Page size.
    pub max_results: u32,
    /// Result ordering.
    pub sort_by: SortBy,
    /// Ordering direction.
    pub sort_order: SortOrder,
}

impl FeedRequest {
    /// Returns the query parameters in the order they are sent.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let key = if self.query.is_direct_id() {
            "id_list"
        } else {
            "search_query"
        };
        vec![
            (key, self.query.as_str().to_string()),
            ("start", self.start.to_string()),
            ("max_results", self.max_results.to_string()),
            ("sortBy", self.sort_by.as_api_str().to_string()),
            ("sortOrder", self.sort_order.as_api_str().to_string()),
        ]
    }
}

/// Parsed response of one feed request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedPage {
    /// Records in feed order.
    pub papers: Vec<PaperRecord>,
    /// `opensearch:totalResults`, when the feed reports it.
    pub total_results: Option<u64>,
    /// Number of entries dropped because required fields were missing.
    pub skipped: usize,
}
