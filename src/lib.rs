//! Paper Extractor Core Library
//!
//! Searches the arXiv API and downloads paper PDFs into deterministically named
//! folders.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`query`] - Turns keywords, authors, categories and identifiers into API queries
//! - [`feed`] - HTTP client for the arXiv API and Atom feed parsing
//! - [`filter`] - Client-side recency window over parsed results
//! - [`naming`] - Filesystem-safe folder and file names
//! - [`download`] - Streaming PDF downloads with per-paper outcomes
//! - [`rate_limiter`] - Minimum-interval pacing owned by each client
//! - [`paper`] - The normalized paper record

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod download;
pub mod feed;
pub mod filter;
pub(crate) mod http;
pub mod naming;
pub mod paper;
pub mod query;
pub mod rate_limiter;
#[cfg(test)]
pub mod test_support;
pub(crate) mod text;
pub(crate) mod user_agent;

// Re-export commonly used types
pub use download::{
    DownloadError, DownloadOutcome, DownloadSummary, HttpClient, NoopObserver, PaperDownloader,
    ProgressObserver,
};
pub use feed::{FeedClient, FeedClientBuilder, FeedPage, FeedRequest, FetchError, SortBy, SortOrder};
pub use filter::filter_recent;
pub use naming::{FolderKind, custom_file_name, file_name, folder_name};
pub use paper::{DateField, PaperRecord};
pub use query::{
    CATEGORIES, Category, QueryError, SearchMode, SearchQuery, SearchSpec, normalize_arxiv_id,
};
pub use rate_limiter::RateLimiter;
