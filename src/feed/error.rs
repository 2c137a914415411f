//! Error types for feed requests.

use thiserror::Error;

/// Errors that can occur while fetching or parsing an arXiv feed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error querying {url}: {source}")]
    Network {
        /// The request URL.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout querying {url}\n  Suggestion: arXiv may be busy; try again later")]
    Timeout {
        /// The request URL.
        url: String,
    },

    /// Non-success HTTP status.
    #[error("HTTP {status} querying {url}")]
    HttpStatus {
        /// The request URL.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The response body is not a well-formed Atom feed.
    #[error("malformed feed: {message}")]
    Parse {
        /// What went wrong.
        message: String,
    },

    /// arXiv rejected the query and explained why in an error entry.
    #[error("arXiv API error: {message}\n  Suggestion: Check the query syntax")]
    Api {
        /// The message from the error entry.
        message: String,
    },

    /// The configured API URL cannot be parsed.
    #[error("invalid API URL: {url}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {source}")]
    Client {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// Classifies a reqwest error as timeout or generic network failure.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        let url = url.into();
        if source.is_timeout() {
            Self::Timeout { url }
        } else {
            Self::Network { url, source }
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Creates an API error from an error entry's message.
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates a client construction error.
    pub fn client(source: reqwest::Error) -> Self {
        Self::Client { source }
    }
}
