//! Error types for query construction.
//!
//! These are raised before any network traffic, following the What/Why/Fix
//! message pattern used across the project.

use thiserror::Error;

/// Errors that can occur while turning user input into an arXiv query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The search text is empty or whitespace only.
    #[error("empty {what}\n  Suggestion: Provide at least one search term")]
    Empty {
        /// Which input was empty ("search query", "author name", ...).
        what: &'static str,
    },

    /// The input does not look like an arXiv identifier.
    #[error(
        "invalid arXiv identifier '{input}'\n  Suggestion: Use a form like 1706.03762, hep-th/9901001 or https://arxiv.org/abs/1706.03762"
    )]
    InvalidIdentifier {
        /// The rejected input.
        input: String,
    },

    /// The requested result count is outside the range the API accepts.
    #[error(
        "max results must be between 1 and {max}, got {value}\n  Suggestion: Use a smaller page size"
    )]
    InvalidMaxResults {
        /// The rejected value.
        value: u32,
        /// The largest accepted value.
        max: u32,
    },
}

impl QueryError {
    /// Creates an `Empty` error for the named input.
    #[must_use]
    pub fn empty(what: &'static str) -> Self {
        Self::Empty { what }
    }

    /// Creates an `InvalidIdentifier` error.
    #[must_use]
    pub fn invalid_identifier(input: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            input: input.into(),
        }
    }

    /// Creates an `InvalidMaxResults` error.
    #[must_use]
    pub fn invalid_max_results(value: u32, max: u32) -> Self {
        Self::InvalidMaxResults { value, max }
    }
}
