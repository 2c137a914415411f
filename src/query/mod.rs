//! Translation of search input into arXiv API queries.
//!
//! A [`SearchSpec`] captures what the user asked for; [`SearchSpec::build_query`]
//! turns it into the `search_query` / `id_list` value and
//! [`SearchSpec::feed_request`] into a complete page request. Nothing here
//! performs I/O.
//!
//! # Example
//!
//! ```
//! use paper_extractor_core::query::SearchSpec;
//!
//! let query = SearchSpec::keywords("machine learning")
//!     .with_categories(["cs.LG", "stat.ML"])
//!     .build_query()
//!     .unwrap();
//! assert_eq!(
//!     query.as_str(),
//!     r#"(ti:"machine learning" OR abs:"machine learning") AND (cat:cs.LG OR cat:stat.ML)"#
//! );
//! assert!(!query.is_direct_id());
//! ```

pub mod categories;
mod error;
mod identifier;

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

pub use categories::{CATEGORIES, Category, find_category, partition_categories};
pub use error::QueryError;
pub use identifier::normalize_arxiv_id;

use crate::feed::{FeedRequest, SortBy, SortOrder};
use crate::paper::DateField;
use crate::text::{collapse_whitespace, compile_static_regex};

/// Default page size.
pub const DEFAULT_MAX_RESULTS: u32 = 10;

/// Largest page size the arXiv API serves in one response.
pub const MAX_RESULTS_LIMIT: u32 = 2000;

/// Input that already uses arXiv field syntax is sent as-is.
static FIELD_SYNTAX_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r"(?i)(?:^|[\s(])(?:ti|au|abs|co|jr|cat|rn|id|all):"));

/// What a search looks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchMode {
    /// Free text matched against titles and abstracts.
    Keywords(String),
    /// Author name.
    Author(String),
    /// A single paper identifier in any accepted form.
    Identifier(String),
}

/// The query value sent to the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    query: String,
    is_direct_id: bool,
}

impl SearchQuery {
    /// A `search_query` value.
    #[must_use]
    pub fn search(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            is_direct_id: false,
        }
    }

    /// An `id_list` value.
    #[must_use]
    pub fn direct_id(id: impl Into<String>) -> Self {
        Self {
            query: id.into(),
            is_direct_id: true,
        }
    }

    /// Returns the query string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.query
    }

    /// Returns whether the value is an identifier for the `id_list` parameter.
    #[must_use]
    pub fn is_direct_id(&self) -> bool {
        self.is_direct_id
    }
}

/// Everything needed to request one page of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSpec {
    mode: SearchMode,
    max_results: u32,
    categories: Vec<String>,
    sort_by: SortBy,
    sort_order: SortOrder,
    start: u32,
    recent_days: Option<i64>,
    date_field: DateField,
}

impl SearchSpec {
    fn new(mode: SearchMode) -> Self {
        Self {
            mode,
            max_results: DEFAULT_MAX_RESULTS,
            categories: Vec::new(),
            sort_by: SortBy::default(),
            sort_order: SortOrder::default(),
            start: 0,
            recent_days: None,
            date_field: DateField::default(),
        }
    }

    /// Searches titles and abstracts for `text`.
    #[must_use]
    pub fn keywords(text: impl Into<String>) -> Self {
        Self::new(SearchMode::Keywords(text.into()))
    }

    /// Searches for papers by `name`.
    #[must_use]
    pub fn author(name: impl Into<String>) -> Self {
        Self::new(SearchMode::Author(name.into()))
    }

    /// Looks up one paper by identifier.
    #[must_use]
    pub fn identifier(id: impl Into<String>) -> Self {
        let mut spec = Self::new(SearchMode::Identifier(id.into()));
        spec.max_results = 1;
        spec
    }

    /// Sets the page size.
    #[must_use]
    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    /// Restricts results to the given category codes.
    #[must_use]
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the result ordering.
    #[must_use]
    pub fn with_sort(mut self, sort_by: SortBy, sort_order: SortOrder) -> Self {
        self.sort_by = sort_by;
        self.sort_order = sort_order;
        self
    }

    /// Sets the offset of the first result.
    #[must_use]
    pub fn with_start(mut self, start: u32) -> Self {
        self.start = start;
        self
    }

    /// Limits results to the last `days` days, judged by `field`.
    ///
    /// `days <= 0` disables the window.
    #[must_use]
    pub fn with_recent_days(mut self, days: i64, field: DateField) -> Self {
        self.recent_days = (days > 0).then_some(days);
        self.date_field = field;
        self
    }

    /// Returns the search mode.
    #[must_use]
    pub fn mode(&self) -> &SearchMode {
        &self.mode
    }

    /// Returns the page size.
    #[must_use]
    pub fn max_results(&self) -> u32 {
        self.max_results
    }

    /// Returns the recency window in days, if one is active.
    #[must_use]
    pub fn recent_days(&self) -> Option<i64> {
        self.recent_days
    }

    /// Returns the timestamp the recency window applies to.
    #[must_use]
    pub fn date_field(&self) -> DateField {
        self.date_field
    }

    /// Builds the API query value.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Empty`] for blank keywords or author names and
    /// [`QueryError::InvalidIdentifier`] when the identifier cannot be
    /// normalized.
    pub fn build_query(&self) -> Result<SearchQuery, QueryError> {
        let topic = match &self.mode {
            SearchMode::Identifier(raw) => {
                let id = normalize_arxiv_id(raw).ok_or_else(|| {
                    if raw.trim().is_empty() {
                        QueryError::empty("arXiv identifier")
                    } else {
                        QueryError::invalid_identifier(raw.trim())
                    }
                })?;
                return Ok(SearchQuery::direct_id(id));
            }
            SearchMode::Keywords(text) => keyword_clause(text)?,
            SearchMode::Author(name) => TopicClause::single(author_clause(name)?),
        };

        let known = categories::known_categories(&self.categories);
        let query = if known.is_empty() {
            topic.text
        } else {
            let clause = known
                .iter()
                .map(|code| format!("cat:{code}"))
                .collect::<Vec<_>>()
                .join(" OR ");
            format!("{} AND ({clause})", topic.grouped())
        };

        debug!(query = %query, "built search query");
        Ok(SearchQuery::search(query))
    }

    /// Builds the complete page request.
    ///
    /// When a recency window is active and results would be ordered by
    /// relevance, the request sorts by date instead so the newest papers are
    /// the ones that reach the client-side filter.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`build_query`](Self::build_query), and
    /// [`QueryError::InvalidMaxResults`] for a page size of 0 or above
    /// [`MAX_RESULTS_LIMIT`].
    pub fn feed_request(&self) -> Result<FeedRequest, QueryError> {
        if self.max_results == 0 || self.max_results > MAX_RESULTS_LIMIT {
            return Err(QueryError::invalid_max_results(
                self.max_results,
                MAX_RESULTS_LIMIT,
            ));
        }

        let query = self.build_query()?;

        let sort_by = match (self.recent_days, self.sort_by) {
            (Some(_), SortBy::Relevance) => match self.date_field {
                DateField::Published => SortBy::SubmittedDate,
                DateField::Updated => SortBy::LastUpdatedDate,
            },
            (_, sort_by) => sort_by,
        };

        Ok(FeedRequest {
            query,
            start: self.start,
            max_results: self.max_results,
            sort_by,
            sort_order: self.sort_order,
        })
    }
}

/// Topic part of a search query, before any category clause.
struct TopicClause {
    text: String,
    /// Whether `text` already binds tighter than `AND`.
    atomic: bool,
}

impl TopicClause {
    fn single(text: String) -> Self {
        Self { text, atomic: true }
    }

    /// User-written field syntax may contain `OR`, so it is parenthesized before
    /// a category clause is attached.
    fn grouped(&self) -> String {
        if self.atomic {
            self.text.clone()
        } else {
            format!("({})", self.text)
        }
    }
}

fn keyword_clause(text: &str) -> Result<TopicClause, QueryError> {
    let cleaned = collapse_whitespace(text);
    if cleaned.is_empty() {
        return Err(QueryError::empty("search query"));
    }

    if FIELD_SYNTAX_RE.is_match(&cleaned) {
        return Ok(TopicClause {
            text: cleaned,
            atomic: false,
        });
    }

    let term = quote_term(&cleaned).ok_or_else(|| QueryError::empty("search query"))?;
    Ok(TopicClause::single(format!("(ti:{term} OR abs:{term})")))
}

fn author_clause(name: &str) -> Result<String, QueryError> {
    let cleaned = collapse_whitespace(&name.replace('"', " "));
    if cleaned.is_empty() {
        return Err(QueryError::empty("author name"));
    }
    Ok(format!("au:\"{cleaned}\""))
}

/// Strips double quotes and wraps multi-word terms in quotes.
fn quote_term(text: &str) -> Option<String> {
    let cleaned = collapse_whitespace(&text.replace('"', " "));
    if cleaned.is_empty() {
        None
    } else if cleaned.contains(' ') {
        Some(format!("\"{cleaned}\""))
    } else {
        Some(cleaned)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_single_word_is_unquoted() {
        let query = SearchSpec::keywords("transformers").build_query().unwrap();
        assert_eq!(query.as_str(), "(ti:transformers OR abs:transformers)");
        assert!(!query.is_direct_id());
    }

    #[test]
    fn test_keywords_phrase_is_quoted_and_collapsed() {
        let query = SearchSpec::keywords("  machine \n learning ")
            .build_query()
            .unwrap();
        assert_eq!(
            query.as_str(),
            r#"(ti:"machine learning" OR abs:"machine learning")"#
        );
    }

    #[test]
    fn test_keywords_strip_embedded_quotes() {
        let query = SearchSpec::keywords(r#""graph" networks"#)
            .build_query()
            .unwrap();
        assert_eq!(
            query.as_str(),
            r#"(ti:"graph networks" OR abs:"graph networks")"#
        );
    }

    #[test]
    fn test_keywords_field_syntax_passes_through() {
        let query = SearchSpec::keywords("ti:attention AND au:vaswani")
            .build_query()
            .unwrap();
        assert_eq!(query.as_str(), "ti:attention AND au:vaswani");
    }

    #[test]
    fn test_keywords_colon_in_plain_text_is_not_field_syntax() {
        let query = SearchSpec::keywords("ratio:analysis").build_query().unwrap();
        assert_eq!(query.as_str(), "(ti:ratio:analysis OR abs:ratio:analysis)");
    }

    #[test]
    fn test_empty_keywords_rejected() {
        let err = SearchSpec::keywords("   ").build_query().unwrap_err();
        assert_eq!(err, QueryError::empty("search query"));
        let err = SearchSpec::keywords("\"\"").build_query().unwrap_err();
        assert_eq!(err, QueryError::empty("search query"));
    }

    #[test]
    fn test_author_query() {
        let query = SearchSpec::author("Geoffrey  Hinton").build_query().unwrap();
        assert_eq!(query.as_str(), r#"au:"Geoffrey Hinton""#);
    }

    #[test]
    fn test_empty_author_rejected() {
        let err = SearchSpec::author("").build_query().unwrap_err();
        assert_eq!(err, QueryError::empty("author name"));
    }

    #[test]
    fn test_categories_are_or_ed_and_joined_with_and() {
        let query = SearchSpec::keywords("diffusion")
            .with_categories(["cs.CV", "cs.LG"])
            .build_query()
            .unwrap();
        assert_eq!(
            query.as_str(),
            "(ti:diffusion OR abs:diffusion) AND (cat:cs.CV OR cat:cs.LG)"
        );
    }

    #[test]
    fn test_field_syntax_is_grouped_before_categories() {
        let query = SearchSpec::keywords("ti:attention OR au:vaswani")
            .with_categories(["cs.LG"])
            .build_query()
            .unwrap();
        assert_eq!(query.as_str(), "(ti:attention OR au:vaswani) AND (cat:cs.LG)");

        let query = SearchSpec::keywords("ti:attention OR au:vaswani")
            .build_query()
            .unwrap();
        assert_eq!(query.as_str(), "ti:attention OR au:vaswani");
    }

    #[test]
    fn test_unknown_categories_are_dropped() {
        let query = SearchSpec::keywords("diffusion")
            .with_categories(["nope.XX", "cs.cv"])
            .build_query()
            .unwrap();
        assert_eq!(query.as_str(), "(ti:diffusion OR abs:diffusion) AND (cat:cs.CV)");

        let query = SearchSpec::keywords("diffusion")
            .with_categories(["nope.XX"])
            .build_query()
            .unwrap();
        assert_eq!(query.as_str(), "(ti:diffusion OR abs:diffusion)");
    }

    #[test]
    fn test_identifier_is_direct_and_normalized() {
        let query = SearchSpec::identifier("https://arxiv.org/abs/1706.03762v7")
            .build_query()
            .unwrap();
        assert_eq!(query.as_str(), "1706.03762v7");
        assert!(query.is_direct_id());
    }

    #[test]
    fn test_identifier_ignores_categories() {
        let query = SearchSpec::identifier("1706.03762")
            .with_categories(["cs.LG"])
            .build_query()
            .unwrap();
        assert_eq!(query.as_str(), "1706.03762");
    }

    #[test]
    fn test_invalid_identifier_rejected() {
        let err = SearchSpec::identifier("attention paper")
            .build_query()
            .unwrap_err();
        assert_eq!(err, QueryError::invalid_identifier("attention paper"));

        let err = SearchSpec::identifier(" ").build_query().unwrap_err();
        assert_eq!(err, QueryError::empty("arXiv identifier"));
    }

    #[test]
    fn test_feed_request_carries_paging_and_sort() {
        let request = SearchSpec::keywords("quantum")
            .with_max_results(25)
            .with_start(50)
            .with_sort(SortBy::LastUpdatedDate, SortOrder::Ascending)
            .feed_request()
            .unwrap();
        assert_eq!(request.max_results, 25);
        assert_eq!(request.start, 50);
        assert_eq!(request.sort_by, SortBy::LastUpdatedDate);
        assert_eq!(request.sort_order, SortOrder::Ascending);
    }

    #[test]
    fn test_feed_request_identifier_asks_for_one_result() {
        let request = SearchSpec::identifier("1706.03762").feed_request().unwrap();
        assert_eq!(request.max_results, 1);
        assert!(request.query.is_direct_id());
    }

    #[test]
    fn test_feed_request_rejects_out_of_range_page_size() {
        let err = SearchSpec::keywords("x")
            .with_max_results(0)
            .feed_request()
            .unwrap_err();
        assert!(matches!(err, QueryError::InvalidMaxResults { value: 0, .. }));

        let err = SearchSpec::keywords("x")
            .with_max_results(MAX_RESULTS_LIMIT + 1)
            .feed_request()
            .unwrap_err();
        assert!(matches!(err, QueryError::InvalidMaxResults { .. }));
    }

    #[test]
    fn test_recent_window_switches_relevance_to_date_sort() {
        let request = SearchSpec::keywords("llm")
            .with_recent_days(7, DateField::Published)
            .feed_request()
            .unwrap();
        assert_eq!(request.sort_by, SortBy::SubmittedDate);

        let request = SearchSpec::keywords("llm")
            .with_recent_days(7, DateField::Updated)
            .feed_request()
            .unwrap();
        assert_eq!(request.sort_by, SortBy::LastUpdatedDate);
    }

    #[test]
    fn test_recent_window_keeps_explicit_sort() {
        let request = SearchSpec::keywords("llm")
            .with_sort(SortBy::LastUpdatedDate, SortOrder::Descending)
            .with_recent_days(7, DateField::Published)
            .feed_request()
            .unwrap();
        assert_eq!(request.sort_by, SortBy::LastUpdatedDate);
    }

    #[test]
    fn test_non_positive_recent_days_disables_window() {
        let spec = SearchSpec::keywords("llm").with_recent_days(0, DateField::Published);
        assert_eq!(spec.recent_days(), None);
        assert_eq!(spec.feed_request().unwrap().sort_by, SortBy::Relevance);
    }
}
