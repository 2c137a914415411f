//! Normalized paper records parsed from the arXiv feed.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which timestamp of a paper a date-based operation looks at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateField {
    /// First submission time (`<published>`).
    #[default]
    Published,
    /// Time of the latest revision (`<updated>`).
    Updated,
}

impl DateField {
    /// Returns the stable string label for display output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Published => "published",
            Self::Updated => "updated",
        }
    }
}

/// One paper discovered through the arXiv API.
///
/// Records are built once by the feed parser and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaperRecord {
    /// arXiv identifier including version suffix, e.g. `1706.03762v7`.
    pub id: String,
    /// Title with whitespace runs collapsed.
    pub title: String,
    /// Author names in feed order.
    pub authors: Vec<String>,
    /// Abstract with whitespace runs collapsed.
    pub summary: String,
    /// First submission timestamp.
    pub published: DateTime<Utc>,
    /// Latest revision timestamp.
    pub updated: DateTime<Utc>,
    /// Direct PDF download URL.
    pub pdf_url: String,
    /// Abstract page URL (the Atom entry id).
    pub abs_url: String,
    /// Category codes in feed order, without duplicates.
    pub categories: Vec<String>,
    /// Primary category, when the feed reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_category: Option<String>,
    /// Journal DOI, when the authors registered one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    /// Author comment (page counts, venue notes).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl PaperRecord {
    /// Returns the timestamp selected by `field`.
    #[must_use]
    pub fn date(&self, field: DateField) -> DateTime<Utc> {
        match field {
            DateField::Published => self.published,
            DateField::Updated => self.updated,
        }
    }

    /// Formats the first `limit` authors, noting how many were left out.
    ///
    /// `["A", "B", "C", "D"]` with limit 2 renders as `A, B and 2 others`.
    #[must_use]
    pub fn author_line(&self, limit: usize) -> String {
        let shown = self.authors.iter().take(limit).cloned().collect::<Vec<_>>();
        let mut line = shown.join(", ");
        let hidden = self.authors.len().saturating_sub(limit);
        if hidden == 1 {
            line.push_str(" and 1 other");
        } else if hidden > 1 {
            line.push_str(&format!(" and {hidden} others"));
        }
        line
    }
}

impl fmt::Display for PaperRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let authors = self.authors.iter().take(3).cloned().collect::<Vec<_>>();
        write!(f, "{} ({}) - {}", self.title, self.id, authors.join(", "))
    }
}
