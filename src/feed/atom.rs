//! Atom feed parsing for arXiv API responses.
//!
//! The parser walks the document with `quick_xml`'s event reader and matches on
//! local element names, so the `arxiv:` and `opensearch:` prefixes need no
//! namespace bookkeeping.

use chrono::{DateTime, Utc};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::debug;

use super::{FeedPage, FetchError};
use crate::paper::PaperRecord;
use crate::text::collapse_whitespace;

/// Entry ids under this path are error reports, not papers.
const API_ERROR_MARKER: &str = "/api/errors";

const PDF_MIME: &str = "application/pdf";

/// Fields collected for one `<entry>` before validation.
#[derive(Debug, Default)]
struct EntryDraft {
    id: Option<String>,
    title: Option<String>,
    summary: Option<String>,
    published: Option<String>,
    updated: Option<String>,
    authors: Vec<String>,
    pdf_url: Option<String>,
    categories: Vec<String>,
    primary_category: Option<String>,
    doi: Option<String>,
    comment: Option<String>,
}

impl EntryDraft {
    fn is_api_error(&self) -> bool {
        self.id
            .as_deref()
            .is_some_and(|id| id.contains(API_ERROR_MARKER))
    }

    fn error_message(&self) -> String {
        self.summary
            .as_deref()
            .or(self.title.as_deref())
            .map(collapse_whitespace)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "unspecified error".to_string())
    }

    fn add_link(&mut self, start: &BytesStart<'_>) {
        let mime = attr_value(start, b"type");
        let title = attr_value(start, b"title");
        let is_pdf = mime.as_deref() == Some(PDF_MIME) || title.as_deref() == Some("pdf");
        if is_pdf && self.pdf_url.is_none() {
            self.pdf_url = attr_value(start, b"href").filter(|h| !h.trim().is_empty());
        }
    }

    fn add_category(&mut self, start: &BytesStart<'_>) {
        if let Some(term) = attr_value(start, b"term") {
            let term = term.trim().to_string();
            if !term.is_empty() && !self.categories.contains(&term) {
                self.categories.push(term);
            }
        }
    }

    /// Validates the draft; `None` when a required field is missing.
    fn into_record(self) -> Option<PaperRecord> {
        let abs_url = self.id.map(|id| id.trim().to_string()).filter(|id| !id.is_empty())?;
        let title = self.title.map(|t| collapse_whitespace(&t)).filter(|t| !t.is_empty())?;
        let published = parse_timestamp(self.published.as_deref()?)?;
        let updated = self
            .updated
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or(published);

        let id = paper_id_from_abs_url(&abs_url);
        if id.is_empty() {
            return None;
        }
        let pdf_url = self
            .pdf_url
            .unwrap_or_else(|| abs_url.replacen("/abs/", "/pdf/", 1));

        Some(PaperRecord {
            id,
            title,
            authors: self.authors,
            summary: self.summary.map(|s| collapse_whitespace(&s)).unwrap_or_default(),
            published,
            updated,
            pdf_url,
            abs_url,
            categories: self.categories,
            primary_category: self.primary_category,
            doi: self.doi.map(|d| d.trim().to_string()).filter(|d| !d.is_empty()),
            comment: self
                .comment
                .map(|c| collapse_whitespace(&c))
                .filter(|c| !c.is_empty()),
        })
    }
}

/// Parses an arXiv Atom document.
///
/// Entries missing an id, a title or a valid published timestamp are skipped
/// and counted in [`FeedPage::skipped`].
///
/// # Errors
///
/// Returns [`FetchError::Parse`] when the body is not a well-formed feed and
/// [`FetchError::Api`] when arXiv answered with an error entry.
pub fn parse_feed(xml: &str) -> Result<FeedPage, FetchError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut page = FeedPage::default();
    let mut saw_feed = false;
    let mut draft: Option<EntryDraft> = None;
    let mut in_author = false;
    let mut text = String::new();

    loop {
        let event = reader.read_event().map_err(|e| {
            FetchError::parse(format!("XML error at byte {}: {e}", reader.error_position()))
        })?;

        match event {
            Event::Eof => break,
            Event::Start(start) => {
                text.clear();
                let name = start.local_name();
                if name.as_ref() == b"entry" {
                    if draft.is_none() {
                        draft = Some(EntryDraft::default());
                    }
                    continue;
                }
                match (name.as_ref(), draft.as_mut()) {
                    (b"feed", _) => saw_feed = true,
                    (b"author", Some(_)) => in_author = true,
                    (b"link", Some(entry)) => entry.add_link(&start),
                    (b"category", Some(entry)) => entry.add_category(&start),
                    (b"primary_category", Some(entry)) => {
                        entry.primary_category = attr_value(&start, b"term");
                    }
                    _ => {}
                }
            }
            Event::Empty(start) => match (start.local_name().as_ref(), draft.as_mut()) {
                (b"link", Some(entry)) => entry.add_link(&start),
                (b"category", Some(entry)) => entry.add_category(&start),
                (b"primary_category", Some(entry)) => {
                    entry.primary_category = attr_value(&start, b"term");
                }
                _ => {}
            },
            Event::Text(content) => {
                let unescaped = content
                    .unescape()
                    .map_err(|e| FetchError::parse(format!("bad text content: {e}")))?;
                text.push_str(&unescaped);
            }
            Event::CData(content) => {
                text.push_str(&String::from_utf8_lossy(&content));
            }
            Event::End(end) => {
                let value = std::mem::take(&mut text);
                let name = end.local_name();
                if name.as_ref() == b"entry" {
                    if let Some(entry) = draft.take() {
                        finish_entry(entry, &mut page)?;
                    }
                    in_author = false;
                    continue;
                }
                match (name.as_ref(), draft.as_mut()) {
                    (b"author", Some(_)) => in_author = false,
                    (b"name", Some(entry)) if in_author => {
                        let name = collapse_whitespace(&value);
                        if !name.is_empty() {
                            entry.authors.push(name);
                        }
                    }
                    (b"id", Some(entry)) => entry.id = Some(value),
                    (b"title", Some(entry)) => entry.title = Some(value),
                    (b"summary", Some(entry)) => entry.summary = Some(value),
                    (b"published", Some(entry)) => entry.published = Some(value),
                    (b"updated", Some(entry)) => entry.updated = Some(value),
                    (b"doi", Some(entry)) => entry.doi = Some(value),
                    (b"comment", Some(entry)) => entry.comment = Some(value),
                    (b"totalResults", None) => {
                        page.total_results = value.trim().parse().ok();
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }

    if !saw_feed {
        return Err(FetchError::parse("response has no <feed> element"));
    }

    debug!(
        papers = page.papers.len(),
        skipped = page.skipped,
        total_results = ?page.total_results,
        "parsed feed"
    );
    Ok(page)
}

fn finish_entry(entry: EntryDraft, page: &mut FeedPage) -> Result<(), FetchError> {
    if entry.is_api_error() {
        return Err(FetchError::api(entry.error_message()));
    }

    let raw_id = entry.id.clone();
    match entry.into_record() {
        Some(record) => page.papers.push(record),
        None => {
            page.skipped += 1;
            debug!(id = ?raw_id, "skipping entry with missing required fields");
        }
    }
    Ok(())
}

/// Extracts the versioned arXiv id from an abstract URL.
///
/// Everything after `/abs/` is kept so old-style ids (`hep-th/9901001v1`)
/// survive intact.
fn paper_id_from_abs_url(abs_url: &str) -> String {
    match abs_url.split_once("/abs/") {
        Some((_, id)) => id.trim_matches('/').to_string(),
        None => abs_url
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn attr_value(start: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    start
        .attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == key)
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.into_owned()))
}
