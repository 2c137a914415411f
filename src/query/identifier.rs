//! arXiv identifier normalization.
//!
//! Accepts the shapes users paste in practice and reduces them to the bare id
//! the API's `id_list` parameter expects.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::text::compile_static_regex;

const ARXIV_HOST: &str = "arxiv.org";
const DOI_HOST: &str = "doi.org";
const ARXIV_DOI_PREFIX: &str = "10.48550/";

static ARXIV_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_static_regex(r"(?i)^(?:\d{4}\.\d{4,5}|[a-z\-]+(?:\.[a-z]{2})?/\d{7})(?:v\d+)?$")
});

/// Normalizes user input into a bare arXiv identifier.
///
/// Recognized forms:
/// - new-style ids, with or without version: `1706.03762`, `2301.01234v2`
/// - old-style ids: `hep-th/9901001`, `math.GT/0309136v1`
/// - an `arXiv:` prefix on either of the above
/// - arxiv.org `/abs/` and `/pdf/` URLs (a trailing `.pdf` is dropped)
/// - arXiv DOIs, bare or as doi.org URLs: `10.48550/arXiv.1706.03762`
///
/// Returns `None` for anything else.
///
/// ```
/// use paper_extractor_core::query::normalize_arxiv_id;
///
/// assert_eq!(normalize_arxiv_id("arXiv:1706.03762").as_deref(), Some("1706.03762"));
/// assert_eq!(
///     normalize_arxiv_id("https://arxiv.org/pdf/1706.03762v7.pdf").as_deref(),
///     Some("1706.03762v7")
/// );
/// assert_eq!(normalize_arxiv_id("not an id"), None);
/// ```
#[must_use]
pub fn normalize_arxiv_id(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.contains("://") {
        return extract_from_url(trimmed);
    }

    if trimmed.to_ascii_lowercase().starts_with(ARXIV_DOI_PREFIX) {
        return extract_from_doi(trimmed);
    }

    let bare = strip_arxiv_prefix(trimmed);
    match_bare_id(bare)
}

fn strip_arxiv_prefix(value: &str) -> &str {
    let lower = value.to_ascii_lowercase();
    if lower.starts_with("arxiv:") {
        value["arxiv:".len()..].trim_start()
    } else {
        value
    }
}

fn extract_from_doi(input: &str) -> Option<String> {
    let trimmed = input.trim();
    let lower = trimmed.to_ascii_lowercase();
    if !lower.starts_with(ARXIV_DOI_PREFIX) {
        return None;
    }

    let suffix = &trimmed[ARXIV_DOI_PREFIX.len()..];
    let suffix_lower = suffix.to_ascii_lowercase();
    let id_candidate = if suffix_lower.starts_with("arxiv.") {
        &suffix["arxiv.".len()..]
    } else {
        suffix
    };

    match_bare_id(id_candidate)
}

fn extract_from_url(input: &str) -> Option<String> {
    let parsed = Url::parse(input).ok()?;
    let host = canonical_host(parsed.host_str()?);
    let path = parsed.path().trim();

    if host == ARXIV_HOST || host.ends_with(".arxiv.org") {
        if let Some(id) = path.strip_prefix("/abs/") {
            return match_bare_id(id);
        }
        if let Some(id) = path.strip_prefix("/pdf/") {
            return match_bare_id(id.strip_suffix(".pdf").unwrap_or(id));
        }
        return None;
    }

    if host == DOI_HOST || host == "dx.doi.org" {
        return extract_from_doi(path.trim_start_matches('/'));
    }

    None
}

fn match_bare_id(candidate: &str) -> Option<String> {
    let trimmed = candidate.trim().trim_matches('/');
    ARXIV_ID_RE
        .is_match(trimmed)
        .then(|| trimmed.to_string())
}

/// Normalizes a host string: trim, strip leading "www.", trailing '.', and lowercases.
fn canonical_host(host: &str) -> String {
    host.trim()
        .trim_start_matches("www.")
        .trim_end_matches('.')
        .to_ascii_lowercase()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_new_style_ids() {
        assert_eq!(normalize_arxiv_id("1706.03762").as_deref(), Some("1706.03762"));
        assert_eq!(
            normalize_arxiv_id("  2301.01234v2 ").as_deref(),
            Some("2301.01234v2")
        );
        assert_eq!(normalize_arxiv_id("0704.0001").as_deref(), Some("0704.0001"));
    }

    #[test]
    fn test_normalize_old_style_ids() {
        assert_eq!(
            normalize_arxiv_id("hep-th/9901001").as_deref(),
            Some("hep-th/9901001")
        );
        assert_eq!(
            normalize_arxiv_id("math.GT/0309136v1").as_deref(),
            Some("math.GT/0309136v1")
        );
    }

    #[test]
    fn test_normalize_strips_arxiv_prefix() {
        assert_eq!(
            normalize_arxiv_id("arXiv:1706.03762").as_deref(),
            Some("1706.03762")
        );
        assert_eq!(
            normalize_arxiv_id("ARXIV: 1706.03762v3").as_deref(),
            Some("1706.03762v3")
        );
    }

    #[test]
    fn test_normalize_abs_and_pdf_urls() {
        assert_eq!(
            normalize_arxiv_id("https://arxiv.org/abs/2301.01234v2").as_deref(),
            Some("2301.01234v2")
        );
        assert_eq!(
            normalize_arxiv_id("https://arxiv.org/pdf/2301.01234.pdf").as_deref(),
            Some("2301.01234")
        );
        assert_eq!(
            normalize_arxiv_id("http://export.arxiv.org/abs/hep-th/9901001v1").as_deref(),
            Some("hep-th/9901001v1")
        );
        assert_eq!(
            normalize_arxiv_id("https://www.arxiv.org/pdf/1706.03762").as_deref(),
            Some("1706.03762")
        );
    }

    #[test]
    fn test_normalize_arxiv_dois() {
        assert_eq!(
            normalize_arxiv_id("10.48550/arXiv.2301.01234").as_deref(),
            Some("2301.01234")
        );
        assert_eq!(
            normalize_arxiv_id("https://doi.org/10.48550/arXiv.1706.03762").as_deref(),
            Some("1706.03762")
        );
    }

    #[test]
    fn test_normalize_rejects_non_arxiv_input() {
        assert_eq!(normalize_arxiv_id(""), None);
        assert_eq!(normalize_arxiv_id("machine learning"), None);
        assert_eq!(normalize_arxiv_id("10.1109/5.771073"), None);
        assert_eq!(normalize_arxiv_id("https://example.com/abs/1706.03762"), None);
        assert_eq!(normalize_arxiv_id("https://arxiv.org/list/cs.LG/recent"), None);
        assert_eq!(normalize_arxiv_id("1706.037"), None);
    }
}
