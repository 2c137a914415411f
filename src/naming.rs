//! Folder and file naming for downloaded papers.
//!
//! Names are derived deterministically from the search input so re-running the
//! same command lands in the same folder. All outputs are safe single path
//! segments: no separators, no whitespace, never `.` or `..`.

/// Maximum characters in a folder name (prefix included).
pub const MAX_FOLDER_NAME_CHARS: usize = 50;

/// Maximum characters taken from a paper title when building a file name.
pub const MAX_TITLE_CHARS: usize = 100;

/// Name used when sanitization leaves nothing usable.
const EMPTY_NAME_FALLBACK: &str = "untitled";

const PDF_EXTENSION: &str = ".pdf";

/// What a folder name is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderKind {
    /// Free-text search topic, no prefix.
    Topic,
    /// Author search, `author_` prefix.
    Author,
    /// Single paper by identifier, `paper_` prefix.
    PaperId,
    /// Query entered in interactive mode, `interactive_` prefix.
    Interactive,
}

impl FolderKind {
    fn prefix(self) -> &'static str {
        match self {
            Self::Topic => "",
            Self::Author => "author_",
            Self::PaperId => "paper_",
            Self::Interactive => "interactive_",
        }
    }
}

/// Derives the folder name for a search.
///
/// Lower-cases, turns whitespace runs into `_`, strips anything outside
/// `[a-z0-9_.-]`, collapses repeated `_`, adds the kind prefix (unless already
/// present) and caps the result at [`MAX_FOLDER_NAME_CHARS`].
///
/// ```
/// use paper_extractor_core::naming::{FolderKind, folder_name};
///
/// assert_eq!(folder_name(FolderKind::Topic, "Machine Learning"), "machine_learning");
/// assert_eq!(folder_name(FolderKind::Author, "Geoffrey Hinton"), "author_geoffrey_hinton");
/// assert_eq!(folder_name(FolderKind::PaperId, "1706.03762"), "paper_1706.03762");
/// ```
#[must_use]
pub fn folder_name(kind: FolderKind, raw: &str) -> String {
    let body = sanitize_component(raw);
    let body = if body.is_empty() {
        EMPTY_NAME_FALLBACK.to_string()
    } else {
        body
    };

    let prefix = kind.prefix();
    let full = if body.starts_with(prefix) {
        body
    } else {
        format!("{prefix}{body}")
    };

    let truncated = truncate_chars(&full, MAX_FOLDER_NAME_CHARS);
    trim_edges(&truncated).to_string()
}

/// Derives the PDF file name for a paper: `<sanitized-title>_<id>.pdf`.
///
/// ```
/// use paper_extractor_core::naming::file_name;
///
/// assert_eq!(
///     file_name("Attention Is All You Need", "1706.03762v7"),
///     "attention_is_all_you_need_1706.03762v7.pdf"
/// );
/// ```
#[must_use]
pub fn file_name(title: &str, paper_id: &str) -> String {
    let title = trim_edges(&truncate_chars(&sanitize_component(title), MAX_TITLE_CHARS)).to_string();
    let id = sanitize_component(paper_id);

    let stem = match (title.is_empty(), id.is_empty()) {
        (false, false) => format!("{title}_{id}"),
        (false, true) => title,
        (true, false) => id,
        (true, true) => EMPTY_NAME_FALLBACK.to_string(),
    };
    format!("{stem}{PDF_EXTENSION}")
}

/// Builds a file name from a user-supplied name, preserving case.
///
/// Unsafe characters become `_` and `.pdf` is appended unless already present.
/// Returns `None` when nothing usable remains.
#[must_use]
pub fn custom_file_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    let stem = trimmed
        .strip_suffix(PDF_EXTENSION)
        .or_else(|| trimmed.strip_suffix(".PDF"))
        .unwrap_or(trimmed);

    let mut out = String::new();
    let mut prev_sep = false;
    for ch in stem.chars() {
        let mapped = match ch {
            c if c.is_alphanumeric() || matches!(c, '-' | '.') => c,
            _ => '_',
        };
        if mapped == '_' {
            if !prev_sep {
                out.push('_');
                prev_sep = true;
            }
        } else {
            out.push(mapped);
            prev_sep = false;
        }
    }

    let cleaned = trim_edges(&truncate_chars(&out, MAX_TITLE_CHARS)).to_string();
    (!cleaned.is_empty()).then(|| format!("{cleaned}{PDF_EXTENSION}"))
}

/// Sanitizes one name component to `[a-z0-9_.-]` with single underscores.
///
/// Whitespace and path separators become `_`; other characters are dropped.
fn sanitize_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_sep = false;
    for ch in raw.chars().flat_map(char::to_lowercase) {
        let mapped = match ch {
            c if c.is_whitespace() || matches!(c, '/' | '\\') => Some('_'),
            c if c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '.' | '-') => {
                Some(c)
            }
            _ => None,
        };
        match mapped {
            Some('_') => {
                if !prev_sep {
                    out.push('_');
                    prev_sep = true;
                }
            }
            Some(c) => {
                out.push(c);
                prev_sep = false;
            }
            None => {}
        }
    }
    trim_edges(&out).to_string()
}

/// Strips leading/trailing `_` and `.` so names are never hidden or `..`.
fn trim_edges(value: &str) -> &str {
    value.trim_matches(|c| c == '_' || c == '.')
}

fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}
