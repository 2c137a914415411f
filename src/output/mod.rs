//! CLI output formatting and display helpers.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Result;
use paper_extractor_core::{CATEGORIES, DownloadOutcome, DownloadSummary, PaperRecord};

const RULE_WIDTH: usize = 50;
const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Returns terminal width from COLUMNS, or 80 if unset/invalid.
pub fn terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 20)
        .unwrap_or(80)
}

/// Truncates text to at most `width` chars, appending ellipsis if truncated.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    let text_len = text.chars().count();
    if text_len <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    if width == 1 {
        return "…".to_string();
    }

    let mut output: String = text.chars().take(width - 1).collect();
    output.push('…');
    output
}

/// Formats a byte count as megabytes with one decimal.
pub fn format_megabytes(bytes: u64) -> String {
    #[allow(clippy::cast_precision_loss)]
    let megabytes = bytes as f64 / BYTES_PER_MB;
    format!("{megabytes:.1} MB")
}

fn rule(ch: char) -> String {
    std::iter::repeat_n(ch, RULE_WIDTH).collect()
}

/// Full listing used by `search` and `search-by-author`.
pub fn render_paper_list(papers: &[PaperRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nFound {} papers:", papers.len());
    let _ = writeln!(out, "{}", rule('='));
    for (index, paper) in papers.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", index + 1, paper.title);
        let _ = writeln!(out, "   Authors: {}", paper.author_line(3));
        let _ = writeln!(out, "   arXiv ID: {}", paper.id);
        let _ = writeln!(out, "   Published: {}", paper.published.format("%Y-%m-%d"));
        let _ = writeln!(out, "   Categories: {}", paper.categories.join(", "));
        let _ = writeln!(out, "{}", rule('-'));
    }
    out
}

/// Compact numbered listing used by interactive mode.
pub fn render_selection_list(papers: &[PaperRecord]) -> String {
    let width = terminal_width();
    let mut out = String::new();
    let _ = writeln!(out, "\nFound {} papers:", papers.len());
    for (index, paper) in papers.iter().enumerate() {
        let number = format!("{}. ", index + 1);
        let title_width = width.saturating_sub(number.len());
        let _ = writeln!(
            out,
            "\n{number}{}",
            truncate_to_width(&paper.title, title_width)
        );
        let _ = writeln!(out, "   Authors: {}", paper.author_line(2));
        let _ = writeln!(
            out,
            "   ID: {} | Published: {}",
            paper.id,
            paper.published.format("%Y-%m-%d")
        );
    }
    out
}

/// Detail block for a single paper (`download-by-id`).
pub fn render_paper_details(paper: &PaperRecord) -> String {
    let mut out = String::from("\nFound paper:\n");
    let _ = writeln!(out, "   Title: {}", paper.title);
    let _ = writeln!(out, "   Authors: {}", paper.authors.join(", "));
    let _ = writeln!(out, "   Published: {}", paper.published.format("%Y-%m-%d"));
    let _ = writeln!(out, "   Categories: {}", paper.categories.join(", "));
    if let Some(doi) = paper.doi.as_deref() {
        let _ = writeln!(out, "   DOI: {doi}");
    }
    if let Some(comment) = paper.comment.as_deref() {
        let _ = writeln!(out, "   Comment: {comment}");
    }
    out
}

/// One status line per finished download.
pub fn render_outcome_line(index: usize, total: usize, outcome: &DownloadOutcome) -> String {
    match &outcome.result {
        Ok(bytes) => format!(
            "[{index}/{total}] Saved {} ({})",
            file_label(&outcome.path),
            format_megabytes(*bytes)
        ),
        Err(error) => format!("[{index}/{total}] Failed {}: {error}", outcome.paper_id),
    }
}

/// Summary printed after a batch of downloads into `folder`.
pub fn render_download_summary(outcomes: &[DownloadOutcome], folder: &Path) -> String {
    let summary = DownloadSummary::from_outcomes(outcomes);
    let mut out = String::new();

    if summary.succeeded == 0 {
        out.push_str("\nNo files were downloaded.\n");
    } else {
        let _ = writeln!(
            out,
            "\nSuccessfully downloaded {} papers:",
            summary.succeeded
        );
        let _ = writeln!(out, "{}", rule('='));
        for (index, outcome) in outcomes.iter().filter(|o| o.is_success()).enumerate() {
            let _ = writeln!(
                out,
                "{}. {} ({})",
                index + 1,
                file_label(&outcome.path),
                format_megabytes(outcome.bytes_written().unwrap_or(0))
            );
        }
    }

    if summary.failed > 0 {
        let _ = writeln!(out, "\nFailed to download {} papers:", summary.failed);
        for outcome in outcomes.iter().filter(|o| !o.is_success()) {
            if let Some(error) = outcome.error() {
                let _ = writeln!(out, "- {} ({}): {error}", outcome.paper_id, outcome.title);
            }
        }
    }

    if summary.succeeded > 0 {
        let _ = writeln!(
            out,
            "\nTotal: {} in {}",
            format_megabytes(summary.total_bytes),
            folder.display()
        );
    }
    out
}

fn file_label(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

/// Category catalog listing for `categories`.
pub fn render_categories() -> String {
    let mut out = String::from("Available arXiv categories:\n\n");
    for category in CATEGORIES {
        let _ = writeln!(out, "  {:<15} - {}", category.code, category.description);
    }
    out.push_str("\nUse these categories with the --categories/-c option\n");
    out.push_str("   Example: paper-extractor search \"machine learning\" -c cs.LG -c cs.AI\n");
    out
}

/// Pretty JSON array of papers for `--json`.
pub fn render_papers_json(papers: &[PaperRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(papers)?)
}
