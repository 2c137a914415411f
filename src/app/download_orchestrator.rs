//! Fetch, list, confirm and download: the flow shared by the search commands.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use paper_extractor_core::{
    DownloadOutcome, DownloadSummary, PaperRecord, SearchSpec, filter_recent,
};
use tracing::debug;

use crate::ProcessExit;
use crate::app::context::RunContext;
use crate::app::progress_manager::{self, DownloadProgress};
use crate::app::{exit_handler, prompt};
use crate::output;

/// How a result listing should be handled.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ListingOptions {
    pub(crate) preview_only: bool,
    pub(crate) auto_download: bool,
    pub(crate) json: bool,
}

/// Runs `spec` against the API and applies its recency window.
pub(crate) async fn fetch_papers(ctx: &mut RunContext, spec: &SearchSpec) -> Result<Vec<PaperRecord>> {
    let request = spec.feed_request()?;

    let spinner = progress_manager::start_spinner(ctx.show_progress, "Querying arXiv...".to_string());
    let page = ctx.feed.fetch(&request).await;
    progress_manager::finish_spinner(spinner);
    let page = page?;

    if page.skipped > 0 {
        debug!(skipped = page.skipped, "entries without id, title or date were skipped");
    }

    let papers = match spec.recent_days() {
        Some(days) => filter_recent(page.papers, days, spec.date_field(), Utc::now()),
        None => page.papers,
    };
    Ok(papers)
}

/// Downloads `papers` into `folder`, printing one line per paper.
pub(crate) async fn download_batch(
    ctx: &mut RunContext,
    papers: &[PaperRecord],
    folder: &Path,
    print_lines: bool,
) -> Vec<DownloadOutcome> {
    let progress = DownloadProgress::new(papers.len(), ctx.show_progress, print_lines);
    ctx.downloader.download_all(papers, folder, &progress).await
}

/// Lists `papers`, asks for confirmation when needed, then downloads into `folder`.
///
/// Nothing is written to disk unless a download actually starts.
pub(crate) async fn present_and_download<R: BufRead, W: Write>(
    ctx: &mut RunContext,
    papers: &[PaperRecord],
    folder: &Path,
    options: ListingOptions,
    input: &mut R,
    out: &mut W,
) -> Result<ProcessExit> {
    if options.json {
        writeln!(out, "{}", output::render_papers_json(papers)?)?;
    } else {
        write!(out, "{}", output::render_paper_list(papers))?;
    }

    if options.preview_only {
        if !options.json {
            writeln!(out, "Preview mode - no papers downloaded.")?;
        }
        return Ok(ProcessExit::Success);
    }

    let proceed = if options.auto_download {
        true
    } else if options.json {
        false
    } else {
        prompt::confirm(
            input,
            out,
            &format!("\nDownload {} papers?", papers.len()),
            false,
        )?
    };
    if !proceed {
        if !options.json {
            writeln!(out, "Download cancelled.")?;
        }
        return Ok(ProcessExit::Success);
    }

    if !options.json {
        writeln!(out, "\nStarting downloads into {}...", folder.display())?;
    }
    out.flush()?;
    let outcomes = download_batch(ctx, papers, folder, !options.json).await;
    let summary = DownloadSummary::from_outcomes(&outcomes);
    if !options.json {
        write!(out, "{}", output::render_download_summary(&outcomes, folder))?;
    }

    Ok(exit_handler::determine_exit_outcome(
        summary.succeeded,
        summary.failed,
    ))
}
