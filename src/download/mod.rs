//! PDF downloads for parsed papers.
//!
//! [`PaperDownloader`] owns an [`HttpClient`] and its own [`RateLimiter`], writes
//! each paper to `directory/<file name>` and reports one [`DownloadOutcome`] per
//! paper. A failed paper never stops the batch.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::time::Duration;
//! use paper_extractor_core::download::{HttpClient, NoopObserver, PaperDownloader};
//! # use paper_extractor_core::PaperRecord;
//!
//! # async fn example(papers: Vec<PaperRecord>) -> Result<(), Box<dyn std::error::Error>> {
//! let mut downloader = PaperDownloader::new(HttpClient::new()?, Duration::from_secs(3));
//! let outcomes = downloader
//!     .download_all(&papers, Path::new("downloads/machine_learning"), &NoopObserver)
//!     .await;
//! for outcome in &outcomes {
//!     println!("{}: {}", outcome.paper_id, outcome.is_success());
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod constants;
mod error;
mod outcome;

use std::path::Path;
use std::time::Duration;

use tracing::{info, instrument, warn};

pub use client::HttpClient;
pub use constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
pub use error::DownloadError;
pub use outcome::{DownloadOutcome, DownloadSummary};

use crate::naming;
use crate::paper::PaperRecord;
use crate::rate_limiter::RateLimiter;

// Note: we do NOT define module-local Result aliases.
// Use `Result<T, DownloadError>` explicitly in function signatures.

/// Receives download lifecycle events, e.g. to drive progress bars.
///
/// Every method has an empty default so observers implement only what they
/// render.
pub trait ProgressObserver {
    /// A paper is about to be requested.
    fn on_start(&self, _paper: &PaperRecord, _path: &Path) {}

    /// More bytes of `paper_id` were written; `total` is the expected size
    /// when known.
    fn on_progress(&self, _paper_id: &str, _written: u64, _total: Option<u64>) {}

    /// A paper finished, successfully or not.
    fn on_finish(&self, _outcome: &DownloadOutcome) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {}

/// Downloads papers one at a time with pacing between requests.
#[derive(Debug)]
pub struct PaperDownloader {
    client: HttpClient,
    rate_limiter: RateLimiter,
}

impl PaperDownloader {
    /// Creates a downloader that waits at least `delay` between PDF requests.
    #[must_use]
    pub fn new(client: HttpClient, delay: Duration) -> Self {
        Self {
            client,
            rate_limiter: RateLimiter::new(delay),
        }
    }

    /// Downloads one paper into `directory`, creating it if missing.
    ///
    /// The file is named by [`naming::file_name`] unless `file_name` supplies a
    /// name (already sanitized by the caller). An existing file at the
    /// destination is overwritten. Failures are reported in the outcome.
    #[instrument(skip(self, paper, observer), fields(paper_id = %paper.id, dir = %directory.display()))]
    pub async fn download(
        &mut self,
        paper: &PaperRecord,
        directory: &Path,
        file_name: Option<&str>,
        observer: &dyn ProgressObserver,
    ) -> DownloadOutcome {
        let name = file_name.map_or_else(
            || naming::file_name(&paper.title, &paper.id),
            ToString::to_string,
        );
        let path = directory.join(name);
        observer.on_start(paper, &path);

        let result = self.fetch_to(paper, directory, &path, observer).await;
        match &result {
            Ok(bytes) => info!(path = %path.display(), bytes, "saved paper"),
            Err(error) => warn!(error = %error, "failed to download paper"),
        }

        let outcome = DownloadOutcome {
            paper_id: paper.id.clone(),
            title: paper.title.clone(),
            path,
            result,
        };
        observer.on_finish(&outcome);
        outcome
    }

    /// Downloads every paper into `directory`, in order.
    ///
    /// Always returns one outcome per input paper.
    pub async fn download_all(
        &mut self,
        papers: &[PaperRecord],
        directory: &Path,
        observer: &dyn ProgressObserver,
    ) -> Vec<DownloadOutcome> {
        let mut outcomes = Vec::with_capacity(papers.len());
        for paper in papers {
            outcomes.push(self.download(paper, directory, None, observer).await);
        }

        let summary = DownloadSummary::from_outcomes(&outcomes);
        info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            bytes = summary.total_bytes,
            "batch complete"
        );
        outcomes
    }

    async fn fetch_to(
        &mut self,
        paper: &PaperRecord,
        directory: &Path,
        path: &Path,
        observer: &dyn ProgressObserver,
    ) -> Result<u64, DownloadError> {
        if paper.pdf_url.trim().is_empty() {
            return Err(DownloadError::missing_pdf_url(&paper.id));
        }

        tokio::fs::create_dir_all(directory)
            .await
            .map_err(|e| DownloadError::directory(directory, e))?;

        self.rate_limiter.acquire().await;

        let paper_id = paper.id.as_str();
        self.client
            .download_to_path(&paper.pdf_url, path, |written, total| {
                observer.on_progress(paper_id, written, total);
            })
            .await
    }
}
