//! Per-paper download results and batch totals.

use std::path::PathBuf;

use super::error::DownloadError;

/// Result of downloading one paper.
#[derive(Debug)]
pub struct DownloadOutcome {
    /// arXiv identifier of the paper.
    pub paper_id: String,
    /// Paper title, for reporting.
    pub title: String,
    /// Destination the PDF was (or would have been) written to.
    pub path: PathBuf,
    /// Bytes written on success, the failure otherwise.
    pub result: Result<u64, DownloadError>,
}

impl DownloadOutcome {
    /// Returns whether the PDF was written.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Returns the number of bytes written, on success.
    #[must_use]
    pub fn bytes_written(&self) -> Option<u64> {
        self.result.as_ref().ok().copied()
    }

    /// Returns the failure, if any.
    #[must_use]
    pub fn error(&self) -> Option<&DownloadError> {
        self.result.as_ref().err()
    }
}

/// Totals over a batch of outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadSummary {
    /// Papers written successfully.
    pub succeeded: usize,
    /// Papers that failed.
    pub failed: usize,
    /// Bytes written across all successful papers.
    pub total_bytes: u64,
}

impl DownloadSummary {
    /// Tallies `outcomes`.
    #[must_use]
    pub fn from_outcomes(outcomes: &[DownloadOutcome]) -> Self {
        outcomes
            .iter()
            .fold(Self::default(), |mut summary, outcome| {
                match outcome.bytes_written() {
                    Some(bytes) => {
                        summary.succeeded += 1;
                        summary.total_bytes = summary.total_bytes.saturating_add(bytes);
                    }
                    None => summary.failed += 1,
                }
                summary
            })
    }

    /// Returns the number of papers attempted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}
