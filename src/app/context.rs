//! Shared runtime context built after CLI/config handling.

use std::time::Duration;

use anyhow::{Context, Result};
use paper_extractor_core::download::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use paper_extractor_core::{FeedClient, HttpClient, PaperDownloader};

use crate::app::config_manager::Settings;
use crate::app::terminal::TerminalCaps;

/// Holds the clients and settings of one run so command handlers can use
/// `ctx.feed`, `ctx.downloader`, etc., instead of passing many arguments.
pub(crate) struct RunContext {
    pub(crate) settings: Settings,
    pub(crate) feed: FeedClient,
    pub(crate) downloader: PaperDownloader,
    pub(crate) show_progress: bool,
}

impl RunContext {
    pub(crate) fn new(settings: Settings) -> Result<Self> {
        let mut builder = FeedClient::builder()
            .base_url(settings.api_url.clone())
            .request_delay(settings.request_delay);
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.read_timeout {
            builder = builder.read_timeout(timeout);
        }
        let feed = builder.build().context("Failed to set up the arXiv API client")?;

        let http = HttpClient::with_timeouts(
            settings
                .connect_timeout
                .unwrap_or(Duration::from_secs(CONNECT_TIMEOUT_SECS)),
            settings
                .read_timeout
                .unwrap_or(Duration::from_secs(READ_TIMEOUT_SECS)),
        )
        .context("Failed to set up the PDF download client")?;
        let downloader = PaperDownloader::new(http, settings.request_delay);

        let show_progress = TerminalCaps::detect().progress_enabled(settings.quiet);

        Ok(Self {
            settings,
            feed,
            downloader,
            show_progress,
        })
    }
}
