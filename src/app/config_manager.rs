//! Merges CLI flags, the config file and built-in defaults.
//!
//! Precedence: CLI flag > config file > default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use paper_extractor_core::feed::{DEFAULT_API_URL, DEFAULT_REQUEST_DELAY};
use paper_extractor_core::query::DEFAULT_MAX_RESULTS;
use paper_extractor_core::{DateField, SortBy, SortOrder};

use crate::app_config::FileConfig;
use crate::cli::Cli;

/// Default base directory for topic folders.
pub(crate) const DEFAULT_DOWNLOAD_DIR: &str = "downloads";

/// Settings shared by every subcommand after merging all sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Settings {
    pub(crate) download_dir: PathBuf,
    pub(crate) max_results: u32,
    pub(crate) sort_by: SortBy,
    pub(crate) sort_order: SortOrder,
    pub(crate) date_field: DateField,
    pub(crate) request_delay: Duration,
    pub(crate) api_url: String,
    pub(crate) connect_timeout: Option<Duration>,
    pub(crate) read_timeout: Option<Duration>,
    pub(crate) quiet: bool,
}

impl Settings {
    /// Returns the subcommand's `-d` value, or the configured download dir.
    pub(crate) fn download_dir_or(&self, cli_value: Option<&Path>) -> PathBuf {
        cli_value.map_or_else(|| self.download_dir.clone(), Path::to_path_buf)
    }

    /// Returns the subcommand's `-n` value, or the configured cap.
    pub(crate) fn max_results_or(&self, cli_value: Option<u32>) -> u32 {
        cli_value.unwrap_or(self.max_results)
    }
}

pub(crate) fn resolve_settings(cli: &Cli, file: &FileConfig) -> Settings {
    let rate_limit_ms = cli.rate_limit.or(file.rate_limit);
    Settings {
        download_dir: file
            .download_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DOWNLOAD_DIR)),
        max_results: file.max_results.unwrap_or(DEFAULT_MAX_RESULTS),
        sort_by: file.sort_by.unwrap_or_default(),
        sort_order: file.sort_order.unwrap_or_default(),
        date_field: file.date_field.unwrap_or_default(),
        request_delay: rate_limit_ms.map_or(DEFAULT_REQUEST_DELAY, Duration::from_millis),
        api_url: file
            .api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        connect_timeout: file.connect_timeout_secs.map(Duration::from_secs),
        read_timeout: file.read_timeout_secs.map(Duration::from_secs),
        quiet: cli.quiet,
    }
}
