//! Helpers for command tests that run against local mock servers.

use std::path::Path;
use std::time::Duration;

use paper_extractor_core::{DateField, SortBy, SortOrder};

use crate::app::config_manager::Settings;

#[path = "../test_support/socket_guard.rs"]
mod socket_guard;

pub(crate) use socket_guard::start_mock_server_or_skip;

/// Settings pointing at a mock API under `server_uri`, writing below `download_dir`.
pub(crate) fn settings_for(server_uri: &str, download_dir: &Path) -> Settings {
    Settings {
        download_dir: download_dir.to_path_buf(),
        max_results: 10,
        sort_by: SortBy::Relevance,
        sort_order: SortOrder::Descending,
        date_field: DateField::Published,
        request_delay: Duration::ZERO,
        api_url: format!("{server_uri}/api/query"),
        connect_timeout: Some(Duration::from_secs(5)),
        read_timeout: Some(Duration::from_secs(10)),
        quiet: true,
    }
}
