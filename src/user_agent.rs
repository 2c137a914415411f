//! Shared User-Agent string for feed and PDF requests.
//!
//! arXiv asks automated clients to identify themselves, so every request made by
//! this crate carries the same tool name and version.

/// Tool identifier used in the User-Agent header.
const TOOL_NAME: &str = "paper-extractor";

/// Default User-Agent for arXiv API and PDF requests.
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("{TOOL_NAME}/{version} (arxiv-research-tool)")
}
