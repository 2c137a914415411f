//! Constants for the download module (timeouts and temp files).

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (5 minutes for large PDFs).
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Suffix of the temporary file a PDF is streamed into before the final rename.
pub const PARTIAL_SUFFIX: &str = ".part";
