//! HTTP client wrapper for streaming PDFs to disk.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Client;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};
use url::Url;

use super::constants::{CONNECT_TIMEOUT_SECS, PARTIAL_SUFFIX, READ_TIMEOUT_SECS};
use super::error::DownloadError;
use crate::http::build_http_client;

/// HTTP client for downloading files with streaming support.
///
/// Create once and reuse for every paper of a run to share the connection pool.
///
/// # Example
///
/// ```no_run
/// use paper_extractor_core::download::HttpClient;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new()?;
/// let bytes = client
///     .download_to_path(
///         "https://arxiv.org/pdf/1706.03762",
///         Path::new("./downloads/attention.pdf"),
///         |_, _| {},
///     )
///     .await?;
/// println!("wrote {bytes} bytes");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a client with default timeouts.
    ///
    /// Default configuration:
    /// - Connect timeout: 30 seconds
    /// - Read timeout: 5 minutes
    /// - Gzip decompression: enabled
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::Client`] when reqwest cannot build a client.
    pub fn new() -> Result<Self, DownloadError> {
        Self::with_timeouts(
            Duration::from_secs(CONNECT_TIMEOUT_SECS),
            Duration::from_secs(READ_TIMEOUT_SECS),
        )
    }

    /// Creates a client with explicit timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::Client`] when reqwest cannot build a client.
    pub fn with_timeouts(
        connect_timeout: Duration,
        read_timeout: Duration,
    ) -> Result<Self, DownloadError> {
        let client =
            build_http_client(connect_timeout, read_timeout).map_err(DownloadError::client)?;
        Ok(Self { client })
    }

    /// Streams `url` to `dest`, overwriting any existing file.
    ///
    /// Bytes go to `<dest>.part` first and are renamed into place only after
    /// the whole body arrived. `on_progress` receives the bytes written so far
    /// and the expected total when the server sent a Content-Length.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if:
    /// - The URL is invalid
    /// - The request fails (network error, timeout)
    /// - The server returns an error status (4xx, 5xx)
    /// - The body is empty
    /// - Writing or renaming the file fails
    #[instrument(skip(self, on_progress), fields(url = %url, path = %dest.display()))]
    pub async fn download_to_path<F>(
        &self,
        url: &str,
        dest: &Path,
        mut on_progress: F,
    ) -> Result<u64, DownloadError>
    where
        F: FnMut(u64, Option<u64>),
    {
        debug!("starting download");

        Url::parse(url).map_err(|_| DownloadError::invalid_url(url))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DownloadError::network(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::http_status(url, status.as_u16()));
        }

        let content_length = response.content_length();
        let part_path = partial_path(dest);

        let mut file = File::create(&part_path)
            .await
            .map_err(|e| DownloadError::io(part_path.clone(), e))?;

        let stream_result = stream_to_file(
            &mut file,
            response,
            url,
            &part_path,
            content_length,
            &mut on_progress,
        )
        .await;
        drop(file);

        let bytes_written = match stream_result {
            Ok(0) => {
                remove_partial(&part_path).await;
                return Err(DownloadError::empty_body(url));
            }
            Ok(bytes) => bytes,
            Err(error) => {
                remove_partial(&part_path).await;
                return Err(error);
            }
        };

        if let Err(e) = tokio::fs::rename(&part_path, dest).await {
            remove_partial(&part_path).await;
            return Err(DownloadError::io(dest.to_path_buf(), e));
        }

        info!(path = %dest.display(), bytes = bytes_written, "download complete");
        Ok(bytes_written)
    }
}

/// Returns `<dest>.part`.
fn partial_path(dest: &Path) -> PathBuf {
    let mut name = OsString::from(dest.as_os_str());
    name.push(PARTIAL_SUFFIX);
    PathBuf::from(name)
}

async fn remove_partial(path: &Path) {
    debug!(path = %path.display(), "cleaning up partial file after error");
    let _ = tokio::fs::remove_file(path).await;
}

/// Streams response body to file, returning bytes written.
///
/// This is extracted to enable cleanup on error in the caller.
async fn stream_to_file<F>(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
    content_length: Option<u64>,
    on_progress: &mut F,
) -> Result<u64, DownloadError>
where
    F: FnMut(u64, Option<u64>),
{
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::network(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

        bytes_written += chunk.len() as u64;
        on_progress(bytes_written, content_length);
    }

    // Ensure all data is flushed to disk
    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

    Ok(bytes_written)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::socket_guard::start_mock_server_or_skip;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    const PDF_BYTES: &[u8] = b"%PDF-1.4\n%mock pdf body\n%%EOF\n";

    #[test]
    fn test_partial_path_appends_suffix() {
        assert_eq!(
            partial_path(Path::new("/tmp/out/paper.pdf")),
            PathBuf::from("/tmp/out/paper.pdf.part")
        );
    }

    #[tokio::test]
    async fn test_download_writes_file_and_reports_progress() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        Mock::given(method("GET"))
            .and(path("/pdf/1706.03762v7"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(PDF_BYTES))
            .mount(&mock_server)
            .await;

        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("attention.pdf");
        let client = HttpClient::new().unwrap();

        let mut last_progress = 0;
        let bytes = client
            .download_to_path(
                &format!("{}/pdf/1706.03762v7", mock_server.uri()),
                &dest,
                |written, _| last_progress = written,
            )
            .await
            .unwrap();

        assert_eq!(bytes, PDF_BYTES.len() as u64);
        assert_eq!(last_progress, bytes);
        assert_eq!(std::fs::read(&dest).unwrap(), PDF_BYTES);
        assert!(!partial_path(&dest).exists());
    }

    #[tokio::test]
    async fn test_download_overwrites_existing_file() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(PDF_BYTES))
            .mount(&mock_server)
            .await;

        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("paper.pdf");
        std::fs::write(&dest, b"stale contents that are longer than the new body").unwrap();

        let client = HttpClient::new().unwrap();
        client
            .download_to_path(&format!("{}/pdf/x", mock_server.uri()), &dest, |_, _| {})
            .await
            .unwrap();

        assert_eq!(std::fs::read(&dest).unwrap(), PDF_BYTES);
    }

    #[tokio::test]
    async fn test_download_http_error_leaves_no_file() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("missing.pdf");
        let client = HttpClient::new().unwrap();

        let err = client
            .download_to_path(&format!("{}/pdf/x", mock_server.uri()), &dest, |_, _| {})
            .await
            .unwrap_err();

        assert!(matches!(err, DownloadError::HttpStatus { status: 404, .. }));
        assert!(!dest.exists());
        assert!(!partial_path(&dest).exists());
    }

    #[tokio::test]
    async fn test_download_empty_body_is_error() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("empty.pdf");
        let client = HttpClient::new().unwrap();

        let err = client
            .download_to_path(&format!("{}/pdf/x", mock_server.uri()), &dest, |_, _| {})
            .await
            .unwrap_err();

        assert!(matches!(err, DownloadError::EmptyBody { .. }));
        assert!(!dest.exists());
        assert!(!partial_path(&dest).exists());
    }

    #[tokio::test]
    async fn test_download_rejects_invalid_url() {
        let temp_dir = TempDir::new().unwrap();
        let client = HttpClient::new().unwrap();
        let err = client
            .download_to_path("not a url", &temp_dir.path().join("x.pdf"), |_, _| {})
            .await
            .unwrap_err();
        assert!(matches!(err, DownloadError::InvalidUrl { .. }));
    }
}
