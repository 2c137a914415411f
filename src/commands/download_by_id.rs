//! Single-paper download by arXiv identifier.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use paper_extractor_core::{FolderKind, SearchSpec, custom_file_name, folder_name};
use tracing::warn;

use crate::ProcessExit;
use crate::app::context::RunContext;
use crate::app::progress_manager::DownloadProgress;
use crate::app::prompt;
use crate::cli::DownloadByIdArgs;
use crate::output;

pub(crate) async fn run_download_by_id_command(
    ctx: &mut RunContext,
    args: &DownloadByIdArgs,
) -> Result<ProcessExit> {
    download_by_id(ctx, args, &mut io::stdin().lock(), &mut io::stdout()).await
}

async fn download_by_id<R: BufRead, W: Write>(
    ctx: &mut RunContext,
    args: &DownloadByIdArgs,
    input: &mut R,
    out: &mut W,
) -> Result<ProcessExit> {
    let query = SearchSpec::identifier(args.arxiv_id.clone()).build_query()?;
    let id = query.as_str();

    writeln!(out, "Looking up arXiv paper: {id}")?;
    let Some(paper) = ctx.feed.get_by_id(id).await? else {
        writeln!(out, "Paper with ID '{id}' not found.")?;
        return Ok(ProcessExit::Success);
    };
    write!(out, "{}", output::render_paper_details(&paper))?;

    if !args.yes && !prompt::confirm(input, out, "\nDownload this paper?", false)? {
        writeln!(out, "Download cancelled.")?;
        return Ok(ProcessExit::Success);
    }

    let file_name = args.filename.as_deref().and_then(|raw| {
        let name = custom_file_name(raw);
        if name.is_none() {
            warn!(filename = raw, "custom file name is empty after sanitizing; using the default name");
        }
        name
    });
    let folder = ctx
        .settings
        .download_dir_or(args.download_dir.as_deref())
        .join(folder_name(FolderKind::PaperId, id));

    writeln!(out, "\nStarting download...")?;
    out.flush()?;
    let progress = DownloadProgress::new(1, ctx.show_progress, false);
    let outcome = ctx
        .downloader
        .download(&paper, &folder, file_name.as_deref(), &progress)
        .await;

    match &outcome.result {
        Ok(bytes) => {
            writeln!(
                out,
                "Downloaded successfully: {} ({})",
                outcome.path.display(),
                output::format_megabytes(*bytes)
            )?;
            Ok(ProcessExit::Success)
        }
        Err(error) => {
            writeln!(out, "Download failed: {error}")?;
            Ok(ProcessExit::Failure)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::app::config_manager::Settings;
    use crate::app::test_support::{settings_for, start_mock_server_or_skip};
    use std::io::Cursor;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, ResponseTemplate};

    fn args(id: &str, yes: bool) -> DownloadByIdArgs {
        DownloadByIdArgs {
            arxiv_id: id.to_string(),
            download_dir: None,
            filename: None,
            yes,
        }
    }

    fn feed_with_pdf(pdf_url: &str) -> String {
        format!(
            r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <id>http://arxiv.org/abs/1706.03762v7</id>
    <published>2017-06-12T17:57:34Z</published>
    <updated>2023-08-02T00:41:18Z</updated>
    <title>Attention Is All You Need</title>
    <summary>Transformers.</summary>
    <author><name>Ashish Vaswani</name></author>
    <link title="pdf" href="{pdf_url}" rel="related" type="application/pdf"/>
    <category term="cs.CL"/>
  </entry>
</feed>"#
        )
    }

    async fn run(settings: Settings, args: &DownloadByIdArgs, answers: &str) -> (ProcessExit, String) {
        let mut ctx = RunContext::new(settings).unwrap();
        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let mut out = Vec::new();
        let exit = download_by_id(&mut ctx, args, &mut input, &mut out).await.unwrap();
        (exit, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_download_by_id_with_yes_writes_paper_folder() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        Mock::given(method("GET"))
            .and(path("/api/query"))
            .and(query_param("id_list", "1706.03762"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(feed_with_pdf(&format!("{}/pdf/1706.03762v7", mock_server.uri()))),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/pdf/1706.03762v7"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.4".to_vec()))
            .mount(&mock_server)
            .await;

        let temp_dir = TempDir::new().unwrap();
        let (exit, out) = run(
            settings_for(&mock_server.uri(), temp_dir.path()),
            &args("arXiv:1706.03762", true),
            "",
        )
        .await;

        assert_eq!(exit, ProcessExit::Success, "{out}");
        let expected = temp_dir
            .path()
            .join("paper_1706.03762")
            .join("attention_is_all_you_need_1706.03762v7.pdf");
        assert_eq!(std::fs::read(&expected).unwrap(), b"%PDF-1.4");
        assert!(out.contains("Downloaded successfully"));
    }

    #[tokio::test]
    async fn test_download_by_id_declined_creates_nothing() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        Mock::given(method("GET"))
            .and(path("/api/query"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(feed_with_pdf("https://arxiv.org/pdf/1706.03762v7")),
            )
            .mount(&mock_server)
            .await;

        let temp_dir = TempDir::new().unwrap();
        let (exit, out) = run(
            settings_for(&mock_server.uri(), temp_dir.path()),
            &args("1706.03762", false),
            "n\n",
        )
        .await;

        assert_eq!(exit, ProcessExit::Success);
        assert!(out.contains("Download cancelled."));
        assert!(!temp_dir.path().join("paper_1706.03762").exists());
    }

    #[tokio::test]
    async fn test_download_by_id_custom_file_name() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        Mock::given(method("GET"))
            .and(path("/api/query"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(feed_with_pdf(&format!("{}/pdf/1706.03762v7", mock_server.uri()))),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/pdf/1706.03762v7"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF".to_vec()))
            .mount(&mock_server)
            .await;

        let temp_dir = TempDir::new().unwrap();
        let mut request = args("1706.03762", true);
        request.filename = Some("Transformer Paper".to_string());
        let (exit, _) = run(settings_for(&mock_server.uri(), temp_dir.path()), &request, "").await;

        assert_eq!(exit, ProcessExit::Success);
        assert!(
            temp_dir
                .path()
                .join("paper_1706.03762")
                .join("Transformer_Paper.pdf")
                .exists()
        );
    }

    #[tokio::test]
    async fn test_download_by_id_not_found_is_success() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        Mock::given(method("GET"))
            .and(path("/api/query"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<feed xmlns="http://www.w3.org/2005/Atom"><title>empty</title></feed>"#,
            ))
            .mount(&mock_server)
            .await;

        let temp_dir = TempDir::new().unwrap();
        let (exit, out) = run(
            settings_for(&mock_server.uri(), temp_dir.path()),
            &args("2401.99999", true),
            "",
        )
        .await;

        assert_eq!(exit, ProcessExit::Success);
        assert!(out.contains("Paper with ID '2401.99999' not found."));
    }

    #[tokio::test]
    async fn test_download_by_id_pdf_failure_is_failure_exit() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        Mock::given(method("GET"))
            .and(path("/api/query"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(feed_with_pdf(&format!("{}/pdf/1706.03762v7", mock_server.uri()))),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/pdf/1706.03762v7"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&mock_server)
            .await;

        let temp_dir = TempDir::new().unwrap();
        let (exit, out) = run(
            settings_for(&mock_server.uri(), temp_dir.path()),
            &args("1706.03762", true),
            "",
        )
        .await;

        assert_eq!(exit, ProcessExit::Failure);
        assert!(out.contains("Download failed: HTTP 403"));
    }

    #[tokio::test]
    async fn test_download_by_id_rejects_malformed_identifier() {
        let temp_dir = TempDir::new().unwrap();
        let mut ctx = RunContext::new(settings_for("http://127.0.0.1:9", temp_dir.path())).unwrap();
        let err = download_by_id(
            &mut ctx,
            &args("not-an-id", true),
            &mut Cursor::new(Vec::new()),
            &mut Vec::new(),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("not-an-id"), "got: {err}");
    }
}
