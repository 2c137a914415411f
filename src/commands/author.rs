//! Author search command handler.

use std::io::{self, Write};

use anyhow::Result;
use paper_extractor_core::{FolderKind, SearchSpec, folder_name};

use crate::ProcessExit;
use crate::app::context::RunContext;
use crate::app::download_orchestrator::{self, ListingOptions};
use crate::cli::AuthorArgs;

pub(crate) async fn run_author_command(ctx: &mut RunContext, args: &AuthorArgs) -> Result<ProcessExit> {
    let spec = SearchSpec::author(args.name.clone())
        .with_max_results(ctx.settings.max_results_or(args.max_results))
        .with_sort(ctx.settings.sort_by, ctx.settings.sort_order);
    let mut stdout = io::stdout();

    if !args.json {
        writeln!(stdout, "Searching papers by author: {}", args.name)?;
    }

    let papers = download_orchestrator::fetch_papers(ctx, &spec).await?;
    if papers.is_empty() {
        if args.json {
            writeln!(stdout, "[]")?;
        } else {
            writeln!(stdout, "No papers found for author '{}'.", args.name)?;
        }
        return Ok(ProcessExit::Success);
    }

    let folder = ctx
        .settings
        .download_dir_or(args.download_dir.as_deref())
        .join(folder_name(FolderKind::Author, &args.name));
    let options = ListingOptions {
        preview_only: args.preview_only,
        auto_download: args.auto_download,
        json: args.json,
    };

    download_orchestrator::present_and_download(
        ctx,
        &papers,
        &folder,
        options,
        &mut io::stdin().lock(),
        &mut stdout,
    )
    .await
}
