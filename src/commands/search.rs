//! Search command handler: keyword search, listing and topic-folder downloads.

use std::io::{self, Write};

use anyhow::Result;
use paper_extractor_core::{FolderKind, SearchSpec, folder_name};

use crate::ProcessExit;
use crate::app::context::RunContext;
use crate::app::download_orchestrator::{self, ListingOptions};
use crate::cli::SearchArgs;

pub(crate) fn build_search_spec(ctx: &RunContext, args: &SearchArgs) -> SearchSpec {
    let settings = &ctx.settings;
    let sort_by = args.sort_by.map_or(settings.sort_by, Into::into);
    let sort_order = args.sort_order.map_or(settings.sort_order, Into::into);
    let date_field = args.date_field.map_or(settings.date_field, Into::into);

    SearchSpec::keywords(args.query.clone())
        .with_max_results(settings.max_results_or(args.max_results))
        .with_categories(args.categories.iter().cloned())
        .with_sort(sort_by, sort_order)
        .with_recent_days(args.recent_days.map_or(0, i64::from), date_field)
}

pub(crate) async fn run_search_command(ctx: &mut RunContext, args: &SearchArgs) -> Result<ProcessExit> {
    let spec = build_search_spec(ctx, args);
    let mut stdout = io::stdout();

    if !args.json {
        writeln!(stdout, "Searching arXiv for: '{}'", args.query)?;
        if !args.categories.is_empty() {
            writeln!(stdout, "Categories: {}", args.categories.join(", "))?;
        }
        if let Some(days) = spec.recent_days() {
            writeln!(
                stdout,
                "Filtering for papers from the last {days} days ({} date)",
                spec.date_field().as_str()
            )?;
        }
    }

    let papers = download_orchestrator::fetch_papers(ctx, &spec).await?;
    if papers.is_empty() {
        if args.json {
            writeln!(stdout, "[]")?;
        } else {
            writeln!(stdout, "No papers found matching your query.")?;
        }
        return Ok(ProcessExit::Success);
    }

    let folder = ctx
        .settings
        .download_dir_or(args.download_dir.as_deref())
        .join(folder_name(FolderKind::Topic, &args.query));
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
