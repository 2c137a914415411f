//! Interactive mode: a prompt-driven search and selection loop.
//!
//! The loop is an explicit state machine:
//!
//! ```text
//! AwaitingQuery --query--> ShowingResults --papers--> AwaitingSelection
//!      ^   |                     |                        |
//!      |   +--end of input--+    +--nothing found--+      +--continue? no--> Done
//!      +------------------- new / try again / continue? yes --------------+
//! ```
//!
//! Prompts go through generic reader/writer handles so the loop can be driven
//! from tests without a terminal.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use paper_extractor_core::{
    DownloadOutcome, DownloadSummary, FolderKind, PaperRecord, SearchSpec, folder_name,
};
use tracing::warn;

use crate::ProcessExit;
use crate::app::config_manager::Settings;
use crate::app::context::RunContext;
use crate::app::{download_orchestrator, exit_handler, prompt};
use crate::cli::InteractiveArgs;
use crate::output;

/// What the user asked for at the selection prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Selection {
    All,
    None,
    NewSearch,
    /// Zero-based indices into the listed papers, in the order given.
    Papers(Vec<usize>),
    /// Numbers were given but none matched a listed paper.
    OutOfRange,
    Invalid,
}

/// Parses `all`, `none`, `new`, or a comma-separated list of 1-based numbers.
///
/// An empty answer means `none`. Numbers outside `1..=count` are ignored and
/// repeats are dropped.
pub(crate) fn parse_selection(answer: &str, count: usize) -> Selection {
    let answer = answer.trim().to_ascii_lowercase();
    match answer.as_str() {
        "" | "none" => return Selection::None,
        "all" => return Selection::All,
        "new" => return Selection::NewSearch,
        _ => {}
    }

    let mut indices = Vec::new();
    for part in answer.split(',') {
        let Ok(number) = part.trim().parse::<usize>() else {
            return Selection::Invalid;
        };
        if (1..=count).contains(&number) && !indices.contains(&(number - 1)) {
            indices.push(number - 1);
        }
    }

    if indices.is_empty() {
        Selection::OutOfRange
    } else {
        Selection::Papers(indices)
    }
}

#[derive(Debug)]
enum State {
    AwaitingQuery,
    ShowingResults { query: String },
    AwaitingSelection { query: String, papers: Vec<PaperRecord> },
    Done,
}

/// Search and download operations the loop drives.
pub(crate) trait PaperSource {
    async fn search(&mut self, query: &str) -> Result<Vec<PaperRecord>>;

    async fn download(&mut self, papers: &[PaperRecord], folder: &Path) -> Vec<DownloadOutcome>;
}

struct ContextSource<'a> {
    ctx: &'a mut RunContext,
    max_results: u32,
}

impl PaperSource for ContextSource<'_> {
    async fn search(&mut self, query: &str) -> Result<Vec<PaperRecord>> {
        let spec = session_spec(&self.ctx.settings, query, self.max_results);
        download_orchestrator::fetch_papers(self.ctx, &spec).await
    }

    async fn download(&mut self, papers: &[PaperRecord], folder: &Path) -> Vec<DownloadOutcome> {
        download_orchestrator::download_batch(self.ctx, papers, folder, true).await
    }
}

pub(crate) async fn run_interactive_command(
    ctx: &mut RunContext,
    args: &InteractiveArgs,
) -> Result<ProcessExit> {
    let download_dir = ctx.settings.download_dir_or(args.download_dir.as_deref());
    let max_results = ctx.settings.max_results_or(args.max_results);
    let mut source = ContextSource { ctx, max_results };

    run_session(
        &mut source,
        args.query.clone(),
        &download_dir,
        &mut io::stdin().lock(),
        &mut io::stdout(),
    )
    .await
}

/// Runs the loop until the user quits or input ends.
///
/// The exit outcome reflects every download attempted during the session.
pub(crate) async fn run_session<S: PaperSource, R: BufRead, W: Write>(
    source: &mut S,
    initial_query: Option<String>,
    download_dir: &Path,
    input: &mut R,
    out: &mut W,
) -> Result<ProcessExit> {
    let mut state = match initial_query {
        Some(query) if !query.trim().is_empty() => State::ShowingResults { query },
        _ => State::AwaitingQuery,
    };
    let mut totals = DownloadSummary::default();

    loop {
        state = match state {
            State::AwaitingQuery => match prompt::read_line(input, out, "Search query: ")? {
                None => State::Done,
                Some(query) if query.is_empty() => {
                    writeln!(out, "Please enter a search query.")?;
                    State::AwaitingQuery
                }
                Some(query) => State::ShowingResults { query },
            },

            State::ShowingResults { query } => {
                writeln!(out, "\nSearching for: '{query}'")?;
                out.flush()?;
                match source.search(&query).await {
                    Ok(papers) if !papers.is_empty() => {
                        write!(out, "{}", output::render_selection_list(&papers))?;
                        State::AwaitingSelection { query, papers }
                    }
                    Ok(_) => {
                        writeln!(out, "No papers found.")?;
                        retry_or_done(input, out)?
                    }
                    Err(error) => {
                        warn!(error = %error, "interactive search failed");
                        writeln!(out, "Search failed: {error:#}")?;
                        retry_or_done(input, out)?
                    }
                }
            }

            State::AwaitingSelection { query, papers } => {
                print_options(out)?;
                let answer =
                    prompt::read_line(input, out, "What would you like to do? [none]: ")?;
                let Some(answer) = answer else {
                    state = State::Done;
                    continue;
                };

                let folder = session_folder(download_dir, &query);
                let chosen: Vec<PaperRecord> = match parse_selection(&answer, papers.len()) {
                    Selection::NewSearch => {
                        state = State::AwaitingQuery;
                        continue;
                    }
                    Selection::None => {
                        writeln!(out, "No downloads.")?;
                        Vec::new()
                    }
                    Selection::All => papers,
                    Selection::Papers(indices) => {
                        indices.into_iter().map(|i| papers[i].clone()).collect()
                    }
                    Selection::OutOfRange => {
                        writeln!(out, "Invalid paper numbers.")?;
                        Vec::new()
                    }
                    Selection::Invalid => {
                        writeln!(
                            out,
                            "Invalid format. Use numbers separated by commas (e.g., '1,3,5')"
                        )?;
                        Vec::new()
                    }
                };

                if !chosen.is_empty() {
                    out.flush()?;
                    let outcomes = source.download(&chosen, &folder).await;
                    write!(out, "{}", output::render_download_summary(&outcomes, &folder))?;
                    let batch = DownloadSummary::from_outcomes(&outcomes);
                    totals.succeeded += batch.succeeded;
                    totals.failed += batch.failed;
                    totals.total_bytes = totals.total_bytes.saturating_add(batch.total_bytes);
                }

                if prompt::confirm(input, out, "\nContinue searching?", false)? {
                    State::AwaitingQuery
                } else {
                    State::Done
                }
            }

            State::Done => break,
        };
    }

    writeln!(out, "\nGoodbye!")?;
    Ok(exit_handler::determine_exit_outcome(
        totals.succeeded,
        totals.failed,
    ))
}

fn retry_or_done<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<State> {
    Ok(if prompt::confirm(input, out, "Try a different search?", false)? {
        State::AwaitingQuery
    } else {
        State::Done
    })
}

fn print_options<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "\nOptions:")?;
    writeln!(out, "  'all'   - Download all papers")?;
    writeln!(out, "  '1,3,5' - Download specific papers by number")?;
    writeln!(out, "  'none'  - Don't download anything")?;
    writeln!(out, "  'new'   - New search")
}

/// Keyword search with the configured ordering, like `search` without flags.
fn session_spec(settings: &Settings, query: &str, max_results: u32) -> SearchSpec {
    SearchSpec::keywords(query)
        .with_max_results(max_results)
        .with_sort(settings.sort_by, settings.sort_order)
}

fn session_folder(download_dir: &Path, query: &str) -> PathBuf {
    download_dir.join(folder_name(FolderKind::Interactive, query))
}
