//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use paper_extractor_core::{DateField, SortBy, SortOrder};

/// Search arXiv and download papers into organized topic folders.
///
/// Results are saved under `<download dir>/<folder>/<title>_<id>.pdf`, where the
/// folder is derived from the search topic, author, or paper id.
#[derive(Parser, Debug)]
#[command(name = "paper-extractor")]
#[command(author, version, about)]
pub struct Cli {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error log output and progress bars
    #[arg(short, long)]
    pub quiet: bool,

    /// Minimum delay between requests to arXiv in milliseconds (0 to disable, max 60000)
    #[arg(short = 'l', long, global = true, value_parser = clap::value_parser!(u64).range(0..=60000))]
    pub rate_limit: Option<u64>,

    /// Disable colored log output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search papers by keywords and download the results
    Search(SearchArgs),

    /// Download a single paper by its arXiv identifier
    DownloadById(DownloadByIdArgs),

    /// Search papers by author name
    SearchByAuthor(AuthorArgs),

    /// List the known arXiv category codes
    Categories,

    /// Guided search-and-select loop
    Interactive(InteractiveArgs),
}

/// Arguments for `search`.
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Keywords, or a raw arXiv query such as `ti:transformer AND cat:cs.CL`
    pub query: String,

    /// Maximum number of papers to fetch (1-2000, default 10)
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..=2000))]
    pub max_results: Option<u32>,

    /// Base directory for downloads (default ./downloads)
    #[arg(short = 'd', long)]
    pub download_dir: Option<PathBuf>,

    /// Restrict results to arXiv categories (repeatable, e.g. -c cs.AI -c cs.LG)
    #[arg(short = 'c', long = "categories", value_name = "CATEGORY")]
    pub categories: Vec<String>,

    /// Result ordering
    #[arg(long, value_enum)]
    pub sort_by: Option<SortByArg>,

    /// Ordering direction
    #[arg(long, value_enum)]
    pub sort_order: Option<SortOrderArg>,

    /// Only list results, never download
    #[arg(short = 'p', long, conflicts_with = "auto_download")]
    pub preview_only: bool,

    /// Download every result without asking
    #[arg(short = 'a', long)]
    pub auto_download: bool,

    /// Only keep papers from the last N days
    #[arg(long, value_name = "DAYS")]
    pub recent_days: Option<u32>,

    /// Timestamp used by --recent-days
    #[arg(long, value_enum)]
    pub date_field: Option<DateFieldArg>,

    /// Print results as JSON instead of a listing
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `download-by-id`.
#[derive(Args, Debug, Clone)]
pub struct DownloadByIdArgs {
    /// arXiv identifier, `arXiv:` reference, abs/pdf URL, or arXiv DOI
    pub arxiv_id: String,

    /// Base directory for downloads (default ./downloads)
    #[arg(short = 'd', long)]
    pub download_dir: Option<PathBuf>,

    /// Custom file name (`.pdf` is appended when missing)
    #[arg(short = 'f', long)]
    pub filename: Option<String>,

    /// Download without asking for confirmation
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for `search-by-author`.
#[derive(Args, Debug, Clone)]
pub struct AuthorArgs {
    /// Author name, e.g. "Geoffrey Hinton"
    pub name: String,

    /// Maximum number of papers to fetch (1-2000, default 10)
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..=2000))]
    pub max_results: Option<u32>,

    /// Base directory for downloads (default ./downloads)
    #[arg(short = 'd', long)]
    pub download_dir: Option<PathBuf>,

    /// Only list results, never download
    #[arg(short = 'p', long, conflicts_with = "auto_download")]
    pub preview_only: bool,

    /// Download every result without asking
    #[arg(short = 'a', long)]
    pub auto_download: bool,

    /// Print results as JSON instead of a listing
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `interactive`.
#[derive(Args, Debug, Clone)]
pub struct InteractiveArgs {
    /// Initial search query (prompted when omitted)
    #[arg(short = 'q', long)]
    pub query: Option<String>,

    /// Maximum number of papers per search (1-2000, default 10)
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..=2000))]
    pub max_results: Option<u32>,

    /// Base directory for downloads (default ./downloads)
    #[arg(short = 'd', long)]
    pub download_dir: Option<PathBuf>,
}

/// CLI spelling of [`SortBy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortByArg {
    /// Search relevance
    Relevance,
    /// Latest revision first
    #[value(name = "lastUpdatedDate", alias = "last-updated-date")]
    LastUpdatedDate,
    /// Submission date
    #[value(name = "submittedDate", alias = "submitted-date")]
    SubmittedDate,
}

impl From<SortByArg> for SortBy {
    fn from(value: SortByArg) -> Self {
        match value {
            SortByArg::Relevance => SortBy::Relevance,
            SortByArg::LastUpdatedDate => SortBy::LastUpdatedDate,
            SortByArg::SubmittedDate => SortBy::SubmittedDate,
        }
    }
}

/// CLI spelling of [`SortOrder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortOrderArg {
    Ascending,
    Descending,
}

impl From<SortOrderArg> for SortOrder {
    fn from(value: SortOrderArg) -> Self {
        match value {
            SortOrderArg::Ascending => SortOrder::Ascending,
            SortOrderArg::Descending => SortOrder::Descending,
        }
    }
}

/// CLI spelling of [`DateField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DateFieldArg {
    Published,
    Updated,
}

impl From<DateFieldArg> for DateField {
    fn from(value: DateFieldArg) -> Self {
        match value {
            DateFieldArg::Published => DateField::Published,
            DateFieldArg::Updated => DateField::Updated,
        }
    }
}
