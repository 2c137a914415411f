//! CLI command routing: sets up logging and config, then runs the subcommand.

use anyhow::Result;
use tracing::debug;

use crate::app::config_manager;
use crate::app::context::RunContext;
use crate::app::terminal::{self, TerminalCaps};
use crate::app_config;
use crate::cli::{Cli, Command};
use crate::{ProcessExit, commands};

/// Runs the parsed command line and returns the exit outcome.
pub(crate) async fn run(cli: Cli) -> Result<ProcessExit> {
    let ansi = TerminalCaps::detect().color_enabled(cli.no_color);
    terminal::init_tracing(terminal::default_log_level(cli.quiet, cli.verbose), ansi);
    debug!(?cli, "CLI arguments parsed");

    match &cli.command {
        Command::Categories => {
            commands::run_categories_command();
            Ok(ProcessExit::Success)
        }
        Command::Search(args) => commands::run_search_command(&mut build_context(&cli)?, args).await,
        Command::DownloadById(args) => {
            commands::run_download_by_id_command(&mut build_context(&cli)?, args).await
        }
        Command::SearchByAuthor(args) => {
            commands::run_author_command(&mut build_context(&cli)?, args).await
        }
        Command::Interactive(args) => {
            commands::run_interactive_command(&mut build_context(&cli)?, args).await
        }
    }
}

/// Loads the config file and builds the API and download clients.
///
/// `categories` never calls this, so a broken config file does not block it.
fn build_context(cli: &Cli) -> Result<RunContext> {
    let loaded = app_config::load_default_file_config()?;
    if let (Some(path), Some(_)) = (&loaded.path, &loaded.config) {
        debug!(path = %path.display(), "loaded config file");
    }
    let settings = config_manager::resolve_settings(cli, &loaded.file_config());
    debug!(?settings, "resolved settings");
    RunContext::new(settings)
}
