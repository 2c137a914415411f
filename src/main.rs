//! CLI entry point for paper-extractor.

use std::process::ExitCode;

use clap::Parser;

mod app;
mod app_config;
mod cli;
mod commands;
mod output;

use cli::Cli;

/// Process outcome, mapped onto the exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProcessExit {
    /// Everything requested was done (including previews and empty results).
    Success,
    /// Some downloads failed, others succeeded.
    Partial,
    /// Nothing could be done: bad input, failed fetch, or every download failed.
    Failure,
}

impl ProcessExit {
    pub(crate) fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Partial => 1,
            Self::Failure => 2,
        }
    }
}

impl From<ProcessExit> for ExitCode {
    fn from(exit: ProcessExit) -> Self {
        ExitCode::from(exit.code())
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let cli = Cli::parse();

    match app::command_dispatcher::run(cli).await {
        Ok(exit) => exit.into(),
        Err(error) => {
            eprintln!("Error: {error:#}");
            ProcessExit::Failure.into()
        }
    }
}
