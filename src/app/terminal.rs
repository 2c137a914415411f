//! Terminal capability detection and tracing setup.

use std::io::{self, IsTerminal};

/// What the attached terminal can render, probed once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TerminalCaps {
    pub(crate) stderr_tty: bool,
    pub(crate) dumb: bool,
    pub(crate) no_color_env: bool,
}

impl TerminalCaps {
    pub(crate) fn detect() -> Self {
        Self {
            stderr_tty: io::stderr().is_terminal(),
            dumb: std::env::var("TERM").is_ok_and(|term| term.eq_ignore_ascii_case("dumb")),
            no_color_env: std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty()),
        }
    }

    /// ANSI colors in log output, unless `--no-color`, `NO_COLOR` or a dumb terminal say otherwise.
    pub(crate) fn color_enabled(self, no_color_flag: bool) -> bool {
        !(no_color_flag || self.no_color_env || self.dumb)
    }

    /// Spinners and byte bars need an interactive stderr.
    pub(crate) fn progress_enabled(self, quiet: bool) -> bool {
        self.stderr_tty && !self.dumb && !quiet
    }
}

/// Log level used when `RUST_LOG` is unset.
///
/// Subcommand output goes to stdout, so logs stay at `warn` unless asked for.
pub(crate) fn default_log_level(quiet: bool, verbose: u8) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "debug",
        (false, _) => "trace",
    }
}

pub(crate) fn init_tracing(default_level: &str, ansi: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(ansi)
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
