//! Progress UI (spinner and per-paper bars) for fetches and downloads.

use std::cell::{Cell, RefCell};
use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use paper_extractor_core::{DownloadOutcome, PaperRecord, ProgressObserver};

use crate::output;

const BAR_TITLE_WIDTH: usize = 40;

/// Starts a spinner with `message` when progress output is enabled.
///
/// Callers finish it with [`finish_spinner`].
pub(crate) fn start_spinner(enabled: bool, message: String) -> Option<ProgressBar> {
    if !enabled {
        return None;
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    Some(spinner)
}

pub(crate) fn finish_spinner(spinner: Option<ProgressBar>) {
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
}

/// Renders download events: a byte progress bar per paper on an interactive
/// stderr, and one status line per finished paper on stdout.
pub(crate) struct DownloadProgress {
    show_bars: bool,
    print_lines: bool,
    total: usize,
    index: Cell<usize>,
    bar: RefCell<Option<ProgressBar>>,
}

impl DownloadProgress {
    pub(crate) fn new(total: usize, show_bars: bool, print_lines: bool) -> Self {
        Self {
            show_bars,
            print_lines,
            total,
            index: Cell::new(0),
            bar: RefCell::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg} [{bar:30}] {bytes}/{total_bytes}")
            .map(|style| style.progress_chars("=> "))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }
}

impl ProgressObserver for DownloadProgress {
    fn on_start(&self, paper: &PaperRecord, _path: &Path) {
        let index = self.index.get() + 1;
        self.index.set(index);
        if !self.show_bars {
            return;
        }

        let bar = ProgressBar::new(0);
        bar.set_style(Self::bar_style());
        bar.set_message(format!(
            "[{index}/{}] {}",
            self.total,
            output::truncate_to_width(&paper.title, BAR_TITLE_WIDTH)
        ));
        *self.bar.borrow_mut() = Some(bar);
    }

    fn on_progress(&self, _paper_id: &str, written: u64, total: Option<u64>) {
        if let Some(bar) = self.bar.borrow().as_ref() {
            bar.set_length(total.unwrap_or(written));
            bar.set_position(written);
        }
    }

    fn on_finish(&self, outcome: &DownloadOutcome) {
        if let Some(bar) = self.bar.borrow_mut().take() {
            bar.finish_and_clear();
        }
        if self.print_lines {
            println!(
                "{}",
                output::render_outcome_line(self.index.get(), self.total, outcome)
            );
        }
    }
}
