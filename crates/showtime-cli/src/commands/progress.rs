use indicatif::{ProgressBar, ProgressStyle};
use showtime_core::FileReport;
use std::io::IsTerminal;

/// Per-file progress for a batch. Hidden unless attached to a terminal.
pub struct FileProgress {
    bar: ProgressBar,
    interactive: bool,
}

impl FileProgress {
    pub fn new(total_files: usize, enabled: bool) -> Self {
        let interactive = enabled && is_interactive();

        let bar = if interactive {
            let bar = ProgressBar::new(total_files as u64);
            let style = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
                .map(|style| style.progress_chars("█▉▊▋▌▍▎▏  "))
                .unwrap_or_else(|_| ProgressStyle::default_bar());
            bar.set_style(style);
            bar.set_message("Normalizing...");
            bar
        } else {
            tracing::debug!(
                operation = "ui_init",
                mode = "non_interactive",
                "Progress bar disabled"
            );
            ProgressBar::hidden()
        };

        Self { bar, interactive }
    }

    pub fn file_done(&self, report: &FileReport) {
        if self.interactive {
            self.bar.set_message(report.file_name());
            self.bar.inc(1);
        }
    }

    pub fn finish(&self) {
        if self.interactive {
            self.bar.finish_and_clear();
        }
    }
}

pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}
