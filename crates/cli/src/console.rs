//! Terminal reporting: a progress bar plus colored per-file notices.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use xlconv_core::{
    AggregateError, BatchOutcome, ConvertError, ConvertObserver, RowError, TracingObserver,
};

/// Reports a batch on the terminal and forwards every event to `tracing`.
pub struct ConsoleObserver {
    bar: ProgressBar,
    tracing: TracingObserver,
}

impl ConsoleObserver {
    /// `show_progress` draws a bar on stderr; otherwise it stays hidden.
    pub fn new(show_progress: bool) -> Self {
        let bar = if show_progress {
            let bar = ProgressBar::new(100);
            if let Ok(style) =
                ProgressStyle::default_bar().template("{bar:40.cyan/blue} {pos:>3}% {msg}")
            {
                bar.set_style(style);
            }
            bar
        } else {
            ProgressBar::hidden()
        };

        Self {
            bar,
            tracing: TracingObserver,
        }
    }

    fn notice(&self, line: String) {
        self.bar.suspend(|| eprintln!("{line}"));
    }
}

/// One-line description of a finished batch.
pub fn summary(outcome: &BatchOutcome) -> String {
    match outcome {
        BatchOutcome::Converted {
            items,
            failed_files: 0,
        } => format!("converted {items} items"),
        BatchOutcome::Converted {
            items,
            failed_files,
        } => format!("converted {items} items ({failed_files} files failed)"),
        BatchOutcome::NoData { .. } => "no data to process".to_string(),
    }
}

impl ConvertObserver for ConsoleObserver {
    fn file_started(&self, index: usize, total: usize, file: &str) {
        self.tracing.file_started(index, total, file);
        self.bar.set_message(format!("[{}/{total}] {file}", index + 1));
    }

    fn file_parsed(&self, file: &str, sheet: &str, rows: usize) {
        self.tracing.file_parsed(file, sheet, rows);
    }

    fn file_failed(&self, error: &ConvertError) {
        self.tracing.file_failed(error);
        self.notice(format!("{} {}", "✗".red().bold(), error.to_string().red()));
    }

    fn date_fallback(&self, file: &str, date: &str) {
        self.tracing.date_fallback(file, date);
        self.notice(format!(
            "{} {}",
            "⚠".yellow().bold(),
            format!("[{file}] no date in file name, using {date}").yellow()
        ));
    }

    fn row_skipped(&self, file: &str, row: usize, error: &RowError) {
        self.tracing.row_skipped(file, row, error);
    }

    fn file_skipped(&self, error: &AggregateError) {
        self.tracing.file_skipped(error);
        self.notice(format!("{} {}", "✗".red().bold(), error.to_string().red()));
    }

    fn file_aggregated(&self, file: &str, groups: usize) {
        self.tracing.file_aggregated(file, groups);
    }

    fn progress(&self, percent: f64) {
        self.tracing.progress(percent);
        self.bar.set_position(percent.round() as u64);
    }

    fn batch_finished(&self, outcome: &BatchOutcome) {
        self.tracing.batch_finished(outcome);
        self.bar.finish_and_clear();

        let line = summary(outcome);
        match outcome {
            BatchOutcome::Converted { .. } => {
                eprintln!("{} {}", "✓".green().bold(), line.green());
            }
            BatchOutcome::NoData { .. } => {
                eprintln!("{} {}", "⚠".yellow().bold(), line.yellow());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary() {
        assert_eq!(
            summary(&BatchOutcome::Converted {
                items: 3,
                failed_files: 0
            }),
            "converted 3 items"
        );
        assert_eq!(
            summary(&BatchOutcome::Converted {
                items: 3,
                failed_files: 2
            }),
            "converted 3 items (2 files failed)"
        );
        assert_eq!(
            summary(&BatchOutcome::NoData { failed_files: 1 }),
            "no data to process"
        );
    }

    #[test]
    fn test_hidden_bar_accepts_events() {
        let observer = ConsoleObserver::new(false);
        observer.file_started(0, 2, "복지_240331.xlsx");
        observer.progress(45.0);
        observer.progress(100.0);
        observer.batch_finished(&BatchOutcome::NoData { failed_files: 0 });
    }
}
