//! Observer hook for conversion progress and diagnostics.
//!
//! The conversion code never logs directly; it reports through a
//! [`ConvertObserver`]. [`TracingObserver`] turns those reports into
//! structured `tracing` events, [`NoopObserver`] drops them.

use crate::batch::BatchOutcome;
use crate::error::{AggregateError, ConvertError, RowError};

/// Receives events from a conversion run. Every method defaults to a no-op.
pub trait ConvertObserver {
    /// A file is about to be read. `index` is 0-based.
    fn file_started(&self, _index: usize, _total: usize, _file: &str) {}

    /// A file was read; `rows` data rows came from `sheet`.
    fn file_parsed(&self, _file: &str, _sheet: &str, _rows: usize) {}

    /// A file was rejected; the batch goes on without it.
    fn file_failed(&self, _error: &ConvertError) {}

    /// No classification rule matched, so today's date was used.
    fn date_fallback(&self, _file: &str, _date: &str) {}

    /// A row could not be folded into its group and was dropped.
    /// `row` is the 0-based data row index.
    fn row_skipped(&self, _file: &str, _row: usize, _error: &RowError) {}

    /// A whole file could not be aggregated.
    fn file_skipped(&self, _error: &AggregateError) {}

    /// A file's rows were folded into `groups` records.
    fn file_aggregated(&self, _file: &str, _groups: usize) {}

    /// Overall progress in percent, 0 to 100.
    fn progress(&self, _percent: f64) {}

    fn batch_finished(&self, _outcome: &BatchOutcome) {}
}

/// Ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ConvertObserver for NoopObserver {}

/// Emits every event as a `tracing` event keyed by file (and row).
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ConvertObserver for TracingObserver {
    fn file_started(&self, index: usize, total: usize, file: &str) {
        tracing::info!(file, index = index + 1, total, "parsing file");
    }

    fn file_parsed(&self, file: &str, sheet: &str, rows: usize) {
        tracing::info!(file, sheet, rows, "file parsed");
    }

    fn file_failed(&self, error: &ConvertError) {
        tracing::warn!(file = error.file(), kind = ?error.kind(), "{error}");
    }

    fn date_fallback(&self, file: &str, date: &str) {
        tracing::warn!(file, date, "no date in file name, using today");
    }

    fn row_skipped(&self, file: &str, row: usize, error: &RowError) {
        tracing::warn!(file, row, "skipping row: {error}");
    }

    fn file_skipped(&self, error: &AggregateError) {
        tracing::error!("skipping file: {error}");
    }

    fn file_aggregated(&self, file: &str, groups: usize) {
        tracing::debug!(file, groups, "file aggregated");
    }

    fn progress(&self, percent: f64) {
        tracing::trace!(percent, "progress");
    }

    fn batch_finished(&self, outcome: &BatchOutcome) {
        match outcome {
            BatchOutcome::Converted { items, failed_files } => {
                tracing::info!(items, failed_files, "conversion finished");
            }
            BatchOutcome::NoData { failed_files } => {
                tracing::warn!(failed_files, "no data to process");
            }
        }
    }
}
