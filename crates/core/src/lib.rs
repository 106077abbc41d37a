//! # xlconv-core
//!
//! Conversion of multi-channel sales exports into one aggregated table.
//!
//! This crate provides:
//! - File name classification into a report date and a sales channel
//! - Sheet selection for each known export layout
//! - Per-channel field resolution for product, option, quantity and sales
//! - Per-file aggregation by product and option
//! - A sequential batch [`Converter`] with an observer hook
//!
//! ```
//! use xlconv_core::{classify, ChannelCode};
//!
//! let found = classify("복지_240331.xlsx");
//! assert_eq!(found.date, "2024/03/31");
//! assert_eq!(found.channel, ChannelCode::WelfareMall);
//! ```

/// Per-file grouping of resolved rows.
pub mod aggregate;
/// Batch conversion driver.
pub mod batch;
/// Sales channel codes.
pub mod channel;
/// File name classification.
pub mod classify;
/// Error types and result aliases.
pub mod error;
/// Workbook export of aggregated records.
pub mod export;
/// File type checks, sheet selection and parsing.
pub mod ingest;
/// Observer hook for progress and diagnostics.
pub mod observe;
/// Conversion options.
pub mod options;
/// Record types.
pub mod record;
/// Per-channel field resolution.
pub mod resolve;

pub use aggregate::{aggregate, Aggregator};
pub use batch::{BatchOutcome, BatchReport, Converter, InputFile};
pub use channel::ChannelCode;
pub use classify::{classify, classify_on, Classification, DateSource};
pub use error::{AggregateError, ConvertError, ConvertResult, ErrorKind, RowError};
pub use export::{export_records, export_records_to_bytes};
pub use ingest::{check_file_type, select_sheet, WorkbookReader, XlsxReader};
pub use observe::{ConvertObserver, NoopObserver, TracingObserver};
pub use options::ConvertOptions;
pub use record::{AggregatedRecord, FileRecord, OUTPUT_COLUMNS};
pub use resolve::{resolve, FieldRule, ResolvedFields, ResolverTable};
