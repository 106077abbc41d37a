//! Error types for xlconv.

use crate::channel::ChannelCode;
use thiserror::Error;

/// Result type for per-file conversion steps.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Per-file failures. Each one drops the file but never stops the batch.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The file name does not carry the accepted spreadsheet extension.
    #[error("[{file}] only {expected} files can be converted")]
    InvalidFileType { file: String, expected: String },

    /// The bytes could not be read or decoded, or no usable sheet exists.
    #[error("[{file}] {message}")]
    Parsing { file: String, message: String },

    /// The selected sheet has no data rows.
    #[error("[{file}] file contains no data")]
    EmptyFile { file: String },
}

/// Coarse classification of a [`ConvertError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidFileType,
    ParsingError,
    EmptyFile,
}

impl ConvertError {
    /// Create a parsing error.
    pub fn parsing(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parsing {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Which kind of failure this is.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidFileType { .. } => ErrorKind::InvalidFileType,
            Self::Parsing { .. } => ErrorKind::ParsingError,
            Self::EmptyFile { .. } => ErrorKind::EmptyFile,
        }
    }

    /// Name of the file the error belongs to.
    #[must_use]
    pub fn file(&self) -> &str {
        match self {
            Self::InvalidFileType { file, .. }
            | Self::Parsing { file, .. }
            | Self::EmptyFile { file } => file,
        }
    }
}

/// A row that resolved but could not be folded into its group.
#[derive(Debug, Error, PartialEq)]
pub enum RowError {
    #[error("quantity total overflowed for {product} / {option}")]
    QuantityOverflow { product: String, option: String },

    #[error("sales total is not finite for {product} / {option}")]
    SalesOverflow { product: String, option: String },
}

/// A file that could not be aggregated at all.
#[derive(Debug, Error, PartialEq)]
pub enum AggregateError {
    #[error("no field rule applies to channel {channel} for {file}")]
    NoRule { file: String, channel: ChannelCode },
}
