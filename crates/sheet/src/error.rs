use thiserror::Error;

/// Errors that can occur while reading or writing workbooks
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Sheet not found: {name}")]
    SheetNotFound { name: String },

    #[error("Sheet already exists: {name}")]
    SheetAlreadyExists { name: String },

    #[error("Workbook read error: {0}")]
    Read(String),

    #[error("Workbook write error: {0}")]
    Write(String),

    #[error("Index overflow: {0}")]
    IndexOverflow(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<calamine::XlsxError> for SheetError {
    fn from(e: calamine::XlsxError) -> Self {
        SheetError::Read(e.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for SheetError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        SheetError::Write(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SheetError>;
