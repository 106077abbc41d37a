//! Workbook module for xlconv
//!
//! Reads `.xlsx` workbooks into header-keyed rows and writes in-memory books
//! back out as `.xlsx` files.
//!
//! # Examples
//!
//! ## Header-keyed rows
//!
//! ```
//! use xlconv_sheet::{CellValue, Sheet};
//!
//! let sheet = Sheet::from_data(vec![
//!     vec![CellValue::from("상품명"), CellValue::from("수량")],
//!     vec![CellValue::from("상품A"), CellValue::Int(2)],
//! ]);
//!
//! let rows = sheet.records();
//! assert_eq!(rows.len(), 1);
//! assert_eq!(rows[0]["수량"].to_number(), 2.0);
//! ```
//!
//! ## Reading a workbook from bytes
//!
//! ```
//! use xlconv_sheet::{Book, Sheet, SheetSource, XlsxWorkbook};
//!
//! let mut book = Book::new();
//! book.add_sheet("Excel", Sheet::from_data(vec![vec!["a"], vec!["b"]])).unwrap();
//! let bytes = book.to_xlsx_bytes().unwrap();
//!
//! let mut workbook = XlsxWorkbook::from_bytes(bytes).unwrap();
//! assert_eq!(workbook.sheet_names(), vec!["Excel"]);
//! assert_eq!(workbook.load_sheet("Excel").unwrap().records().len(), 1);
//! ```

mod book;
mod cell;
mod error;
mod sheet;
mod xlsx;

/// Re-export book types.
pub use book::{Book, SheetSource};
/// Re-export cell value type.
pub use cell::CellValue;
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export sheet and row types.
pub use sheet::{Row, Sheet};
/// Re-export the xlsx reader.
pub use xlsx::XlsxWorkbook;
