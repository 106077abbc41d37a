//! Turning one uploaded file into a [`FileRecord`].
//!
//! The workbook codec sits behind [`WorkbookReader`]; this module owns the
//! file-type check, sheet selection and the per-file failure rules.

use crate::classify::{classify_on, Classification};
use crate::error::{ConvertError, ConvertResult};
use crate::record::FileRecord;
use chrono::NaiveDate;
use xlconv_sheet::{SheetSource, XlsxWorkbook};

/// Sheet names tried, in order, when the file name gives no better hint.
pub const COMMON_SHEET_NAMES: [&str; 6] = [
    "Sheet1",
    "Sheet2",
    "Sheet",
    "Excel",
    "발주발송관리",
    "구매확정내역",
];

/// File-name markers and the sheet each one prefers. First match wins.
const PREFERRED_SHEETS: [(&[&str], &str); 3] = [
    (&["복지_", "쇼핑_"], "Excel"),
    (&["네이버페이_전체주문발주발송관리"], "발주발송관리"),
    (&["네이버페이_구매확정내역"], "구매확정내역"),
];

/// Opens raw file bytes as a workbook.
pub trait WorkbookReader {
    /// # Errors
    ///
    /// Returns an error if the bytes are not a readable workbook.
    fn open(&self, bytes: Vec<u8>) -> xlconv_sheet::Result<Box<dyn SheetSource>>;
}

/// Reads `.xlsx` workbooks through calamine.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxReader;

impl WorkbookReader for XlsxReader {
    fn open(&self, bytes: Vec<u8>) -> xlconv_sheet::Result<Box<dyn SheetSource>> {
        Ok(Box::new(XlsxWorkbook::from_bytes(bytes)?))
    }
}

/// Reject names without the accepted extension (exact, case-sensitive).
///
/// # Errors
///
/// Returns [`ConvertError::InvalidFileType`] on mismatch.
pub fn check_file_type(file_name: &str, extension: &str) -> ConvertResult<()> {
    if file_name.ends_with(extension) {
        Ok(())
    } else {
        Err(ConvertError::InvalidFileType {
            file: file_name.to_string(),
            expected: extension.to_string(),
        })
    }
}

/// Pick the sheet to read for a file. `None` only when there are no sheets.
#[must_use]
pub fn select_sheet<'a>(file_name: &str, sheet_names: &'a [String]) -> Option<&'a str> {
    let present = |wanted: &str| {
        sheet_names
            .iter()
            .find(|name| name.as_str() == wanted)
            .map(String::as_str)
    };

    let hinted = PREFERRED_SHEETS
        .iter()
        .find(|(markers, _)| markers.iter().any(|marker| file_name.contains(marker)));

    let preferred = match hinted {
        Some((_, sheet)) => present(sheet),
        None => COMMON_SHEET_NAMES.iter().find_map(|name| present(name)),
    };

    preferred.or_else(|| sheet_names.first().map(String::as_str))
}

/// A file read into rows, with what was decided along the way.
#[derive(Debug, Clone)]
pub struct ParsedFile {
    pub record: FileRecord,
    pub sheet: String,
    pub classification: Classification,
}

/// Read the selected sheet of an opened workbook and classify the file.
///
/// # Errors
///
/// [`ConvertError::Parsing`] when the workbook has no sheets or the chosen
/// sheet cannot be loaded; [`ConvertError::EmptyFile`] when it has no rows.
pub fn parse_workbook(
    file_name: &str,
    source: &mut dyn SheetSource,
    today: NaiveDate,
) -> ConvertResult<ParsedFile> {
    let sheet_names = source.sheet_names();
    if sheet_names.is_empty() {
        return Err(ConvertError::parsing(file_name, "workbook has no sheets"));
    }

    let target = select_sheet(file_name, &sheet_names)
        .ok_or_else(|| ConvertError::parsing(file_name, "no usable sheet found"))?
        .to_string();

    let sheet = source.load_sheet(&target).map_err(|e| {
        ConvertError::parsing(file_name, format!("could not read sheet '{target}': {e}"))
    })?;

    let rows = sheet.records();
    if rows.is_empty() {
        return Err(ConvertError::EmptyFile {
            file: file_name.to_string(),
        });
    }

    let classification = classify_on(file_name, today);
    let record = FileRecord {
        file_name: file_name.to_string(),
        date: classification.date.clone(),
        channel: classification.channel,
        rows,
    };

    Ok(ParsedFile {
        record,
        sheet: target,
        classification,
    })
}
