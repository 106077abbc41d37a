//! Writing aggregated records back out as a workbook.

use crate::options::DEFAULT_OUTPUT_SHEET;
use crate::record::{AggregatedRecord, OUTPUT_COLUMNS};
use std::path::Path;
use xlconv_sheet::{Book, CellValue, Sheet};

/// Build a one-sheet book: a header row, then one row per record.
pub fn records_to_book(
    records: &[AggregatedRecord],
    sheet_name: &str,
) -> xlconv_sheet::Result<Book> {
    let mut data: Vec<Vec<CellValue>> = Vec::with_capacity(records.len() + 1);
    data.push(OUTPUT_COLUMNS.iter().map(|&c| CellValue::from(c)).collect());

    for record in records {
        data.push(vec![
            CellValue::from(record.date.as_str()),
            CellValue::from(record.channel_code.code()),
            CellValue::from(record.category.as_str()),
            CellValue::from(record.product_name.as_str()),
            CellValue::from(record.option.as_str()),
            CellValue::Int(record.quantity),
            CellValue::Float(record.sales),
        ]);
    }

    let mut sheet = Sheet::with_name(sheet_name);
    *sheet.data_mut() = data;

    let mut book = Book::new();
    book.add_sheet(sheet_name, sheet)?;
    Ok(book)
}

/// Write records to an `.xlsx` file with a single `AggregatedData` sheet.
///
/// # Errors
///
/// Returns error if the file cannot be written.
pub fn export_records<P: AsRef<Path>>(
    records: &[AggregatedRecord],
    path: P,
) -> xlconv_sheet::Result<()> {
    records_to_book(records, DEFAULT_OUTPUT_SHEET)?.save_as_xlsx(path)
}

/// Encode records as `.xlsx` bytes with a single `AggregatedData` sheet.
///
/// # Errors
///
/// Returns error if the workbook cannot be encoded.
pub fn export_records_to_bytes(records: &[AggregatedRecord]) -> xlconv_sheet::Result<Vec<u8>> {
    records_to_book(records, DEFAULT_OUTPUT_SHEET)?.to_xlsx_bytes()
}
