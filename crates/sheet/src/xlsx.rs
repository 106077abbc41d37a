use crate::book::{Book, SheetSource};
use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use crate::sheet::Sheet;
use calamine::{Data, Reader, Xlsx};
use rust_xlsxwriter::{Workbook, Worksheet};
use std::io::Cursor;
use std::path::Path;

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::DateTime(dt) => {
            // Excel stores dates as days since 1899-12-30
            CellValue::Float(dt.as_f64())
        }
        Data::DateTimeIso(s) => CellValue::String(s.clone()),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(format!("#ERROR: {e:?}")),
    }
}

/// An `.xlsx` workbook decoded from memory. Sheets are decoded on demand.
pub struct XlsxWorkbook {
    inner: Xlsx<Cursor<Vec<u8>>>,
}

impl XlsxWorkbook {
    /// Open a workbook from raw file bytes
    ///
    /// # Errors
    ///
    /// Returns error if the bytes are not a readable xlsx container.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let inner = Xlsx::new(Cursor::new(bytes))?;
        Ok(Self { inner })
    }

    /// Open a workbook from a file on disk
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or decoded.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(bytes)
    }
}

impl SheetSource for XlsxWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.inner
            .sheet_names()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    fn load_sheet(&mut self, name: &str) -> Result<Sheet> {
        let range = self.inner.worksheet_range(name)?;

        let data: Vec<Vec<CellValue>> = range
            .rows()
            .map(|row| row.iter().map(data_to_cell_value).collect())
            .collect();

        let mut sheet = Sheet::with_name(name);
        *sheet.data_mut() = data;
        Ok(sheet)
    }
}

/// Write sheet data to a worksheet
fn write_to_worksheet(worksheet: &mut Worksheet, name: &str, sheet: &Sheet) -> Result<()> {
    worksheet.set_name(name)?;

    for (row_idx, row) in sheet.data().iter().enumerate() {
        let row_num = u32::try_from(row_idx)
            .map_err(|_| SheetError::IndexOverflow(format!("row {row_idx}")))?;

        for (col_idx, cell) in row.iter().enumerate() {
            let col_num = u16::try_from(col_idx)
                .map_err(|_| SheetError::IndexOverflow(format!("column {col_idx}")))?;

            match cell {
                CellValue::Null => {} // Leave empty
                CellValue::Bool(b) => {
                    worksheet.write_boolean(row_num, col_num, *b)?;
                }
                CellValue::Int(i) => {
                    // Note: Excel stores all numbers as f64, so integers > 2^53
                    // may lose precision
                    worksheet.write_number(row_num, col_num, *i as f64)?;
                }
                CellValue::Float(f) => {
                    worksheet.write_number(row_num, col_num, *f)?;
                }
                CellValue::String(s) => {
                    worksheet.write_string(row_num, col_num, s)?;
                }
            }
        }
    }

    Ok(())
}

impl Book {
    fn to_workbook(&self) -> Result<Workbook> {
        let mut workbook = Workbook::new();

        for (name, sheet) in self.sheets() {
            let worksheet = workbook.add_worksheet();
            write_to_worksheet(worksheet, name, sheet)?;
        }

        Ok(workbook)
    }

    /// Save the book to an Excel file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be created or written.
    pub fn save_as_xlsx<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut workbook = self.to_workbook()?;
        workbook.save(path.as_ref())?;
        Ok(())
    }

    /// Encode the book as xlsx file bytes
    ///
    /// # Errors
    ///
    /// Returns error if the workbook cannot be encoded.
    pub fn to_xlsx_bytes(&self) -> Result<Vec<u8>> {
        let mut workbook = self.to_workbook()?;
        Ok(workbook.save_to_buffer()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn orders_book() -> Book {
        let mut book = Book::new();
        book.add_sheet(
            "Sheet1",
            Sheet::from_data(vec![
                vec![CellValue::from("상품명"), CellValue::from("수량"), CellValue::from("결제금액")],
                vec![CellValue::from("상품A"), CellValue::Int(2), CellValue::Float(20000.0)],
                vec![CellValue::from("상품B"), CellValue::Int(1), CellValue::from("15000")],
            ]),
        )
        .unwrap();
        book.add_sheet("Excel", Sheet::from_data(vec![vec!["x"]]))
            .unwrap();
        book
    }

    #[test]
    fn test_xlsx_bytes_roundtrip() {
        let bytes = orders_book().to_xlsx_bytes().unwrap();
        let mut workbook = XlsxWorkbook::from_bytes(bytes).unwrap();

        assert_eq!(workbook.sheet_names(), vec!["Sheet1", "Excel"]);

        let sheet = workbook.load_sheet("Sheet1").unwrap();
        assert_eq!(sheet.row_count(), 3);

        let records = sheet.records();
        assert_eq!(records[0]["상품명"], CellValue::from("상품A"));
        // Int becomes Float in Excel
        assert!(matches!(records[0]["수량"], CellValue::Float(f) if (f - 2.0).abs() < 0.01));
        assert_eq!(records[1]["결제금액"], CellValue::from("15000"));
    }

    #[test]
    fn test_save_and_open() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("orders.xlsx");

        orders_book().save_as_xlsx(&path).unwrap();

        let mut workbook = XlsxWorkbook::open(&path).unwrap();
        let sheet = workbook.load_sheet("Excel").unwrap();
        assert_eq!(sheet.name(), "Excel");
        assert_eq!(sheet.row_count(), 1);
    }

    #[test]
    fn test_missing_sheet_is_error() {
        let bytes = orders_book().to_xlsx_bytes().unwrap();
        let mut workbook = XlsxWorkbook::from_bytes(bytes).unwrap();
        assert!(matches!(
            workbook.load_sheet("발주발송관리"),
            Err(SheetError::Read(_))
        ));
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        let result = XlsxWorkbook::from_bytes(b"not a workbook".to_vec());
        assert!(matches!(result, Err(SheetError::Read(_))));
    }
}
