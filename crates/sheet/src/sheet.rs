use crate::cell::CellValue;
use indexmap::IndexMap;
use std::collections::HashSet;

/// A data row keyed by header name (preserves column order).
///
/// Empty cells are not present in the map.
pub type Row = IndexMap<String, CellValue>;

/// Header assigned to a header cell with no text.
const EMPTY_HEADER: &str = "__EMPTY";

/// A sheet representing a 2D grid of cells (row-major storage)
#[derive(Debug, Clone)]
pub struct Sheet {
    name: String,
    data: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Create a new empty sheet
    #[must_use]
    pub fn new() -> Self {
        Self::with_name("Sheet1")
    }

    /// Create a new empty sheet with a name
    #[must_use]
    pub fn with_name(name: &str) -> Self {
        Sheet {
            name: name.to_string(),
            data: Vec::new(),
        }
    }

    /// Create a sheet from a 2D vector of values
    #[must_use]
    pub fn from_data<T: Into<CellValue>>(data: Vec<Vec<T>>) -> Self {
        let converted: Vec<Vec<CellValue>> = data
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();

        Sheet {
            name: "Sheet1".to_string(),
            data: converted,
        }
    }

    /// Get the sheet name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Get the number of rows (header row included)
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to the raw data
    #[must_use]
    pub fn data(&self) -> &Vec<Vec<CellValue>> {
        &self.data
    }

    /// Get a mutable reference to the raw data
    pub fn data_mut(&mut self) -> &mut Vec<Vec<CellValue>> {
        &mut self.data
    }

    /// Header names taken from the first row.
    ///
    /// Blank header cells are named `__EMPTY`, `__EMPTY_1`, ... and repeated
    /// names get `_1`, `_2`, ... suffixes so every column keeps a distinct key.
    #[must_use]
    pub fn headers(&self) -> Vec<String> {
        let Some(header_row) = self.data.first() else {
            return Vec::new();
        };

        let mut seen: HashSet<String> = HashSet::new();
        let mut names = Vec::with_capacity(header_row.len());

        for cell in header_row {
            let base = if cell.is_blank() {
                EMPTY_HEADER.to_string()
            } else {
                cell.to_text()
            };

            let mut name = base.clone();
            let mut suffix = 1;
            while seen.contains(&name) {
                name = format!("{base}_{suffix}");
                suffix += 1;
            }

            seen.insert(name.clone());
            names.push(name);
        }

        names
    }

    /// Data rows keyed by header, skipping rows with no non-empty cell.
    #[must_use]
    pub fn records(&self) -> Vec<Row> {
        let headers = self.headers();

        self.data
            .iter()
            .skip(1)
            .filter_map(|cells| {
                let row: Row = cells
                    .iter()
                    .zip(headers.iter())
                    .filter(|(cell, _)| !cell.is_null())
                    .map(|(cell, header)| (header.clone(), cell.clone()))
                    .collect();

                let has_value = row.values().any(|cell| !cell.is_blank());
                has_value.then_some(row)
            })
            .collect()
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_keyed_by_header() {
        let sheet = Sheet::from_data(vec![
            vec![CellValue::from("상품명"), CellValue::from("수량")],
            vec![CellValue::from("상품A"), CellValue::Int(2)],
            vec![CellValue::from("상품B"), CellValue::Int(1)],
        ]);

        let records = sheet.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["상품명"], CellValue::from("상품A"));
        assert_eq!(records[1]["수량"], CellValue::Int(1));
    }

    #[test]
    fn test_records_skip_blank_rows_and_cells() {
        let sheet = Sheet::from_data(vec![
            vec![CellValue::from("a"), CellValue::from("b")],
            vec![CellValue::Null, CellValue::Null],
            vec![CellValue::Int(1), CellValue::Null],
        ]);

        let records = sheet.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].len(), 1);
        assert!(records[0].get("b").is_none());
    }

    #[test]
    fn test_headers_empty_and_duplicate() {
        let sheet = Sheet::from_data(vec![vec![
            CellValue::from("옵션"),
            CellValue::Null,
            CellValue::from("옵션"),
            CellValue::from(""),
            CellValue::from("옵션"),
        ]]);

        assert_eq!(
            sheet.headers(),
            vec!["옵션", "__EMPTY", "옵션_1", "__EMPTY_1", "옵션_2"]
        );
    }

    #[test]
    fn test_header_only_sheet_has_no_records() {
        let sheet = Sheet::from_data(vec![vec!["상품명", "수량"]]);
        assert!(sheet.records().is_empty());
        assert!(Sheet::new().records().is_empty());
    }
}
