use crate::error::{Result, SheetError};
use crate::sheet::Sheet;
use indexmap::IndexMap;

/// Read access to a workbook: ordered sheet names plus on-demand sheet loads.
///
/// Implemented by the in-memory [`Book`] and by the lazily decoded
/// [`XlsxWorkbook`](crate::XlsxWorkbook).
pub trait SheetSource {
    /// Sheet names in workbook order
    fn sheet_names(&self) -> Vec<String>;

    /// Load one sheet by name
    fn load_sheet(&mut self, name: &str) -> Result<Sheet>;
}

/// A book containing multiple sheets (preserves insertion order)
#[derive(Debug, Clone)]
pub struct Book {
    sheets: IndexMap<String, Sheet>,
}

impl Book {
    /// Create a new empty book
    #[must_use]
    pub fn new() -> Self {
        Book {
            sheets: IndexMap::new(),
        }
    }

    /// Get a sheet by name
    pub fn get_sheet(&self, name: &str) -> Result<&Sheet> {
        self.sheets
            .get(name)
            .ok_or_else(|| SheetError::SheetNotFound {
                name: name.to_string(),
            })
    }

    /// Add a sheet to the book; the sheet takes the given name
    pub fn add_sheet(&mut self, name: &str, mut sheet: Sheet) -> Result<()> {
        if self.sheets.contains_key(name) {
            return Err(SheetError::SheetAlreadyExists {
                name: name.to_string(),
            });
        }
        sheet.set_name(name);
        self.sheets.insert(name.to_string(), sheet);
        Ok(())
    }

    /// Iterate over `(name, sheet)` pairs in order
    pub fn sheets(&self) -> impl Iterator<Item = (&str, &Sheet)> {
        self.sheets.iter().map(|(name, sheet)| (name.as_str(), sheet))
    }
}

impl Default for Book {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetSource for Book {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.keys().cloned().collect()
    }

    fn load_sheet(&mut self, name: &str) -> Result<Sheet> {
        self.get_sheet(name).cloned()
    }
}
