//! Conversion options.

use chrono::NaiveDate;

/// Extension every input file name must end with.
pub const DEFAULT_EXTENSION: &str = ".xlsx";

/// Name of the single sheet in the exported workbook.
pub const DEFAULT_OUTPUT_SHEET: &str = "AggregatedData";

/// Options for a conversion run
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Required file name suffix, compared exactly (case-sensitive)
    pub extension: String,
    /// Sheet name used when exporting results
    pub output_sheet: String,
    /// Date used for files whose name carries none; `None` means today
    pub today: Option<NaiveDate>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            output_sheet: DEFAULT_OUTPUT_SHEET.to_string(),
            today: None,
        }
    }
}

impl ConvertOptions {
    /// Set the required file name suffix
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Set the exported sheet name
    #[must_use]
    pub fn with_output_sheet(mut self, name: impl Into<String>) -> Self {
        self.output_sheet = name.into();
        self
    }

    /// Pin the fallback date instead of reading the local clock
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub(crate) fn today(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}
