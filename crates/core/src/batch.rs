//! Sequential batch conversion: read, parse and aggregate files in order.

use crate::aggregate::Aggregator;
use crate::classify::DateSource;
use crate::error::{ConvertError, ConvertResult};
use crate::export::records_to_book;
use crate::ingest::{check_file_type, parse_workbook, WorkbookReader, XlsxReader};
use crate::observe::{ConvertObserver, TracingObserver};
use crate::options::ConvertOptions;
use crate::record::{AggregatedRecord, FileRecord};
use crate::resolve::ResolverTable;
use std::path::{Path, PathBuf};

/// Share of the progress bar spent reading files.
const PARSE_PROGRESS: f64 = 90.0;
/// Progress reported before aggregation starts.
const AGGREGATE_PROGRESS: f64 = 95.0;

/// A file handed to the converter in memory.
#[derive(Debug, Clone)]
pub struct InputFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl InputFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// How a batch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// At least one file parsed; `items` aggregated records were produced.
    Converted { items: usize, failed_files: usize },
    /// No file could be parsed.
    NoData { failed_files: usize },
}

/// Everything a batch produced.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Aggregated records of every parsed file, in input order.
    pub records: Vec<AggregatedRecord>,
    /// Files that were rejected, in input order.
    pub failures: Vec<ConvertError>,
    /// Number of files that parsed successfully.
    pub parsed_files: usize,
}

impl BatchReport {
    #[must_use]
    pub fn outcome(&self) -> BatchOutcome {
        let failed_files = self.failures.len();
        if self.parsed_files == 0 {
            BatchOutcome::NoData { failed_files }
        } else {
            BatchOutcome::Converted {
                items: self.records.len(),
                failed_files,
            }
        }
    }

    #[must_use]
    pub fn has_data(&self) -> bool {
        self.parsed_files > 0
    }
}

/// Converts batches of sales exports into aggregated records.
pub struct Converter {
    options: ConvertOptions,
    aggregator: Aggregator,
    reader: Box<dyn WorkbookReader>,
    observer: Box<dyn ConvertObserver>,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter {
    /// A converter reading `.xlsx` files with the standard rule table,
    /// reporting through `tracing`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: ConvertOptions::default(),
            aggregator: Aggregator::default(),
            reader: Box::new(XlsxReader),
            observer: Box::new(TracingObserver),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_table(mut self, table: ResolverTable) -> Self {
        self.aggregator = Aggregator::new(table);
        self
    }

    #[must_use]
    pub fn with_reader(mut self, reader: impl WorkbookReader + 'static) -> Self {
        self.reader = Box::new(reader);
        self
    }

    #[must_use]
    pub fn with_observer(mut self, observer: impl ConvertObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Check, open and parse one file.
    ///
    /// # Errors
    ///
    /// Returns the per-file [`ConvertError`] that rejected the file.
    pub fn parse_file(&self, name: &str, bytes: Vec<u8>) -> ConvertResult<FileRecord> {
        check_file_type(name, &self.options.extension)?;

        let mut source = self
            .reader
            .open(bytes)
            .map_err(|e| ConvertError::parsing(name, format!("could not parse workbook: {e}")))?;

        let parsed = parse_workbook(name, source.as_mut(), self.options.today())?;

        if parsed.classification.date_source == DateSource::Today {
            self.observer.date_fallback(name, &parsed.record.date);
        }
        self.observer
            .file_parsed(name, &parsed.sheet, parsed.record.rows.len());

        Ok(parsed.record)
    }

    async fn read_path(&self, name: &str, path: &Path) -> ConvertResult<FileRecord> {
        check_file_type(name, &self.options.extension)?;

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ConvertError::parsing(name, format!("could not read file: {e}")))?;

        self.parse_file(name, bytes)
    }

    /// Convert in-memory files in order.
    pub fn convert(&self, inputs: Vec<InputFile>) -> BatchReport {
        let mut run = Run::new(self, inputs.len());

        for (index, input) in inputs.into_iter().enumerate() {
            run.start(index, &input.name);
            let result = self.parse_file(&input.name, input.bytes);
            run.record(index, result);
        }

        run.finish()
    }

    /// Read and convert files from disk, one after another.
    pub async fn convert_paths(&self, paths: &[PathBuf]) -> BatchReport {
        let mut run = Run::new(self, paths.len());

        for (index, path) in paths.iter().enumerate() {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());

            run.start(index, &name);
            let result = self.read_path(&name, path).await;
            run.record(index, result);
        }

        run.finish()
    }

    /// Write records to an `.xlsx` file using the configured sheet name.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be written.
    pub fn export<P: AsRef<Path>>(
        &self,
        records: &[AggregatedRecord],
        path: P,
    ) -> xlconv_sheet::Result<()> {
        records_to_book(records, &self.options.output_sheet)?.save_as_xlsx(path)
    }
}

/// Bookkeeping for one batch; progress only moves between files.
struct Run<'a> {
    converter: &'a Converter,
    total: usize,
    parsed: Vec<FileRecord>,
    failures: Vec<ConvertError>,
}

impl<'a> Run<'a> {
    fn new(converter: &'a Converter, total: usize) -> Self {
        converter.observer.progress(0.0);
        Self {
            converter,
            total,
            parsed: Vec::new(),
            failures: Vec::new(),
        }
    }

    fn slice_start(&self, index: usize) -> f64 {
        index as f64 / self.total as f64 * PARSE_PROGRESS
    }

    fn start(&self, index: usize, name: &str) {
        let observer = &self.converter.observer;
        observer.file_started(index, self.total, name);
        observer.progress(self.slice_start(index));
    }

    fn record(&mut self, index: usize, result: ConvertResult<FileRecord>) {
        match result {
            Ok(record) => {
                self.parsed.push(record);
                self.converter.observer.progress(self.slice_start(index + 1));
            }
            Err(e) => {
                self.converter.observer.file_failed(&e);
                self.failures.push(e);
            }
        }
    }

    fn finish(self) -> BatchReport {
        let observer = self.converter.observer.as_ref();
        observer.progress(AGGREGATE_PROGRESS);

        let records = if self.parsed.is_empty() {
            Vec::new()
        } else {
            self.converter.aggregator.aggregate(&self.parsed, observer)
        };

        observer.progress(100.0);

        let report = BatchReport {
            records,
            failures: self.failures,
            parsed_files: self.parsed.len(),
        };
        observer.batch_finished(&report.outcome());
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::observe::NoopObserver;
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use std::rc::Rc;
    use xlconv_sheet::{Book, CellValue, Sheet, SheetSource};

    /// Ignores the bytes and hands out a fixed in-memory book.
    struct BookReader(Book);

    impl WorkbookReader for BookReader {
        fn open(&self, _bytes: Vec<u8>) -> xlconv_sheet::Result<Box<dyn SheetSource>> {
            Ok(Box::new(self.0.clone()))
        }
    }

    #[derive(Clone, Default)]
    struct Progress(Rc<RefCell<Vec<f64>>>);

    impl ConvertObserver for Progress {
        fn progress(&self, percent: f64) {
            self.0.borrow_mut().push(percent);
        }
    }

    fn mall_book() -> Book {
        let mut book = Book::new();
        book.add_sheet(
            "Excel",
            Sheet::from_data(vec![
                vec![
                    CellValue::from("상품명"),
                    CellValue::from("단품명"),
                    CellValue::from("수량"),
                    CellValue::from("결제금액"),
                ],
                vec![
                    CellValue::from("상품A"),
                    CellValue::from("옵션1"),
                    CellValue::Int(2),
                    CellValue::Int(20000),
                ],
            ]),
        )
        .unwrap();
        book
    }

    fn converter(book: Book) -> Converter {
        Converter::new()
            .with_reader(BookReader(book))
            .with_observer(NoopObserver)
    }

    #[test]
    fn test_convert_in_memory() {
        let report = converter(mall_book()).convert(vec![
            InputFile::new("복지_240331.xlsx", Vec::new()),
            InputFile::new("notes.txt", Vec::new()),
        ]);

        assert_eq!(report.parsed_files, 1);
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].kind(), ErrorKind::InvalidFileType);
        assert_eq!(
            report.outcome(),
            BatchOutcome::Converted {
                items: 1,
                failed_files: 1
            }
        );
    }

    #[test]
    fn test_all_failed_is_no_data() {
        let report = converter(Book::new()).convert(vec![InputFile::new("a.xlsx", Vec::new())]);

        assert!(!report.has_data());
        assert!(report.records.is_empty());
        assert_eq!(report.failures[0].kind(), ErrorKind::ParsingError);
        assert_eq!(report.outcome(), BatchOutcome::NoData { failed_files: 1 });
    }

    #[test]
    fn test_progress_moves_per_file() {
        let progress = Progress::default();
        let converter = Converter::new()
            .with_reader(BookReader(mall_book()))
            .with_observer(progress.clone());

        converter.convert(vec![
            InputFile::new("복지_240331.xlsx", Vec::new()),
            InputFile::new("bad.csv", Vec::new()),
        ]);

        // start, file 1 start/end, file 2 start (fails), aggregate, done
        assert_eq!(
            *progress.0.borrow(),
            vec![0.0, 0.0, 45.0, 45.0, 95.0, 100.0]
        );
    }

    #[test]
    fn test_fixed_today_for_unmatched_names() {
        let options =
            ConvertOptions::default().with_today(NaiveDate::from_ymd_opt(2024, 12, 25).unwrap());
        let converter = converter(mall_book()).with_options(options);

        let record = converter.parse_file("orders.xlsx", Vec::new()).unwrap();
        assert_eq!(record.date, "2024/12/25");
    }

    #[tokio::test]
    async fn test_missing_path_is_parsing_error() {
        let dir = tempfile::tempdir().unwrap();
        let report = Converter::new()
            .with_observer(NoopObserver)
            .convert_paths(&[dir.path().join("복지_240331.xlsx")])
            .await;

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].kind(), ErrorKind::ParsingError);
        assert_eq!(report.failures[0].file(), "복지_240331.xlsx");
    }
}
