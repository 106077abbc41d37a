//! Per-file grouping of resolved rows by product and option.

use crate::error::{AggregateError, RowError};
use crate::observe::{ConvertObserver, TracingObserver};
use crate::record::{AggregatedRecord, FileRecord};
use crate::resolve::{ResolvedFields, ResolverTable};
use indexmap::IndexMap;

#[derive(Debug, Clone, Copy)]
struct Totals {
    quantity: i64,
    sales: f64,
}

/// Groups keyed by `(product name, option)`, in first-seen order.
type Accumulator = IndexMap<(String, String), Totals>;

/// Add one row to its group, leaving the group untouched on overflow.
fn fold_row(groups: &mut Accumulator, fields: ResolvedFields) -> Result<(), RowError> {
    let ResolvedFields {
        product_name,
        option,
        quantity,
        sales,
    } = fields;

    let overflow = |sales_overflow: bool, product: &str, option: &str| {
        let (product, option) = (product.to_string(), option.to_string());
        if sales_overflow {
            RowError::SalesOverflow { product, option }
        } else {
            RowError::QuantityOverflow { product, option }
        }
    };

    if !sales.is_finite() {
        return Err(overflow(true, &product_name, &option));
    }

    let key = (product_name, option);
    match groups.get_mut(&key) {
        Some(totals) => {
            let quantity = totals
                .quantity
                .checked_add(quantity)
                .ok_or_else(|| overflow(false, &key.0, &key.1))?;
            let sales = totals.sales + sales;
            if !sales.is_finite() {
                return Err(overflow(true, &key.0, &key.1));
            }
            *totals = Totals { quantity, sales };
        }
        None => {
            groups.insert(key, Totals { quantity, sales });
        }
    }

    Ok(())
}

/// Folds files into [`AggregatedRecord`]s using a [`ResolverTable`].
#[derive(Debug, Clone)]
pub struct Aggregator {
    table: ResolverTable,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(ResolverTable::standard())
    }
}

impl Aggregator {
    #[must_use]
    pub fn new(table: ResolverTable) -> Self {
        Self { table }
    }

    /// Aggregate a single file. Bad rows are reported and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::NoRule`] when the table has no rule (and no
    /// fallback) for the file's channel and name.
    pub fn aggregate_file(
        &self,
        file: &FileRecord,
        observer: &dyn ConvertObserver,
    ) -> Result<Vec<AggregatedRecord>, AggregateError> {
        let rule = self
            .table
            .select(file.channel, &file.file_name)
            .ok_or_else(|| AggregateError::NoRule {
                file: file.file_name.clone(),
                channel: file.channel,
            })?;

        let mut groups = Accumulator::new();
        for (index, row) in file.rows.iter().enumerate() {
            if let Err(e) = fold_row(&mut groups, rule.resolve(row)) {
                observer.row_skipped(&file.file_name, index, &e);
            }
        }

        let records: Vec<AggregatedRecord> = groups
            .into_iter()
            .map(|((product_name, option), totals)| AggregatedRecord {
                date: file.date.clone(),
                channel_code: file.channel,
                category: String::new(),
                product_name,
                option,
                quantity: totals.quantity,
                sales: totals.sales,
            })
            .collect();

        observer.file_aggregated(&file.file_name, records.len());
        Ok(records)
    }

    /// Aggregate every file in order and concatenate the results.
    ///
    /// Groups are never merged across files. A file that fails as a whole is
    /// reported and skipped.
    pub fn aggregate(
        &self,
        files: &[FileRecord],
        observer: &dyn ConvertObserver,
    ) -> Vec<AggregatedRecord> {
        let mut output = Vec::new();

        for file in files {
            match self.aggregate_file(file, observer) {
                Ok(records) => output.extend(records),
                Err(e) => observer.file_skipped(&e),
            }
        }

        output
    }
}

/// Aggregate with the standard rule table, logging through `tracing`.
#[must_use]
pub fn aggregate(files: &[FileRecord]) -> Vec<AggregatedRecord> {
    Aggregator::default().aggregate(files, &TracingObserver)
}
