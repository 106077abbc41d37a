//! Rendering aggregated records for the terminal.

use anyhow::{Context, Result};
use comfy_table::presets::ASCII_FULL;
use comfy_table::Table;
use xlconv_core::{AggregatedRecord, OUTPUT_COLUMNS};

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Pretty table output (default)
    #[default]
    Table,
}

/// Render records in the requested format.
pub fn render(records: &[AggregatedRecord], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(records)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(records).context("Failed to encode records as JSON")
        }
        OutputFormat::Csv => render_csv(records),
    }
}

fn cells(record: &AggregatedRecord) -> [String; 7] {
    [
        record.date.clone(),
        record.channel_code.to_string(),
        record.category.clone(),
        record.product_name.clone(),
        record.option.clone(),
        record.quantity.to_string(),
        record.sales.to_string(),
    ]
}

/// ASCII table with one row per record.
fn render_table(records: &[AggregatedRecord]) -> String {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL).set_header(OUTPUT_COLUMNS);
    for record in records {
        table.add_row(cells(record));
    }
    table.to_string()
}

fn render_csv(records: &[AggregatedRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if records.is_empty() {
        writer.write_record(OUTPUT_COLUMNS)?;
    }
    for record in records {
        writer.serialize(record)?;
    }
    let bytes = writer.into_inner().context("Failed to flush CSV output")?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}
