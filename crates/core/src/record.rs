//! Input and output records.

use crate::channel::ChannelCode;
use serde::{Deserialize, Serialize};
use xlconv_sheet::Row;

/// Column order of the aggregated output table.
pub const OUTPUT_COLUMNS: [&str; 7] = [
    "date",
    "channelCode",
    "category",
    "productName",
    "option",
    "quantity",
    "sales",
];

/// One uploaded file's rows plus the date and channel taken from its name.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub file_name: String,
    /// `YYYY/MM/DD`
    pub date: String,
    pub channel: ChannelCode,
    pub rows: Vec<Row>,
}

/// Totals for one product + option within one source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedRecord {
    pub date: String,
    pub channel_code: ChannelCode,
    /// Reserved; always empty.
    pub category: String,
    pub product_name: String,
    pub option: String,
    pub quantity: i64,
    pub sales: f64,
}
