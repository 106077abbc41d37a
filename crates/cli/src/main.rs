//! # xlconv-cli
//!
//! Command-line interface for converting sales exports.

mod console;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use console::ConsoleObserver;
use output::{render, OutputFormat};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use xlconv_core::{BatchReport, Converter};

/// xlconv - merge multi-channel sales exports into one table
#[derive(Parser)]
#[command(name = "xlconv")]
#[command(author, version, about = "Aggregate sales exports by product and option", long_about = None)]
struct Cli {
    /// Spreadsheet files to convert, processed in order
    #[arg(value_name = "FILES", required = true)]
    files: Vec<PathBuf>,

    /// Output workbook path
    #[arg(short = 'o', long = "output", default_value = "aggregated_data.xlsx")]
    output: PathBuf,

    /// Output format (json, csv, table)
    #[arg(short = 'f', long = "format", default_value = "table")]
    format: OutputFormat,

    /// Print results without writing the workbook
    #[arg(long = "no-export")]
    no_export: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let converter = Converter::new().with_observer(ConsoleObserver::new(!cli.verbose));
    let report = converter.convert_paths(&cli.files).await;

    if let Some(written) = finish(&converter, &report, &cli)? {
        println!(
            "{} {}",
            "Saved".green().bold(),
            written.display().to_string().cyan()
        );
    }

    Ok(())
}

/// Print the records and export them. Returns the written path, if any.
fn finish(converter: &Converter, report: &BatchReport, cli: &Cli) -> Result<Option<PathBuf>> {
    if !report.has_data() {
        return Ok(None);
    }

    println!("{}", render(&report.records, cli.format)?);

    if cli.no_export {
        return Ok(None);
    }

    converter
        .export(&report.records, &cli.output)
        .with_context(|| format!("Failed to write workbook: {}", cli.output.display()))?;
    tracing::info!(path = %cli.output.display(), records = report.records.len(), "workbook written");

    Ok(Some(cli.output.clone()))
}
