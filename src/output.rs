//! Output formatting and persistence for reports and record sets.
//!
//! Supports pretty-printing, JSON files, and CSV export.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::records::FlightRecord;
use csv::WriterBuilder;
use std::fs::File;
use std::io::{BufWriter, Write};

/// Logs a value using Rust's debug pretty-print format.
pub fn print_pretty<T: std::fmt::Debug>(value: &T) {
    debug!("{:#?}", value);
}

/// Logs a value as pretty-printed JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes a value as pretty-printed JSON to `path`, replacing any existing file.
pub fn write_json<T: Serialize + ?Sized>(path: &str, value: &T) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create '{path}'"))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    info!(path, "JSON written");
    Ok(())
}

/// Writes records to a CSV file with a header row, replacing any existing file.
///
/// Column names match the parser's recognized headers, so the file can be
/// loaded back in.
pub fn write_records(path: &str, records: &[FlightRecord]) -> Result<()> {
    debug!(path, rows = records.len(), "Writing CSV records");

    let file = File::create(path).with_context(|| format!("Failed to create '{path}'"))?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}
