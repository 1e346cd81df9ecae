//! Loads a flight dataset from a file or URL.
//!
//! Loading never fails: if the source can't be read, or yields no rows, the
//! generated sample dataset is used instead and the reason is logged.

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use serde::Serialize;
use std::io::Read;
use tracing::{debug, error, info, warn};

use crate::fetch::{BasicClient, fetch_bytes};
use crate::parser::parse_flights;
use crate::records::FlightRecord;
use crate::sample::generate_sample;

/// Where a dataset's records came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DatasetOrigin {
    /// Parsed from the source.
    Parsed,
    /// The source had no data rows; records are generated.
    SampleEmpty,
    /// The source could not be read or parsed; records are generated.
    SampleFailed { reason: String },
}

impl DatasetOrigin {
    pub fn is_sample(&self) -> bool {
        !matches!(self, DatasetOrigin::Parsed)
    }
}

/// An immutable record set plus its provenance.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<FlightRecord>,
    pub origin: DatasetOrigin,
}

impl Dataset {
    fn sample(origin: DatasetOrigin) -> Self {
        Dataset {
            records: generate_sample(),
            origin,
        }
    }
}

/// Reads raw bytes from a local path or an `http(s)://` URL.
#[tracing::instrument]
pub async fn read_source(source: &str) -> Result<Vec<u8>> {
    let bytes = if source.starts_with("http://") || source.starts_with("https://") {
        let client = BasicClient::new()?;
        fetch_bytes(&client, source).await?
    } else {
        tokio::fs::read(source)
            .await
            .with_context(|| format!("Failed to read '{source}'"))?
    };
    debug!(bytes = bytes.len(), "Source read");
    Ok(bytes)
}

/// Decodes source bytes to text, gunzipping first when `source` ends in `.gz`.
pub fn decode_text(source: &str, bytes: Vec<u8>) -> Result<String> {
    if source.ends_with(".gz") {
        let mut text = String::new();
        GzDecoder::new(bytes.as_slice())
            .read_to_string(&mut text)
            .with_context(|| format!("Failed to decompress '{source}'"))?;
        return Ok(text);
    }
    String::from_utf8(bytes).with_context(|| format!("'{source}' is not valid UTF-8"))
}

/// Parses `text`, substituting the sample dataset when it has no rows or
/// the parse fails.
pub fn dataset_from_text(text: &str) -> Dataset {
    match parse_flights(text) {
        Ok(records) if records.is_empty() => {
            warn!("No flight rows found, using generated sample data");
            Dataset::sample(DatasetOrigin::SampleEmpty)
        }
        Ok(records) => {
            info!(records = records.len(), "Flight data parsed");
            Dataset {
                records,
                origin: DatasetOrigin::Parsed,
            }
        }
        Err(e) => {
            error!(error = %e, "Flight data parse failed, using generated sample data");
            Dataset::sample(DatasetOrigin::SampleFailed {
                reason: e.to_string(),
            })
        }
    }
}

/// Reads, decodes and parses `source` into a dataset.
#[tracing::instrument]
pub async fn load_dataset(source: &str) -> Dataset {
    let text = match read_source(source).await {
        Ok(bytes) => decode_text(source, bytes),
        Err(e) => Err(e),
    };

    match text {
        Ok(text) => dataset_from_text(&text),
        Err(e) => {
            let reason = format!("{e:#}");
            error!(error = %reason, "Flight data read failed, using generated sample data");
            Dataset::sample(DatasetOrigin::SampleFailed { reason })
        }
    }
}
