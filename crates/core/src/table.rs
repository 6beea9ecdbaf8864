//! Input and output tables.
//!
//! Input is a CSV file with at least a `URL_ID` and a `URL` column. Output
//! has one row per input row, with `URL_ID`, `URL` and the metric columns in
//! a fixed order, written as CSV or JSON.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::metrics::MetricRecord;
use crate::{LexisError, Result};

pub const URL_ID_COLUMN: &str = "URL_ID";
pub const URL_COLUMN: &str = "URL";

/// One article to analyze.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    #[serde(rename = "URL_ID")]
    pub url_id: String,
    #[serde(rename = "URL")]
    pub url: String,
}

impl InputRecord {
    pub fn new(url_id: impl Into<String>, url: impl Into<String>) -> Self {
        Self { url_id: url_id.into(), url: url.into() }
    }
}

/// One result row: the input identity plus its metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRow {
    #[serde(rename = "URL_ID")]
    pub url_id: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(flatten)]
    pub metrics: MetricRecord,
}

impl OutputRow {
    pub fn new(record: &InputRecord, metrics: MetricRecord) -> Self {
        Self { url_id: record.url_id.clone(), url: record.url.clone(), metrics }
    }

    /// Row for an article whose text could not be obtained.
    pub fn zero(record: &InputRecord) -> Self {
        Self::new(record, MetricRecord::zero())
    }

    /// Output header, in column order.
    pub fn header() -> Vec<&'static str> {
        let mut header = vec![URL_ID_COLUMN, URL_COLUMN];
        header.extend(MetricRecord::COLUMNS);
        header
    }
}

/// Result table format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFormat {
    #[default]
    Csv,
    Json,
}

impl FromStr for TableFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: csv, json", s)),
        }
    }
}

impl TableFormat {
    /// Guesses the format from a file extension, defaulting to CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Csv,
        }
    }
}

/// Reads the input table from a CSV file.
pub fn read_input<P: AsRef<Path>>(path: P) -> Result<Vec<InputRecord>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LexisError::FileNotFound(path.to_path_buf()));
    }
    read_input_from(File::open(path)?)
}

/// Reads input records from CSV data with a header row.
///
/// Extra columns are ignored. Rows with an empty `URL_ID` or `URL` are
/// skipped with a warning.
pub fn read_input_from<R: Read>(reader: R) -> Result<Vec<InputRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).trim(csv::Trim::All).from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}') == name)
            .ok_or_else(|| LexisError::InputError(format!("missing column '{}'", name)))
    };
    let id_idx = column(URL_ID_COLUMN)?;
    let url_idx = column(URL_COLUMN)?;

    let mut records = Vec::new();
    for (line, row) in csv_reader.records().enumerate() {
        let row = row?;
        let url_id = row.get(id_idx).unwrap_or_default();
        let url = row.get(url_idx).unwrap_or_default();

        if url_id.is_empty() || url.is_empty() {
            warn!(row = line + 1, "skipping input row with missing URL_ID or URL");
            continue;
        }

        records.push(InputRecord::new(url_id, url));
    }

    Ok(records)
}

/// Writes rows as CSV with the exact output header.
pub fn write_csv<W: Write>(rows: &[OutputRow], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(OutputRow::header())?;

    for row in rows {
        let mut record = vec![row.url_id.clone(), row.url.clone()];
        record.extend(row.metrics.cells());
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Writes rows as a JSON array of objects keyed by column name.
pub fn write_json<W: Write>(rows: &[OutputRow], writer: W, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, rows)?;
    } else {
        serde_json::to_writer(writer, rows)?;
    }
    Ok(())
}

/// Writes rows to `path` in the given format, replacing any existing file.
pub fn write_output<P: AsRef<Path>>(rows: &[OutputRow], path: P, format: TableFormat) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    match format {
        TableFormat::Csv => write_csv(rows, file),
        TableFormat::Json => write_json(rows, file, true),
    }
}
