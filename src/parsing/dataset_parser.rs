use std::fs;
use std::path::Path;

use crate::error::LoadError;
use crate::parsing::normalize::normalize_rows;
use crate::parsing::rows::{CsvRow, JsonRow, RawRow};
use crate::types::dataset::Dataset;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Csv,
    Json,
}

impl DataFormat {
    /// Picks the format from the file extension, falling back to the content.
    pub fn detect(path: &Path, content: &str) -> Self {
        match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
            Some("csv") => DataFormat::Csv,
            Some("json") => DataFormat::Json,
            _ => Self::sniff(content),
        }
    }

    pub fn sniff(content: &str) -> Self {
        match strip_bom(content).trim_start().chars().next() {
            Some('[') => DataFormat::Json,
            _ => DataFormat::Csv,
        }
    }
}

fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{feff}').unwrap_or(content)
}

pub fn parse_json_dataset(content: &str) -> Result<Dataset, LoadError> {
    let rows: Vec<JsonRow> = serde_json::from_str(strip_bom(content))?;
    Ok(normalize_rows(rows.into_iter().map(RawRow::from)))
}

pub fn parse_csv_dataset(content: &str) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(strip_bom(content).as_bytes());

    let mut rows = Vec::new();
    for record in reader.deserialize::<CsvRow>() {
        rows.push(RawRow::from(record?));
    }
    Ok(normalize_rows(rows))
}

pub fn parse_dataset(format: DataFormat, content: &str) -> Result<Dataset, LoadError> {
    match format {
        DataFormat::Csv => parse_csv_dataset(content),
        DataFormat::Json => parse_json_dataset(content),
    }
}

/// Reads and normalizes the dataset at `path`. Any failure is fatal for the load.
pub fn load_dataset(path: &Path) -> Result<Dataset, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let format = DataFormat::detect(path, &content);
    tracing::debug!(path = %path.display(), ?format, "parsing dataset");
    let dataset = parse_dataset(format, &content)?;
    tracing::info!(
        path = %path.display(),
        quotes = dataset.len(),
        rows = dataset.report.rows_read,
        "dataset loaded"
    );
    Ok(dataset)
}
