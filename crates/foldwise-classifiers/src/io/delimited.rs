//! Delimited-text dataset reader.
//!
//! Files are plain comma-separated rows with the class label in the last
//! column, as distributed by the UCI repository. ARFF files are accepted
//! too: everything up to the `@data` line is skipped, as are `%` comments.
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::data_handling::{separate_labels, CombinedDataset, Dataset};
use crate::math::Array2;
use crate::preprocessing::{encode_binary_labels, encode_features};

/// Configuration for reading delimited dataset files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Field separator. Must be a single ASCII character.
    pub delimiter: char,
    /// Skip the first row.
    pub has_headers: bool,
    /// Rows with any cell equal to this marker are dropped.
    pub missing_value: Option<String>,
    /// Column holding the class label, moved to the end on load. `None`
    /// means the label is already the last column.
    pub label_column: Option<usize>,
    /// Label mapped to 1 when binarising for logistic regression; every
    /// other label maps to 0.
    pub positive_label: Option<String>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            has_headers: false,
            missing_value: Some("?".to_string()),
            label_column: None,
            positive_label: None,
        }
    }
}

/// Read a dataset as raw string cells, label last.
pub fn load_raw<P: AsRef<Path>>(path: P, config: &ReaderConfig) -> Result<CombinedDataset> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_raw(&text, config)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Read a dataset for logistic regression: categorical feature columns are
/// ordinal-encoded and labels are binarised to 0/1.
pub fn load_numeric<P: AsRef<Path>>(path: P, config: &ReaderConfig) -> Result<Dataset<u8>> {
    let path = path.as_ref();
    let combined = load_raw(path, config)?;
    let raw = separate_labels(&encode_features(&combined))?;
    let y = encode_binary_labels(&raw.y, config.positive_label.as_deref())
        .with_context(|| format!("Failed to encode labels of {}", path.display()))?;
    Ok(Dataset::new(raw.x, y)?)
}

pub(crate) fn parse_raw(text: &str, config: &ReaderConfig) -> Result<CombinedDataset> {
    if !config.delimiter.is_ascii() {
        return Err(anyhow!(
            "Delimiter must be a single ASCII character, got '{}'",
            config.delimiter
        ));
    }

    let body = strip_arff_header(text);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter as u8)
        .has_headers(config.has_headers)
        .trim(csv::Trim::All)
        .flexible(true)
        .comment(body.is_arff.then_some(b'%'))
        .from_reader(body.data.as_bytes());

    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut dropped = 0usize;
    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row {}", row_idx + 1))?;
        if record.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        if let Some(marker) = &config.missing_value {
            if record.iter().any(|cell| cell == marker) {
                dropped += 1;
                continue;
            }
        }
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        if let Some(label_idx) = config.label_column {
            if label_idx >= row.len() {
                return Err(anyhow!(
                    "Label column {} out of range at row {} ({} columns)",
                    label_idx,
                    row_idx + 1,
                    row.len()
                ));
            }
            let label = row.remove(label_idx);
            row.push(label);
        }
        rows.push(row);
    }

    if dropped > 0 {
        log::info!("Dropped {} rows with missing values", dropped);
    }
    if rows.is_empty() {
        return Err(anyhow!("No data rows found"));
    }
    log::debug!("Read {} rows of {} columns", rows.len(), rows[0].len());

    Array2::from_rows(rows).context("Ragged rows in data")
}

struct DataSection<'a> {
    data: &'a str,
    is_arff: bool,
}

fn strip_arff_header(text: &str) -> DataSection<'_> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        offset += line.len();
        if line.trim().eq_ignore_ascii_case("@data") {
            return DataSection {
                data: &text[offset..],
                is_arff: true,
            };
        }
    }
    DataSection {
        data: text,
        is_arff: false,
    }
}
