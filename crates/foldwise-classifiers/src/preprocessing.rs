//! Encoding helpers that turn raw tables into numeric model inputs.
//!
//! Provides ordinal encoding of categorical feature columns for the
//! nearest-neighbor path and 0/1 label encoding for logistic regression.
use std::collections::BTreeSet;

use crate::data_handling::CombinedDataset;
use crate::error::{ClassifierError, Result};

/// Map each value to its position among the sorted distinct values.
///
/// Returns the codes and the sorted categories (code `i` is
/// `categories[i]`).
pub fn ordinal_encode(values: &[String]) -> (Vec<usize>, Vec<String>) {
    let categories: Vec<String> = values
        .iter()
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let codes = values
        .iter()
        .map(|v| categories.binary_search(v).unwrap_or_default())
        .collect();
    (codes, categories)
}

fn is_numeric_column(values: &[String]) -> bool {
    values.iter().all(|v| v.trim().parse::<f64>().is_ok())
}

/// Replace every non-numeric feature column with ordinal codes.
///
/// A column counts as numeric only if all of its cells parse as numbers;
/// otherwise the whole column is encoded. The trailing label column is
/// returned untouched.
pub fn encode_features(combined: &CombinedDataset) -> CombinedDataset {
    let mut encoded = combined.clone();
    let n_features = combined.ncols().saturating_sub(1);

    for col in 0..n_features {
        let values = combined.column(col);
        if is_numeric_column(&values) {
            continue;
        }
        let (codes, categories) = ordinal_encode(&values);
        log::debug!(
            "column {} is categorical with {} distinct values",
            col,
            categories.len()
        );
        for (row, code) in codes.into_iter().enumerate() {
            encoded[(row, col)] = code.to_string();
        }
    }
    encoded
}

/// Encode raw labels as 0/1 for logistic regression.
///
/// With `positive`, rows carrying that label become 1 and everything else
/// 0 (one-vs-rest). Without it the labels must take exactly two distinct
/// values; the lexicographically smaller one becomes 0.
pub fn encode_binary_labels(labels: &[String], positive: Option<&str>) -> Result<Vec<u8>> {
    if let Some(positive) = positive {
        if !labels.iter().any(|l| l == positive) {
            return Err(ClassifierError::InvalidLabel {
                label: positive.to_string(),
                reason: "positive label does not occur in the data".to_string(),
            });
        }
        return Ok(labels.iter().map(|l| u8::from(l == positive)).collect());
    }

    let (codes, categories) = ordinal_encode(labels);
    if categories.len() != 2 {
        return Err(ClassifierError::InvalidLabel {
            label: categories.join(","),
            reason: format!(
                "expected exactly 2 classes, found {}; choose a positive label",
                categories.len()
            ),
        });
    }
    log::info!(
        "encoding label '{}' as 0 and '{}' as 1",
        categories[0],
        categories[1]
    );
    Ok(codes.into_iter().map(|c| c as u8).collect())
}
