//! Accuracy scoring shared by both classifiers and the fold harness.
use crate::error::{ClassifierError, Result};

/// Fraction of positions where `predicted` equals `truth`.
///
/// # Returns
///
/// A value in `[0, 1]`: `1.0` iff every prediction matches, `0.0` iff none
/// does. Fails with `ShapeMismatch` when the lengths differ and with
/// `EmptyDataset` when there is nothing to score.
pub fn accuracy<L: PartialEq>(truth: &[L], predicted: &[L]) -> Result<f64> {
    if truth.len() != predicted.len() {
        return Err(ClassifierError::ShapeMismatch {
            rows: truth.len(),
            labels: predicted.len(),
        });
    }
    if truth.is_empty() {
        return Err(ClassifierError::EmptyDataset("evaluate accuracy"));
    }
    let correct = correct_matches(truth, predicted);
    Ok(correct as f64 / truth.len() as f64)
}

pub fn correct_matches<L: PartialEq>(truth: &[L], predicted: &[L]) -> usize {
    truth.iter().zip(predicted).filter(|(t, p)| t == p).count()
}
