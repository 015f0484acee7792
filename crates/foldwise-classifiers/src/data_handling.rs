//! Dataset containers used by the classifiers and the fold harness.
//!
//! `Dataset` pairs a numeric feature matrix with one label per row.
//! `CombinedDataset` is the raw table form used on the nearest-neighbor
//! path, where the label is the trailing column of each row; it becomes a
//! `Dataset` through [`separate_labels`].
use std::fmt::Debug;

use crate::error::{ClassifierError, Result};
use crate::math::Array2;

/// Raw rows with the label as the last column.
pub type CombinedDataset = Array2<String>;

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<L> {
    pub x: Array2<f64>,
    pub y: Vec<L>,
}

impl<L: Clone> Dataset<L> {
    pub fn new(x: Array2<f64>, y: Vec<L>) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(ClassifierError::ShapeMismatch {
                rows: x.nrows(),
                labels: y.len(),
            });
        }
        Ok(Self { x, y })
    }

    pub fn n_samples(&self) -> usize {
        self.y.len()
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    pub fn select_rows(&self, indices: &[usize]) -> Self {
        Self {
            x: self.x.select_rows(indices),
            y: indices.iter().map(|&i| self.y[i].clone()).collect(),
        }
    }
}

impl<L: Clone + PartialEq + Debug> Dataset<L> {
    /// Row count per label, in first-encounter order.
    pub fn class_counts(&self) -> Vec<(L, usize)> {
        let mut counts: Vec<(L, usize)> = Vec::new();
        for label in &self.y {
            match counts.iter_mut().find(|(l, _)| l == label) {
                Some((_, count)) => *count += 1,
                None => counts.push((label.clone(), 1)),
            }
        }
        counts
    }

    pub fn log_input_data_summary(&self) {
        log::info!(
            "Input data: {} rows, {} feature columns",
            self.n_samples(),
            self.n_features()
        );
        for (label, count) in self.class_counts() {
            log::info!("  class {:?}: {} rows", label, count);
        }
    }
}

/// Anything the fold splitter can cut into row subsets.
pub trait RowSubset: Sized {
    fn n_rows(&self) -> usize;

    /// A new value holding the given rows, in the given order.
    fn select_rows(&self, indices: &[usize]) -> Self;
}

impl<T: Clone> RowSubset for Array2<T> {
    fn n_rows(&self) -> usize {
        self.nrows()
    }

    fn select_rows(&self, indices: &[usize]) -> Self {
        Array2::select_rows(self, indices)
    }
}

impl<L: Clone> RowSubset for Dataset<L> {
    fn n_rows(&self) -> usize {
        self.n_samples()
    }

    fn select_rows(&self, indices: &[usize]) -> Self {
        Dataset::select_rows(self, indices)
    }
}

/// Split a combined table into numeric features and the trailing label
/// column. Every feature cell must parse as a number, so categorical
/// columns have to be encoded first.
pub fn separate_labels(combined: &CombinedDataset) -> Result<Dataset<String>> {
    let (rows, cols) = combined.shape();
    if cols == 0 {
        return Err(ClassifierError::InvalidParameter(
            "combined dataset has no label column".to_string(),
        ));
    }

    let n_features = cols - 1;
    let mut features = Vec::with_capacity(rows * n_features);
    let mut labels = Vec::with_capacity(rows);
    for (row_idx, row) in combined.rows().enumerate() {
        for (col_idx, cell) in row[..n_features].iter().enumerate() {
            match cell.trim().parse::<f64>() {
                Ok(value) => features.push(value),
                Err(_) => {
                    return Err(ClassifierError::NonNumericValue {
                        value: cell.clone(),
                        row: row_idx,
                        col: col_idx,
                    });
                }
            }
        }
        labels.push(row[n_features].clone());
    }

    let x = Array2::from_shape_vec((rows, n_features), features)?;
    Dataset::new(x, labels)
}
