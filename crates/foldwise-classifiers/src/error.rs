use thiserror::Error;

/// Errors raised by the classifiers and the cross-validation harness.
///
/// Structural problems (mismatched shapes, bad fold counts, calling a model
/// before it was fitted) are reported here. Numeric edge cases in the cost
/// function are absorbed by the smoothing constant and only logged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifierError {
    #[error("feature vectors differ in length: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("feature matrix has {rows} rows but {labels} labels were given")]
    ShapeMismatch { rows: usize, labels: usize },

    #[error("invalid fold count {folds} for a dataset of {rows} rows (need 2 <= folds <= rows)")]
    InvalidFoldCount { folds: usize, rows: usize },

    #[error("model must be fitted before calling {0}")]
    NotFitted(&'static str),

    #[error("cannot {0} on an empty dataset")]
    EmptyDataset(&'static str),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("invalid label {label}: {reason}")]
    InvalidLabel { label: String, reason: String },

    #[error("non-numeric value '{value}' at row {row}, column {col}")]
    NonNumericValue {
        value: String,
        row: usize,
        col: usize,
    },

    #[error("invalid shape ({rows}, {cols}) for buffer of length {len}")]
    InvalidShape {
        rows: usize,
        cols: usize,
        len: usize,
    },
}

pub type Result<T> = std::result::Result<T, ClassifierError>;
