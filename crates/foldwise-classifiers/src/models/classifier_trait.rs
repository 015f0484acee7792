use crate::data_handling::Dataset;
use crate::error::Result;
use crate::math::Array2;

/// The contract shared by every classifier driven by the cross-validation
/// harness.
///
/// `fit` must fully reset any learned state before training, so a single
/// instance can be refitted fold after fold without leaking parameters
/// between folds.
pub trait ClassifierModel {
    type Label: Clone + PartialEq;

    /// Fit the model. Fails with `ShapeMismatch` when `y.len() != x.nrows()`.
    fn fit(&mut self, x: &Array2<f64>, y: &[Self::Label]) -> Result<()>;

    /// Fit from an owned dataset. Models that keep their training rows
    /// override this to store `data` without copying it.
    fn fit_owned(&mut self, data: Dataset<Self::Label>) -> Result<()> {
        self.fit(&data.x, &data.y)
    }

    /// Predict one label per row of `x`. Fails with `NotFitted` before a
    /// successful `fit`.
    fn predict(&self, x: &Array2<f64>) -> Result<Vec<Self::Label>>;

    /// Optimisation steps consumed by the last `fit`, for iterative models.
    fn iterations(&self) -> Option<usize> {
        None
    }

    /// Optional human readable name for the model
    fn name(&self) -> &str {
        "classifier"
    }
}
