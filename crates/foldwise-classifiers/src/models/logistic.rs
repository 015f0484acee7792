//! Binary logistic regression trained by batch gradient descent.
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_LEARNING_RATE, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
use crate::error::{ClassifierError, Result};
use crate::math::{dot, Array2};
use crate::models::classifier_trait::ClassifierModel;
use crate::stats;

pub fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Smoothed binary cross-entropy of `predictions` against 0/1 `labels`.
///
/// `eps` is added inside both logarithms so probabilities of exactly 0 or 1
/// stay finite. The second value reports whether any prediction fell
/// within `eps` of 0 or 1, i.e. whether the smoothing actually mattered.
pub fn log_loss(predictions: &[f64], labels: &[f64], eps: f64) -> (f64, bool) {
    let n = predictions.len() as f64;
    let mut total = 0.0;
    let mut guarded = false;
    for (&p, &y) in predictions.iter().zip(labels) {
        if p < eps || 1.0 - p < eps {
            guarded = true;
        }
        total += (1.0 - y) * (1.0 - p + eps).ln() + y * (p + eps).ln();
    }
    (-total / n, guarded)
}

/// Batch gradient descent on the logistic cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientDescent {
    pub learning_rate: f64,
    pub max_iterations: usize,
    /// Stop once successive costs differ by at most this much. Also used as
    /// the smoothing constant of [`log_loss`].
    pub tolerance: f64,
}

impl Default for GradientDescent {
    fn default() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// Outcome of one optimisation run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Convergence {
    pub iterations: usize,
    pub converged: bool,
    pub cost_history: Vec<f64>,
}

impl GradientDescent {
    pub fn new(learning_rate: f64, max_iterations: usize, tolerance: f64) -> Result<Self> {
        let optimizer = Self {
            learning_rate,
            max_iterations,
            tolerance,
        };
        optimizer.validate()?;
        Ok(optimizer)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(ClassifierError::InvalidParameter(format!(
                "learning rate must be positive and finite, got {}",
                self.learning_rate
            )));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(ClassifierError::InvalidParameter(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }

    /// Update `weights` and `bias` in place until the cost settles or the
    /// iteration budget runs out. The cost of an iteration is measured on
    /// the predictions made before that iteration's update.
    pub fn minimize(
        &self,
        x: &Array2<f64>,
        y: &[f64],
        weights: &mut [f64],
        bias: &mut f64,
    ) -> Result<Convergence> {
        let n = x.nrows() as f64;
        let mut outcome = Convergence::default();
        let mut previous_cost = 1.0;
        let mut guard_reported = false;

        for iteration in 1..=self.max_iterations {
            let mut predictions = Vec::with_capacity(x.nrows());
            for row in x.rows() {
                predictions.push(sigmoid(dot(row, weights)? + *bias));
            }
            let residuals: Vec<f64> = predictions.iter().zip(y).map(|(p, t)| p - t).collect();

            let mut grad_w = vec![0.0; weights.len()];
            for (row, r) in x.rows().zip(&residuals) {
                for (g, v) in grad_w.iter_mut().zip(row) {
                    *g += r * v;
                }
            }
            let grad_b = residuals.iter().sum::<f64>() / n;

            for (w, g) in weights.iter_mut().zip(&grad_w) {
                *w -= self.learning_rate * g / n;
            }
            *bias -= self.learning_rate * grad_b;

            let (cost, guarded) = log_loss(&predictions, y, self.tolerance);
            if guarded && !guard_reported {
                log::warn!(
                    "probabilities within {} of 0 or 1 at iteration {}; cost smoothed",
                    self.tolerance,
                    iteration
                );
                guard_reported = true;
            }

            outcome.iterations = iteration;
            outcome.cost_history.push(cost);

            if (previous_cost - cost).abs() <= self.tolerance {
                outcome.converged = true;
                break;
            }
            previous_cost = cost;
        }

        log::debug!(
            "gradient descent stopped after {} iterations (converged: {}, final cost: {:?})",
            outcome.iterations,
            outcome.converged,
            outcome.cost_history.last()
        );
        Ok(outcome)
    }
}

/// Logistic regression over 0/1 labels.
#[derive(Debug, Clone, Default)]
pub struct LogisticClassifier {
    optimizer: GradientDescent,
    weights: Vec<f64>,
    bias: f64,
    fitted: bool,
    last_fit: Convergence,
}

impl LogisticClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_optimizer(optimizer: GradientDescent) -> Result<Self> {
        optimizer.validate()?;
        Ok(Self {
            optimizer,
            ..Self::default()
        })
    }

    pub fn optimizer(&self) -> &GradientDescent {
        &self.optimizer
    }

    pub fn set_learning_rate(&mut self, learning_rate: f64) -> Result<()> {
        let updated = GradientDescent {
            learning_rate,
            ..self.optimizer
        };
        updated.validate()?;
        self.optimizer = updated;
        Ok(())
    }

    pub fn set_max_iterations(&mut self, max_iterations: usize) {
        self.optimizer.max_iterations = max_iterations;
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    /// Whether the last `fit` stopped on the tolerance rather than the
    /// iteration cap.
    pub fn converged(&self) -> bool {
        self.last_fit.converged
    }

    /// Cost per iteration of the last `fit`.
    pub fn cost_history(&self) -> &[f64] {
        &self.last_fit.cost_history
    }

    /// Probability of class 1 for every row.
    pub fn predict_proba(&self, x: &Array2<f64>) -> Result<Vec<f64>> {
        if !self.fitted {
            return Err(ClassifierError::NotFitted("predict"));
        }
        let mut probabilities = Vec::with_capacity(x.nrows());
        for row in x.rows() {
            probabilities.push(sigmoid(dot(row, &self.weights)? + self.bias));
        }
        Ok(probabilities)
    }

    /// Fraction of `predicted` that equals `truth`.
    pub fn evaluate_accuracy(&self, truth: &[u8], predicted: &[u8]) -> Result<f64> {
        if !self.fitted {
            return Err(ClassifierError::NotFitted("evaluate_accuracy"));
        }
        stats::accuracy(truth, predicted)
    }
}

impl ClassifierModel for LogisticClassifier {
    type Label = u8;

    fn fit(&mut self, x: &Array2<f64>, y: &[u8]) -> Result<()> {
        self.weights = vec![0.0; x.ncols()];
        self.bias = 0.0;
        self.fitted = false;
        self.last_fit = Convergence::default();

        if x.nrows() != y.len() {
            return Err(ClassifierError::ShapeMismatch {
                rows: x.nrows(),
                labels: y.len(),
            });
        }
        if x.is_empty() {
            return Err(ClassifierError::EmptyDataset("fit"));
        }
        if let Some(bad) = y.iter().find(|&&label| label > 1) {
            return Err(ClassifierError::InvalidLabel {
                label: bad.to_string(),
                reason: "logistic regression expects 0/1 labels".to_string(),
            });
        }

        let targets: Vec<f64> = y.iter().map(|&label| f64::from(label)).collect();
        let (mut w, mut b) = (vec![0.0; x.ncols()], 0.0);
        self.last_fit = self.optimizer.minimize(x, &targets, &mut w, &mut b)?;
        self.weights = w;
        self.bias = b;
        self.fitted = true;
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Vec<u8>> {
        Ok(self
            .predict_proba(x)?
            .into_iter()
            .map(|p| u8::from(p >= 0.5))
            .collect())
    }

    fn iterations(&self) -> Option<usize> {
        Some(self.last_fit.iterations)
    }

    fn name(&self) -> &str {
        "logistic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clusters() -> (Array2<f64>, Vec<u8>) {
        let x = Array2::from_rows(vec![
            vec![0.0, 0.0],
            vec![0.0, 1.0],
            vec![5.0, 5.0],
            vec![5.0, 6.0],
        ])
        .unwrap();
        (x, vec![0, 0, 1, 1])
    }

    #[test]
    fn sigmoid_reference_points() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(10.0) > 0.9999);
        assert!(sigmoid(-10.0) < 0.0001);
        assert!((sigmoid(2.0) + sigmoid(-2.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn separates_two_clusters_with_defaults() {
        let (x, y) = clusters();
        let mut model = LogisticClassifier::new();
        model.fit(&x, &y).unwrap();

        let queries = vec![vec![0.0, 0.5], vec![5.0, 5.5]];
        let queries = Array2::from_rows(queries).unwrap();
        assert_eq!(model.predict(&queries).unwrap(), vec![0, 1]);
        assert_eq!(model.predict(&x).unwrap(), y);
        assert!(model.weights()[0] > 0.0);
        assert!(model.bias() < 0.0);
    }

    #[test]
    fn cost_is_non_increasing() {
        let (x, y) = clusters();
        let mut model = LogisticClassifier::new();
        model.fit(&x, &y).unwrap();

        let history = model.cost_history();
        assert_eq!(history.len(), model.iterations().unwrap());
        for pair in history.windows(2) {
            assert!(pair[1] <= pair[0] + DEFAULT_TOLERANCE, "{:?}", pair);
        }
    }

    #[test]
    fn larger_step_converges_before_the_cap() {
        let (x, y) = clusters();
        let optimizer = GradientDescent::new(0.1, 1000, 1e-4).unwrap();
        let mut model = LogisticClassifier::with_optimizer(optimizer).unwrap();
        model.fit(&x, &y).unwrap();

        assert!(model.converged());
        let iterations = model.iterations().unwrap();
        assert!(iterations > 1 && iterations < 1000, "{}", iterations);
    }

    #[test]
    fn default_step_runs_to_the_cap_on_clusters() {
        let (x, y) = clusters();
        let mut model = LogisticClassifier::new();
        model.fit(&x, &y).unwrap();
        assert!(!model.converged());
        assert_eq!(model.iterations(), Some(DEFAULT_MAX_ITERATIONS));
    }

    #[test]
    fn refit_starts_from_zero() {
        let (x, y) = clusters();
        let other_x = Array2::from_rows(vec![
            vec![1.0, 2.0],
            vec![3.0, -1.0],
            vec![-2.0, 0.5],
        ])
        .unwrap();
        let other_y = vec![1, 0, 1];

        let mut reused = LogisticClassifier::new();
        reused.fit(&x, &y).unwrap();
        reused.fit(&other_x, &other_y).unwrap();

        let mut fresh = LogisticClassifier::new();
        fresh.fit(&other_x, &other_y).unwrap();

        assert_eq!(reused.weights(), fresh.weights());
        assert_eq!(reused.bias(), fresh.bias());
        assert_eq!(reused.iterations(), fresh.iterations());
    }

    #[test]
    fn unfitted_model_rejects_predict_and_evaluate() {
        let model = LogisticClassifier::new();
        let (x, _) = clusters();
        assert_eq!(
            model.predict(&x).unwrap_err(),
            ClassifierError::NotFitted("predict")
        );
        assert_eq!(
            model.evaluate_accuracy(&[1], &[1]).unwrap_err(),
            ClassifierError::NotFitted("evaluate_accuracy")
        );
    }

    #[test]
    fn failed_fit_leaves_model_unfitted() {
        let (x, y) = clusters();
        let mut model = LogisticClassifier::new();
        model.fit(&x, &y).unwrap();
        assert!(model.fit(&x, &[0, 1, 2, 1]).is_err());
        assert!(!model.is_fitted());
        assert!(model.weights().iter().all(|w| *w == 0.0));
    }

    #[test]
    fn fit_validates_shape_and_labels() {
        let (x, _) = clusters();
        let mut model = LogisticClassifier::new();
        assert_eq!(
            model.fit(&x, &[0, 1]).unwrap_err(),
            ClassifierError::ShapeMismatch { rows: 4, labels: 2 }
        );
        assert!(matches!(
            model.fit(&x, &[0, 1, 3, 1]),
            Err(ClassifierError::InvalidLabel { .. })
        ));
    }

    #[test]
    fn zero_iterations_keeps_zero_parameters() {
        let (x, y) = clusters();
        let mut model = LogisticClassifier::new();
        model.set_max_iterations(0);
        model.fit(&x, &y).unwrap();
        assert_eq!(model.iterations(), Some(0));
        assert_eq!(model.weights(), &[0.0, 0.0]);
        // sigmoid(0) sits on the threshold and maps to class 1
        assert_eq!(model.predict(&x).unwrap(), vec![1, 1, 1, 1]);
    }

    #[test]
    fn log_loss_stays_finite_at_the_extremes() {
        let (cost, guarded) = log_loss(&[0.0, 1.0], &[1.0, 0.0], 1e-4);
        assert!(cost.is_finite());
        assert!(guarded);

        let (cost, guarded) = log_loss(&[0.5, 0.5], &[1.0, 0.0], 1e-4);
        assert!((cost - (0.5f64 + 1e-4).ln().abs()).abs() < 1e-12);
        assert!(!guarded);
    }

    #[test]
    fn invalid_hyper_parameters_are_rejected() {
        assert!(GradientDescent::new(0.0, 10, 1e-4).is_err());
        assert!(GradientDescent::new(0.1, 10, f64::NAN).is_err());
        let mut model = LogisticClassifier::new();
        assert!(model.set_learning_rate(-1.0).is_err());
        model.set_learning_rate(0.5).unwrap();
        assert_eq!(model.optimizer().learning_rate, 0.5);
    }

    #[test]
    fn evaluate_accuracy_after_fit() {
        let (x, y) = clusters();
        let mut model = LogisticClassifier::new();
        model.fit(&x, &y).unwrap();
        let predicted = model.predict(&x).unwrap();
        assert_eq!(model.evaluate_accuracy(&y, &predicted).unwrap(), 1.0);
        assert_eq!(model.evaluate_accuracy(&[0, 1], &[1, 0]).unwrap(), 0.0);
    }
}
