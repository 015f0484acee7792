//! Contiguous k-fold splitting and the cross-validation loop.
//!
//! Fold `i` tests rows `[i * n / k, (i + 1) * n / k)` (integer division on
//! the fold size); the last fold also takes the remainder. The training
//! side of each fold is every other row in original order.
use std::fmt;
use std::ops::Range;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

use crate::config::CrossValidationConfig;
use crate::data_handling::{separate_labels, CombinedDataset, Dataset, RowSubset};
use crate::error::{ClassifierError, Result};
use crate::math::mean;
use crate::models::classifier_trait::ClassifierModel;
use crate::stats;

/// Test row ranges for `n_folds` contiguous folds over `n_rows` rows.
pub fn fold_ranges(n_rows: usize, n_folds: usize) -> Result<Vec<Range<usize>>> {
    if n_folds < 2 || n_folds > n_rows {
        return Err(ClassifierError::InvalidFoldCount {
            folds: n_folds,
            rows: n_rows,
        });
    }

    let fold_size = n_rows / n_folds;
    Ok((0..n_folds)
        .map(|i| {
            let start = i * fold_size;
            let end = if i == n_folds - 1 {
                n_rows
            } else {
                start + fold_size
            };
            start..end
        })
        .collect())
}

/// One train/test partition.
#[derive(Debug, Clone, PartialEq)]
pub struct Fold<D> {
    pub index: usize,
    pub test_range: Range<usize>,
    pub train: D,
    pub test: D,
}

pub fn split<D: RowSubset>(data: &D, n_folds: usize) -> Result<Vec<Fold<D>>> {
    let n_rows = data.n_rows();
    let ranges = fold_ranges(n_rows, n_folds)?;

    Ok(ranges
        .into_iter()
        .enumerate()
        .map(|(index, test_range)| {
            let test_idx: Vec<usize> = test_range.clone().collect();
            let train_idx: Vec<usize> = (0..test_range.start)
                .chain(test_range.end..n_rows)
                .collect();
            log::trace!(
                "fold {} tests rows {:?} and trains on {} rows",
                index,
                test_range,
                train_idx.len()
            );
            Fold {
                index,
                train: data.select_rows(&train_idx),
                test: data.select_rows(&test_idx),
                test_range,
            }
        })
        .collect())
}

/// Hold-out split: the first `floor(n * train_ratio)` rows train, the rest
/// test.
pub fn train_test_split<D: RowSubset>(data: &D, train_ratio: f64) -> Result<(D, D)> {
    if !(train_ratio > 0.0 && train_ratio < 1.0) {
        return Err(ClassifierError::InvalidParameter(format!(
            "train ratio must lie strictly between 0 and 1, got {}",
            train_ratio
        )));
    }
    let n_rows = data.n_rows();
    let cut = (n_rows as f64 * train_ratio) as usize;
    let train_idx: Vec<usize> = (0..cut).collect();
    let test_idx: Vec<usize> = (cut..n_rows).collect();
    Ok((data.select_rows(&train_idx), data.select_rows(&test_idx)))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoldResult {
    pub index: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    pub accuracy: f64,
    /// Optimiser iterations used by this fold's fit, for iterative models.
    pub iterations: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossValidationReport {
    pub model: String,
    pub folds: Vec<FoldResult>,
    pub mean_accuracy: f64,
}

impl CrossValidationReport {
    pub fn fold_accuracies(&self) -> Vec<f64> {
        self.folds.iter().map(|f| f.accuracy).collect()
    }

    /// Iterations per fold, when the model reports them.
    pub fn iterations(&self) -> Option<Vec<usize>> {
        self.folds.iter().map(|f| f.iterations).collect()
    }
}

impl fmt::Display for CrossValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let accuracies: Vec<String> = self
            .folds
            .iter()
            .map(|fold| format!("{:.4}", fold.accuracy))
            .collect();
        writeln!(f, "Model          : {}", self.model)?;
        writeln!(f, "Fold accuracies: [{}]", accuracies.join(", "))?;
        write!(f, "Avg accuracy   : {:.4}", self.mean_accuracy)?;
        if let Some(iterations) = self.iterations() {
            write!(f, "\nIterations/fit : {:?}", iterations)?;
        }
        Ok(())
    }
}

/// Drives fit/predict/score over every fold with a single reused model.
///
/// Folds run sequentially. The model's `fit` resets its learned state, so
/// nothing carries over between folds. The first failing fold aborts the
/// run.
#[derive(Debug, Clone, Default)]
pub struct CrossValidator {
    config: CrossValidationConfig,
}

impl CrossValidator {
    pub fn new(config: CrossValidationConfig) -> Self {
        Self { config }
    }

    pub fn with_folds(n_folds: usize) -> Self {
        Self::new(CrossValidationConfig {
            n_folds,
            shuffle_seed: None,
        })
    }

    pub fn n_folds(&self) -> usize {
        self.config.n_folds
    }

    pub fn run<M>(
        &self,
        model: &mut M,
        data: &Dataset<M::Label>,
    ) -> Result<CrossValidationReport>
    where
        M: ClassifierModel,
    {
        let shuffled = self.shuffled(data);
        let data = shuffled.as_ref().unwrap_or(data);

        let mut results = Vec::with_capacity(self.config.n_folds);
        for fold in split(data, self.config.n_folds)? {
            let test = fold.test;
            results.push(self.evaluate_fold(model, fold.index, fold.train, &test)?);
        }
        Ok(self.summarise(model.name(), results))
    }

    /// Cross-validate on a combined table, separating the trailing label
    /// column of each fold's train and test rows.
    pub fn run_combined<M>(
        &self,
        model: &mut M,
        combined: &CombinedDataset,
    ) -> Result<CrossValidationReport>
    where
        M: ClassifierModel<Label = String>,
    {
        let shuffled = self.shuffled(combined);
        let combined = shuffled.as_ref().unwrap_or(combined);

        let mut results = Vec::with_capacity(self.config.n_folds);
        for fold in split(combined, self.config.n_folds)? {
            let train = separate_labels(&fold.train)?;
            let test = separate_labels(&fold.test)?;
            results.push(self.evaluate_fold(model, fold.index, train, &test)?);
        }
        Ok(self.summarise(model.name(), results))
    }

    fn shuffled<D: RowSubset>(&self, data: &D) -> Option<D> {
        let seed = self.config.shuffle_seed?;
        let mut order: Vec<usize> = (0..data.n_rows()).collect();
        order.shuffle(&mut StdRng::seed_from_u64(seed));
        log::debug!("shuffled {} rows with seed {}", order.len(), seed);
        Some(data.select_rows(&order))
    }

    fn evaluate_fold<M>(
        &self,
        model: &mut M,
        index: usize,
        train: Dataset<M::Label>,
        test: &Dataset<M::Label>,
    ) -> Result<FoldResult>
    where
        M: ClassifierModel,
    {
        let train_rows = train.n_samples();
        log::info!(
            "Training with fold {}/{}: {} training rows, {} test rows",
            index + 1,
            self.config.n_folds,
            train_rows,
            test.n_samples()
        );

        model.fit_owned(train)?;
        let predictions = model.predict(&test.x)?;
        let accuracy = stats::accuracy(&test.y, &predictions)?;
        let iterations = model.iterations();

        let detail = match iterations {
            Some(it) => format!(" after {} iterations", it),
            None => String::new(),
        };
        log::info!("Fold {} accuracy: {:.4}{}", index + 1, accuracy, detail);

        Ok(FoldResult {
            index,
            train_rows,
            test_rows: test.n_samples(),
            accuracy,
            iterations,
        })
    }

    fn summarise(&self, model: &str, folds: Vec<FoldResult>) -> CrossValidationReport {
        let accuracies: Vec<f64> = folds.iter().map(|f| f.accuracy).collect();
        let mean_accuracy = mean(&accuracies).unwrap_or(0.0);
        log::info!(
            "Average accuracy over {} folds: {:.4}",
            folds.len(),
            mean_accuracy
        );
        CrossValidationReport {
            model: model.to_string(),
            folds,
            mean_accuracy,
        }
    }
}
