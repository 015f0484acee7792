//! k-nearest-neighbor classifier.
//!
//! `fit` only keeps the training rows; `predict` scans every training row
//! per query, keeps the `k` closest in a [`BoundedMaxHeap`] and votes with
//! [`tie_break::resolve`].
use ordered_float::OrderedFloat;

use crate::data_handling::Dataset;
use crate::error::{ClassifierError, Result};
use crate::math::Array2;
use crate::models::classifier_trait::ClassifierModel;
use crate::models::distance::{DistanceMetric, Euclidean};
use crate::models::neighbors::{BoundedMaxHeap, NeighborCandidate};
use crate::models::tie_break;

#[derive(Debug, Clone)]
pub struct KnnClassifier<L, M = Euclidean> {
    k: usize,
    metric: M,
    train: Option<Dataset<L>>,
}

impl<L> KnnClassifier<L, Euclidean>
where
    L: Clone + PartialEq,
{
    /// Euclidean k-NN. `k` must be at least 1.
    pub fn new(k: usize) -> Result<Self> {
        Self::with_metric(k, Euclidean)
    }
}

impl<L, M> KnnClassifier<L, M>
where
    L: Clone + PartialEq,
    M: DistanceMetric,
{
    pub fn with_metric(k: usize, metric: M) -> Result<Self> {
        validate_k(k)?;
        Ok(Self {
            k,
            metric,
            train: None,
        })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Change the neighbor count. Takes effect on the next `predict`.
    pub fn set_k(&mut self, k: usize) -> Result<()> {
        validate_k(k)?;
        self.k = k;
        Ok(())
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }

    pub fn is_fitted(&self) -> bool {
        self.train.is_some()
    }

    /// The rows stored by the last successful fit.
    pub fn training_data(&self) -> Option<&Dataset<L>> {
        self.train.as_ref()
    }

    /// The `min(k, n)` training rows closest to `query`, ascending by
    /// distance and then by training row index.
    pub fn nearest(&self, query: &[f64]) -> Result<Vec<NeighborCandidate<L>>> {
        let train = self
            .train
            .as_ref()
            .ok_or(ClassifierError::NotFitted("predict"))?;

        let mut heap = BoundedMaxHeap::new(self.k.min(train.x.nrows()));
        for (idx, row) in train.x.rows().enumerate() {
            let distance = self.metric.distance(query, row)?;
            heap.push(OrderedFloat(distance), idx);
        }

        Ok(heap
            .into_sorted_vec()
            .into_iter()
            .map(|(distance, idx)| NeighborCandidate {
                distance: distance.into_inner(),
                source_index: idx,
                label: train.y[idx].clone(),
            })
            .collect())
    }

    pub fn predict_row(&self, query: &[f64]) -> Result<L> {
        let neighbors = self.nearest(query)?;
        tie_break::resolve(&neighbors)
            .ok_or(ClassifierError::EmptyDataset("predict"))
    }
}

impl<L, M> ClassifierModel for KnnClassifier<L, M>
where
    L: Clone + PartialEq,
    M: DistanceMetric,
{
    type Label = L;

    fn fit(&mut self, x: &Array2<f64>, y: &[L]) -> Result<()> {
        self.fit_owned(Dataset {
            x: x.clone(),
            y: y.to_vec(),
        })
    }

    /// Stores `data` as is. The fold harness hands over each freshly
    /// selected training split, so no rows are copied here.
    fn fit_owned(&mut self, data: Dataset<L>) -> Result<()> {
        self.train = None;
        if data.x.nrows() != data.y.len() {
            return Err(ClassifierError::ShapeMismatch {
                rows: data.x.nrows(),
                labels: data.y.len(),
            });
        }
        if data.x.is_empty() {
            return Err(ClassifierError::EmptyDataset("fit"));
        }

        log::debug!(
            "kNN (k={}, {}) stored {} training rows with {} features",
            self.k,
            self.metric.name(),
            data.x.nrows(),
            data.x.ncols()
        );
        self.train = Some(data);
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Vec<L>> {
        if !self.is_fitted() {
            return Err(ClassifierError::NotFitted("predict"));
        }
        x.rows().map(|row| self.predict_row(row)).collect()
    }

    fn name(&self) -> &str {
        "knn"
    }
}

fn validate_k(k: usize) -> Result<()> {
    if k == 0 {
        return Err(ClassifierError::InvalidParameter(
            "k must be at least 1".to_string(),
        ));
    }
    Ok(())
}
