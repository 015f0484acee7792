use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::distance::MetricKind;

pub const DEFAULT_LEARNING_RATE: f64 = 0.01;
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;
/// Convergence threshold and log-smoothing constant of the logistic cost.
pub const DEFAULT_TOLERANCE: f64 = 1e-4;
pub const DEFAULT_K: usize = 5;
pub const DEFAULT_FOLDS: usize = 5;

/// Central configuration for a cross-validated model run.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct ModelConfig {
    pub model_type: ModelType,
    pub cross_validation: CrossValidationConfig,
}

/// Supported model types and their hyper-parameters.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ModelType {
    Logistic {
        #[serde(default = "default_learning_rate")]
        learning_rate: f64,
        #[serde(default = "default_max_iterations")]
        max_iterations: usize,
        #[serde(default = "default_tolerance")]
        tolerance: f64,
    },
    Knn {
        #[serde(default = "default_k")]
        k: usize,
        #[serde(default)]
        metric: MetricKind,
    },
}

fn default_learning_rate() -> f64 {
    DEFAULT_LEARNING_RATE
}

fn default_max_iterations() -> usize {
    DEFAULT_MAX_ITERATIONS
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

fn default_k() -> usize {
    DEFAULT_K
}

impl Default for ModelType {
    fn default() -> Self {
        ModelType::Logistic {
            learning_rate: DEFAULT_LEARNING_RATE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl ModelType {
    pub fn name(&self) -> &'static str {
        match self {
            ModelType::Logistic { .. } => "logistic",
            ModelType::Knn { .. } => "knn",
        }
    }
}

impl FromStr for ModelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "logistic" => Ok(ModelType::default()),
            "knn" => Ok(ModelType::Knn {
                k: DEFAULT_K,
                metric: MetricKind::default(),
            }),
            _ => Err(format!(
                "Unknown model type: {}. Expected one of: logistic, knn",
                s
            )),
        }
    }
}

/// How the dataset is split into folds.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CrossValidationConfig {
    pub n_folds: usize,
    /// Shuffle rows with this seed before the contiguous split. `None` keeps
    /// the dataset order.
    pub shuffle_seed: Option<u64>,
}

impl Default for CrossValidationConfig {
    fn default() -> Self {
        Self {
            n_folds: DEFAULT_FOLDS,
            shuffle_seed: None,
        }
    }
}

impl ModelConfig {
    pub fn new(model_type: ModelType, n_folds: usize) -> Self {
        Self {
            model_type,
            cross_validation: CrossValidationConfig {
                n_folds,
                shuffle_seed: None,
            },
        }
    }
}
