use crate::config::{ModelConfig, ModelType};
use crate::error::Result;
use crate::models::distance::MetricKind;
use crate::models::knn::KnnClassifier;
use crate::models::logistic::{GradientDescent, LogisticClassifier};

/// A configured, unfitted classifier.
///
/// The two models disagree on their label type (0/1 codes for logistic
/// regression, raw class names for k-NN), so they are returned as variants
/// rather than behind one trait object.
#[derive(Debug, Clone)]
pub enum Model {
    Logistic(LogisticClassifier),
    Knn(KnnClassifier<String, MetricKind>),
}

impl Model {
    pub fn name(&self) -> &'static str {
        match self {
            Model::Logistic(_) => "logistic",
            Model::Knn(_) => "knn",
        }
    }
}

/// Build a classifier from a `ModelConfig`, validating its hyper-parameters.
pub fn build_model(params: &ModelConfig) -> Result<Model> {
    match params.model_type {
        ModelType::Logistic {
            learning_rate,
            max_iterations,
            tolerance,
        } => {
            let optimizer = GradientDescent::new(learning_rate, max_iterations, tolerance)?;
            let model = LogisticClassifier::with_optimizer(optimizer)?;
            Ok(Model::Logistic(model))
        }
        ModelType::Knn { k, metric } => Ok(Model::Knn(KnnClassifier::with_metric(k, metric)?)),
    }
}
