//! Run configuration and the cross-validated evaluation it drives.
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::{Deserialize, Serialize};

use foldwise_classifiers::config::{ModelConfig, ModelType};
use foldwise_classifiers::cross_validation::{CrossValidationReport, CrossValidator};
use foldwise_classifiers::io::{load_numeric, load_raw, ReaderConfig};
use foldwise_classifiers::models::distance::MetricKind;
use foldwise_classifiers::models::factory::{build_model, Model};
use foldwise_classifiers::preprocessing::encode_features;

use crate::datasets::DatasetId;

/// Everything needed for one evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub model: ModelConfig,
    pub dataset: DatasetId,
    pub data_dir: PathBuf,
    pub reader: ReaderConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            dataset: DatasetId::default(),
            data_dir: PathBuf::from("data"),
            reader: ReaderConfig::default(),
        }
    }
}

/// Load a run configuration from a JSON file.
pub fn load_run_config<P: AsRef<Path>>(path: P) -> Result<RunConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config: RunConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.display()))?;
    Ok(config)
}

impl RunConfig {
    /// Start from `--config` (or defaults) and apply the command-line
    /// overrides. Hyper-parameter flags only touch the selected model.
    pub fn from_arguments(matches: &ArgMatches) -> Result<Self> {
        let mut config = match matches.get_one::<PathBuf>("config") {
            Some(path) => load_run_config(path)?,
            None => RunConfig::default(),
        };

        if let Some(model) = matches.get_one::<String>("model") {
            if model.as_str() != config.model.model_type.name() {
                config.model.model_type = ModelType::from_str(model).map_err(anyhow::Error::msg)?;
            }
        }

        match &mut config.model.model_type {
            ModelType::Logistic {
                learning_rate,
                max_iterations,
                ..
            } => {
                if let Some(lr) = matches.get_one::<f64>("lr") {
                    *learning_rate = *lr;
                }
                if let Some(iters) = matches.get_one::<usize>("iters") {
                    *max_iterations = *iters;
                }
            }
            ModelType::Knn { k, metric } => {
                if let Some(value) = matches.get_one::<usize>("k") {
                    *k = *value;
                }
                if let Some(name) = matches.get_one::<String>("metric") {
                    *metric = MetricKind::from_str(name).map_err(anyhow::Error::msg)?;
                }
            }
        }

        if let Some(folds) = matches.get_one::<usize>("folds") {
            config.model.cross_validation.n_folds = *folds;
        }
        if let Some(seed) = matches.get_one::<u64>("seed") {
            config.model.cross_validation.shuffle_seed = Some(*seed);
        }
        if let Some(dataset) = matches.get_one::<String>("dataset") {
            config.dataset = DatasetId::from_str(dataset).map_err(anyhow::Error::msg)?;
        }
        if let Some(data_dir) = matches.get_one::<PathBuf>("data_dir") {
            config.data_dir = data_dir.clone();
        }
        if let Some(positive) = matches.get_one::<String>("positive_label") {
            config.reader.positive_label = Some(positive.clone());
        }

        Ok(config)
    }

    pub fn data_path(&self) -> PathBuf {
        self.dataset.path_in(&self.data_dir)
    }
}

/// Load the configured dataset and cross-validate the configured model on it.
pub fn run_evaluation(config: &RunConfig) -> Result<CrossValidationReport> {
    let path = config.data_path();
    let reader = config.dataset.reader_defaults(&config.reader);
    let validator = CrossValidator::new(config.model.cross_validation.clone());

    log::info!(
        "Evaluating {} on {} ({}) with {} folds",
        config.model.model_type.name(),
        config.dataset,
        path.display(),
        validator.n_folds()
    );

    let report = match build_model(&config.model)? {
        Model::Logistic(mut model) => {
            let data = load_numeric(&path, &reader)?;
            data.log_input_data_summary();
            validator.run(&mut model, &data)?
        }
        Model::Knn(mut model) => {
            let combined = encode_features(&load_raw(&path, &reader)?);
            log::info!(
                "Input data: {} rows, {} feature columns",
                combined.nrows(),
                combined.ncols().saturating_sub(1)
            );
            validator.run_combined(&mut model, &combined)?
        }
    };
    Ok(report)
}
