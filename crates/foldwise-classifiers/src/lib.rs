//! foldwise-classifiers: small from-scratch classifiers with k-fold evaluation.
//!
//! This crate provides a logistic regression model trained by batch gradient
//! descent, a k-nearest-neighbor classifier with pluggable distance metrics
//! and a deterministic tie-break, a contiguous k-fold splitter and the
//! harness that scores a model across folds, plus loaders for delimited
//! UCI-style dataset files.
//!
//! Every model implements [`models::classifier_trait::ClassifierModel`],
//! whose `fit` resets learned state so one instance can be reused across
//! folds.
pub mod config;
pub mod cross_validation;
pub mod data_handling;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod preprocessing;
pub mod stats;

pub use error::{ClassifierError, Result};
