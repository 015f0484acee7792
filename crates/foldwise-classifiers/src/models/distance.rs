//! Pluggable dissimilarity measures for the nearest-neighbor classifier.
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::math::vector::check_len;

/// A non-negative dissimilarity between two equal-length feature vectors.
pub trait DistanceMetric {
    /// Fails with `DimensionMismatch` when the vectors differ in length.
    fn distance(&self, a: &[f64], b: &[f64]) -> Result<f64>;

    fn name(&self) -> &str {
        "distance"
    }
}

/// Square root of the summed squared differences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Euclidean;

impl DistanceMetric for Euclidean {
    fn distance(&self, a: &[f64], b: &[f64]) -> Result<f64> {
        check_len(a, b)?;
        let squared: f64 = a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum();
        Ok(squared.sqrt())
    }

    fn name(&self) -> &str {
        "euclidean"
    }
}

/// Sum of absolute differences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Manhattan;

impl DistanceMetric for Manhattan {
    fn distance(&self, a: &[f64], b: &[f64]) -> Result<f64> {
        check_len(a, b)?;
        Ok(a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum())
    }

    fn name(&self) -> &str {
        "manhattan"
    }
}

/// Metric selector used by configuration files and the CLI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    #[default]
    Euclidean,
    Manhattan,
}

impl DistanceMetric for MetricKind {
    fn distance(&self, a: &[f64], b: &[f64]) -> Result<f64> {
        match self {
            MetricKind::Euclidean => Euclidean.distance(a, b),
            MetricKind::Manhattan => Manhattan.distance(a, b),
        }
    }

    fn name(&self) -> &str {
        match self {
            MetricKind::Euclidean => Euclidean.name(),
            MetricKind::Manhattan => Manhattan.name(),
        }
    }
}

impl std::str::FromStr for MetricKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "euclidean" => Ok(MetricKind::Euclidean),
            "manhattan" => Ok(MetricKind::Manhattan),
            _ => Err(format!("Unknown distance metric: {}", s)),
        }
    }
}
