//! Regression types: validation metrics and trained region models.

use serde::{Deserialize, Serialize};

use super::FEATURE_COUNT;

/// Validation quality of a region model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelMetrics {
    /// Root mean squared error on the validation set
    pub rmse: f64,
    /// Coefficient of determination on the validation set
    pub r2: f64,
    /// Mean predicted reserve volume on the validation set
    pub mean_predicted: f64,
    /// Mean actual reserve volume on the validation set
    pub mean_actual: f64,
    pub train_rows: usize,
    pub validation_rows: usize,
}

/// Fitted linear model: `product = intercept + coefficients · [f0, f1, f2]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearCoefficients {
    pub intercept: f64,
    pub coefficients: [f64; FEATURE_COUNT],
}

/// Output of training one region: the model plus its held-out validation data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainedRegion {
    pub region: String,
    pub coefficients: LinearCoefficients,
    pub metrics: ModelMetrics,
    /// Actual reserves of the validation wells
    pub validation_targets: Vec<f64>,
    /// Model predictions for the validation wells (same order)
    pub validation_predictions: Vec<f64>,
}
