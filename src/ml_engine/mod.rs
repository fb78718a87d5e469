//! ML Engine for per-region reserve prediction
//!
//! Fits one ordinary-least-squares model per region on the geological features
//! (f0, f1, f2) and scores it on a held-out validation set. The validation
//! predictions feed the profit bootstrap.
//!
//! ## Architecture
//! - `split`: seeded train/validation shuffle split
//! - `regression`: linear model fit and prediction (linfa-linear)
//! - `metrics`: RMSE, R² and means on validation data
//! - `analyzer`: orchestrates split → fit → predict → score for one region

pub mod split;
pub mod regression;
pub mod metrics;
pub mod analyzer;

use thiserror::Error;

// Re-export public types
pub use split::{split_train_validation, TrainValidationSplit};
pub use regression::RegionModel;
pub use analyzer::RegionAnalyzer;

/// Errors raised while training a region model
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Cannot split {rows} rows with validation fraction {fraction}: both parts must be non-empty")]
    SplitTooSmall { rows: usize, fraction: f64 },

    #[error("Feature rows ({features}) and targets ({targets}) differ in length")]
    LengthMismatch { features: usize, targets: usize },

    #[error("Linear regression fit failed: {0}")]
    Fit(String),
}
