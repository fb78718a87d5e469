//! Region Profit: oil-region selection from exploration-well data
//!
//! For each candidate region a linear regression predicts well reserves from
//! three geological features. The predicted best wells are then priced
//! against the development budget and bootstrapped to estimate mean profit,
//! a confidence interval and the risk of loss.
//!
//! ## Architecture
//!
//! - **Dataset**: CSV loading and validation of `id,f0,f1,f2,product` files
//! - **ML Engine**: seeded train/validation split, OLS fit, RMSE and R²
//! - **Profit**: top-well profit, bootstrap distribution, region selection
//! - **Pipeline**: drives the stages for every configured region
//! - **Report**: console tables and JSON export

pub mod config;
pub mod dataset;
pub mod ml_engine;
pub mod pipeline;
pub mod profit;
pub mod report;
pub mod synthetic;
pub mod types;

// Re-export configuration
pub use config::{AnalysisConfig, ConfigError, RegionSource};

// Re-export commonly used types
pub use types::{
    AnalysisReport, BootstrapResult, DatasetInfo, GeoRecord, LinearCoefficients, ModelMetrics,
    RegionSummary, ReportParameters, TrainedRegion,
};

// Re-export stage entry points
pub use dataset::{load_regions, DatasetError, RegionDataset};
pub use ml_engine::{ModelError, RegionAnalyzer, RegionModel};
pub use pipeline::{PipelineCoordinator, PipelineError, PipelineStats};
pub use profit::{bootstrap_profit, select_region, BootstrapParams, ProfitCalculator, ProfitError};
