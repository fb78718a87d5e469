//! Analysis Configuration Module
//!
//! Provides the run configuration loaded from TOML files: region data files,
//! economics, bootstrap sampling and model parameters.
//!
//! ## Loading Order
//!
//! 1. `REGION_PROFIT_CONFIG` environment variable (path to TOML file)
//! 2. `region_config.toml` in the current working directory
//! 3. Built-in defaults (see [`defaults`])
//!
//! ## Usage
//!
//! ```ignore
//! let config = AnalysisConfig::load();
//! let report = PipelineCoordinator::new(&config).run()?;
//! ```

mod analysis_config;
pub mod defaults;
pub mod validation;

pub use analysis_config::*;
