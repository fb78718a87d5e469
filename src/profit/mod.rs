//! Profit Engine
//!
//! Turns validation predictions into an economic decision:
//! - `calculator`: deterministic profit of developing the top-predicted wells
//! - `bootstrap`: resampled profit distribution, confidence interval and loss risk
//! - `selection`: per-region summaries and the risk-constrained recommendation

pub mod calculator;
pub mod bootstrap;
pub mod selection;

use thiserror::Error;

pub use calculator::ProfitCalculator;
pub use bootstrap::{bootstrap_profit, percentile, BootstrapParams};
pub use selection::{select_region, sort_by_mean_profit, summarize_region};

/// Errors raised by profit estimation
#[derive(Debug, Error)]
pub enum ProfitError {
    #[error("Validation set is empty")]
    EmptyValidationSet,

    #[error("Targets ({targets}) and predictions ({predictions}) differ in length")]
    LengthMismatch { targets: usize, predictions: usize },

    #[error("Bootstrap needs at least one iteration and one well per sample")]
    EmptyBootstrap,
}
