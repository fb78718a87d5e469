//! Bootstrap profit distribution (V1)
//!
//! Each iteration draws `wells_per_sample` validation wells uniformly WITH
//! replacement, develops the top-predicted ones and records the profit. The
//! resulting distribution gives the expected profit, a percentile confidence
//! interval and the probability of a loss.
//!
//! Mean and standard deviation come from `statrs::statistics::Statistics`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use statrs::statistics::Statistics;

use crate::config::AnalysisConfig;
use crate::types::BootstrapResult;

use super::{ProfitCalculator, ProfitError};

/// Resampling parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BootstrapParams {
    pub iterations: usize,
    pub wells_per_sample: usize,
    /// Two-sided confidence level, e.g. 0.95 → 2.5th and 97.5th percentiles
    pub confidence_level: f64,
}

impl BootstrapParams {
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            iterations: config.bootstrap.iterations,
            wells_per_sample: config.bootstrap.wells_per_sample,
            confidence_level: config.bootstrap.confidence_level,
        }
    }

    /// Lower and upper percentile fractions of the interval.
    pub fn interval_bounds(&self) -> (f64, f64) {
        let tail = (1.0 - self.confidence_level) / 2.0;
        (tail, 1.0 - tail)
    }
}

/// Estimate the profit distribution of a region by bootstrap resampling.
///
/// A fresh `StdRng` seeded with `seed` drives the draws, so results depend
/// only on the inputs and the seed.
pub fn bootstrap_profit(
    targets: &[f64],
    predictions: &[f64],
    calculator: &ProfitCalculator,
    params: &BootstrapParams,
    seed: u64,
) -> Result<BootstrapResult, ProfitError> {
    if targets.len() != predictions.len() {
        return Err(ProfitError::LengthMismatch {
            targets: targets.len(),
            predictions: predictions.len(),
        });
    }
    if targets.is_empty() {
        return Err(ProfitError::EmptyValidationSet);
    }
    if params.iterations == 0 || params.wells_per_sample == 0 {
        return Err(ProfitError::EmptyBootstrap);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let n = targets.len();

    // Scratch buffers reused across iterations
    let mut sample_targets = Vec::with_capacity(params.wells_per_sample);
    let mut sample_predictions = Vec::with_capacity(params.wells_per_sample);
    let mut order = Vec::with_capacity(params.wells_per_sample);

    let mut profits = Vec::with_capacity(params.iterations);
    for _ in 0..params.iterations {
        sample_targets.clear();
        sample_predictions.clear();
        for _ in 0..params.wells_per_sample {
            let idx = rng.gen_range(0..n);
            sample_targets.push(targets[idx]);
            sample_predictions.push(predictions[idx]);
        }
        profits.push(calculator.profit_with_buffer(
            &sample_targets,
            &sample_predictions,
            &mut order,
        ));
    }

    let mean_profit = profits.iter().mean();
    let std_dev = if profits.len() > 1 {
        profits.iter().std_dev()
    } else {
        0.0
    };

    let mut sorted = profits.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let (low, high) = params.interval_bounds();
    let ci_low = percentile(&sorted, low);
    let ci_high = percentile(&sorted, high);

    let losses = profits.iter().filter(|&&p| p < 0.0).count();
    let loss_risk = losses as f64 / profits.len() as f64;

    tracing::debug!(
        iterations = params.iterations,
        mean_profit,
        ci_low,
        ci_high,
        loss_risk,
        "Bootstrap complete"
    );

    Ok(BootstrapResult {
        profits,
        mean_profit,
        std_dev,
        ci_low,
        ci_high,
        confidence_level: params.confidence_level,
        loss_risk,
    })
}

/// Percentile of an ascending-sorted slice, `p01` in [0, 1].
///
/// Linear interpolation between the two closest ranks.
pub fn percentile(sorted: &[f64], p01: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let p = p01.clamp(0.0, 1.0);
    let n = sorted.len();
    let idx = p * (n.saturating_sub(1) as f64);
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let w = idx - (lo as f64);
    sorted[lo] * (1.0 - w) + sorted[hi] * w
}
