//! Profit types: bootstrap distributions, per-region summaries and the final report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{LinearCoefficients, ModelMetrics};

/// Profit distribution produced by bootstrap resampling of validation wells.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapResult {
    /// Profit of every bootstrap iteration, in draw order (USD)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub profits: Vec<f64>,
    pub mean_profit: f64,
    /// Sample standard deviation of the profits
    pub std_dev: f64,
    /// Lower bound of the confidence interval
    pub ci_low: f64,
    /// Upper bound of the confidence interval
    pub ci_high: f64,
    /// Confidence level the interval was computed for (e.g. 0.95)
    pub confidence_level: f64,
    /// Share of iterations with negative profit (0.0 - 1.0)
    pub loss_risk: f64,
}

impl BootstrapResult {
    /// Loss risk expressed in percent.
    pub fn loss_risk_percent(&self) -> f64 {
        self.loss_risk * 100.0
    }
}

/// Everything known about one region after the full pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionSummary {
    pub region: String,
    pub metrics: ModelMetrics,
    pub coefficients: LinearCoefficients,
    pub bootstrap: BootstrapResult,
    /// Mean reserve of all wells in the region file
    pub mean_product: f64,
    /// Whether the loss risk is below the configured maximum
    pub within_risk_limit: bool,
}

/// Economic and sampling parameters the analysis ran with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportParameters {
    pub seed: u64,
    pub budget_usd: f64,
    pub revenue_per_unit_usd: f64,
    pub wells_per_sample: usize,
    pub top_wells: usize,
    pub iterations: usize,
    pub confidence_level: f64,
    pub max_loss_risk: f64,
    /// Mean reserve per developed well needed to break even
    pub break_even_product_per_well: f64,
}

/// Final analysis output, regions sorted by mean profit (best first).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub parameters: ReportParameters,
    pub regions: Vec<RegionSummary>,
    /// Name of the recommended region, if any region passes the risk limit
    pub recommended: Option<String>,
}

impl AnalysisReport {
    /// Summary of the recommended region.
    pub fn recommended_summary(&self) -> Option<&RegionSummary> {
        let name = self.recommended.as_deref()?;
        self.regions.iter().find(|r| r.region == name)
    }
}
