//! Region summaries and the risk-constrained recommendation.

use std::cmp::Ordering;

use crate::types::{BootstrapResult, RegionSummary, TrainedRegion};

/// Combine a trained region with its bootstrap distribution.
pub fn summarize_region(
    trained: TrainedRegion,
    bootstrap: BootstrapResult,
    mean_product: f64,
    max_loss_risk: f64,
) -> RegionSummary {
    let within_risk_limit = bootstrap.loss_risk < max_loss_risk;
    RegionSummary {
        region: trained.region,
        metrics: trained.metrics,
        coefficients: trained.coefficients,
        within_risk_limit,
        bootstrap,
        mean_product,
    }
}

/// Pick the region with the highest mean profit among those whose loss risk
/// is strictly below `max_loss_risk`.
///
/// Returns `None` when no region qualifies. Equal mean profits resolve to the
/// region listed first.
pub fn select_region(summaries: &[RegionSummary], max_loss_risk: f64) -> Option<&RegionSummary> {
    summaries
        .iter()
        .filter(|s| s.bootstrap.loss_risk < max_loss_risk)
        .fold(None, |best: Option<&RegionSummary>, s| match best {
            Some(b)
                if b.bootstrap
                    .mean_profit
                    .partial_cmp(&s.bootstrap.mean_profit)
                    .unwrap_or(Ordering::Equal)
                    != Ordering::Less =>
            {
                Some(b)
            }
            _ => Some(s),
        })
}

/// Sort summaries by mean profit, best first.
pub fn sort_by_mean_profit(summaries: &mut [RegionSummary]) {
    summaries.sort_by(|a, b| {
        b.bootstrap
            .mean_profit
            .partial_cmp(&a.bootstrap.mean_profit)
            .unwrap_or(Ordering::Equal)
    });
}
