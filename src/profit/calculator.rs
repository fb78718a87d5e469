//! Top-well profit calculation.
//!
//! Development picks the wells with the highest PREDICTED reserves, but the
//! money comes from their ACTUAL reserves:
//!
//! profit = Σ actual(top wells by prediction) × revenue_per_unit - budget

use std::cmp::Ordering;

use crate::config::AnalysisConfig;

use super::ProfitError;

/// Economics of developing one region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfitCalculator {
    /// Development budget (USD)
    pub budget_usd: f64,
    /// Revenue per thousand barrels (USD)
    pub revenue_per_unit_usd: f64,
    /// Wells developed per sample
    pub top_wells: usize,
}

impl ProfitCalculator {
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            budget_usd: config.economics.budget_usd,
            revenue_per_unit_usd: config.economics.revenue_per_unit_usd,
            top_wells: config.economics.top_wells,
        }
    }

    /// Profit of developing the `top_wells` highest-predicted wells of a sample.
    ///
    /// Ties in prediction keep sample order. Samples smaller than `top_wells`
    /// develop every well.
    pub fn profit(&self, targets: &[f64], predictions: &[f64]) -> Result<f64, ProfitError> {
        if targets.len() != predictions.len() {
            return Err(ProfitError::LengthMismatch {
                targets: targets.len(),
                predictions: predictions.len(),
            });
        }

        let mut order: Vec<usize> = (0..predictions.len()).collect();
        Ok(self.profit_with_buffer(targets, predictions, &mut order))
    }

    /// Same as [`Self::profit`] without the length check, reusing `order` as scratch space.
    pub(crate) fn profit_with_buffer(
        &self,
        targets: &[f64],
        predictions: &[f64],
        order: &mut Vec<usize>,
    ) -> f64 {
        order.clear();
        order.extend(0..predictions.len());
        // Stable sort, descending by prediction
        order.sort_by(|&a, &b| {
            predictions[b]
                .partial_cmp(&predictions[a])
                .unwrap_or(Ordering::Equal)
        });

        let total_product: f64 = order
            .iter()
            .take(self.top_wells)
            .map(|&i| targets[i])
            .sum();

        total_product * self.revenue_per_unit_usd - self.budget_usd
    }

    /// Mean reserve per developed well (thousand barrels) needed to break even.
    pub fn break_even_product_per_well(&self) -> f64 {
        self.budget_usd / (self.revenue_per_unit_usd * self.top_wells as f64)
    }
}
