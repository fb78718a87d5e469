//! Pipeline Coordinator - 5-stage region selection sequence
//!
//! ```text
//! STAGE 1: Region data loading
//! STAGE 2: Train/validate regression (RegionAnalyzer)
//! STAGE 3: Top-well profit (ProfitCalculator)
//! STAGE 4: Bootstrap distribution (bootstrap_profit)
//! STAGE 5: Ranking + recommendation (select_region)
//! ```

use std::time::Instant;

use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::AnalysisConfig;
use crate::dataset::{load_regions, DatasetError, RegionDataset};
use crate::ml_engine::{ModelError, RegionAnalyzer};
use crate::profit::{
    bootstrap_profit, select_region, sort_by_mean_profit, summarize_region, BootstrapParams,
    ProfitCalculator, ProfitError,
};
use crate::types::{AnalysisReport, RegionSummary, ReportParameters};

/// Errors raised by any pipeline stage, tagged with the failing region
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("Region {region}: model training failed: {source}")]
    Model {
        region: String,
        #[source]
        source: ModelError,
    },

    #[error("Region {region}: profit estimation failed: {source}")]
    Profit {
        region: String,
        #[source]
        source: ProfitError,
    },

    #[error("No regions to analyse")]
    NoRegions,
}

/// Run statistics
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    pub regions_analyzed: usize,
    pub wells_loaded: usize,
    pub bootstrap_iterations: usize,
    pub elapsed_ms: u128,
}

/// Drives the five analysis stages for every configured region
pub struct PipelineCoordinator<'a> {
    config: &'a AnalysisConfig,
    calculator: ProfitCalculator,
    bootstrap: BootstrapParams,
    stats: PipelineStats,
}

impl<'a> PipelineCoordinator<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self {
            config,
            calculator: ProfitCalculator::from_config(config),
            bootstrap: BootstrapParams::from_config(config),
            stats: PipelineStats::default(),
        }
    }

    /// STAGE 1-5: load every configured region file and analyse it.
    pub fn run(&mut self) -> Result<AnalysisReport, PipelineError> {
        info!(regions = self.config.regions.len(), "STAGE 1: loading region data");
        let datasets = load_regions(&self.config.regions, &self.config.loader)?;
        self.analyze(&datasets)
    }

    /// STAGE 2-5 on already loaded datasets.
    pub fn analyze(&mut self, datasets: &[RegionDataset]) -> Result<AnalysisReport, PipelineError> {
        if datasets.is_empty() {
            return Err(PipelineError::NoRegions);
        }
        let started = Instant::now();

        let mut summaries = Vec::with_capacity(datasets.len());
        for dataset in datasets {
            summaries.push(self.analyze_region(dataset)?);
        }

        // STAGE 5: ranking + recommendation
        let max_loss_risk = self.config.economics.max_loss_risk;
        let recommended = select_region(&summaries, max_loss_risk).map(|s| s.region.clone());
        sort_by_mean_profit(&mut summaries);

        match &recommended {
            Some(region) => info!(region = %region, max_loss_risk, "STAGE 5: region recommended"),
            None => warn!(max_loss_risk, "STAGE 5: no region meets the loss-risk limit"),
        }

        self.stats.elapsed_ms = started.elapsed().as_millis();

        Ok(AnalysisReport {
            generated_at: Utc::now(),
            parameters: self.parameters(),
            regions: summaries,
            recommended,
        })
    }

    fn analyze_region(&mut self, dataset: &RegionDataset) -> Result<RegionSummary, PipelineError> {
        // STAGE 2: regression
        let trained = RegionAnalyzer::train(dataset, self.config).map_err(|source| {
            PipelineError::Model {
                region: dataset.name.clone(),
                source,
            }
        })?;

        // STAGE 3-4: profit distribution over validation wells
        let bootstrap = bootstrap_profit(
            &trained.validation_targets,
            &trained.validation_predictions,
            &self.calculator,
            &self.bootstrap,
            self.config.seed,
        )
        .map_err(|source| PipelineError::Profit {
            region: dataset.name.clone(),
            source,
        })?;

        info!(
            region = %dataset.name,
            mean_profit = %format!("{:.2}", bootstrap.mean_profit),
            ci_low = %format!("{:.2}", bootstrap.ci_low),
            ci_high = %format!("{:.2}", bootstrap.ci_high),
            loss_risk_pct = %format!("{:.2}", bootstrap.loss_risk_percent()),
            "STAGE 4: bootstrap complete"
        );

        self.stats.regions_analyzed += 1;
        self.stats.wells_loaded += dataset.len();
        self.stats.bootstrap_iterations += self.bootstrap.iterations;

        Ok(summarize_region(
            trained,
            bootstrap,
            dataset.info.mean_product,
            self.config.economics.max_loss_risk,
        ))
    }

    fn parameters(&self) -> ReportParameters {
        ReportParameters {
            seed: self.config.seed,
            budget_usd: self.calculator.budget_usd,
            revenue_per_unit_usd: self.calculator.revenue_per_unit_usd,
            wells_per_sample: self.bootstrap.wells_per_sample,
            top_wells: self.calculator.top_wells,
            iterations: self.bootstrap.iterations,
            confidence_level: self.bootstrap.confidence_level,
            max_loss_risk: self.config.economics.max_loss_risk,
            break_even_product_per_well: self.calculator.break_even_product_per_well(),
        }
    }

    pub fn stats(&self) -> &PipelineStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GeoRecord;

    fn region(name: &str, n: usize, base: f64) -> RegionDataset {
        let records = (0..n)
            .map(|i| {
                let f0 = (i % 13) as f64 * 0.3;
                let f1 = (i % 7) as f64 - 3.0;
                let f2 = (i % 5) as f64;
                let noise = ((i * 7919) % 17) as f64 - 8.0;
                GeoRecord {
                    id: format!("{name}-{i}"),
                    f0,
                    f1,
                    f2,
                    product: base + 5.0 * f0 + 2.0 * f1 + 8.0 * f2 + noise,
                }
            })
            .collect();
        RegionDataset::from_records(name, records)
    }

    fn small_config() -> AnalysisConfig {
        let mut config = AnalysisConfig::default();
        config.bootstrap.iterations = 200;
        config.bootstrap.wells_per_sample = 50;
        config.economics.top_wells = 20;
        config
    }

    #[test]
    fn test_analyze_ranks_and_recommends() {
        let config = small_config();
        let datasets = vec![region("0", 400, 30.0), region("1", 400, 120.0), region("2", 400, 60.0)];

        let mut coordinator = PipelineCoordinator::new(&config);
        let report = coordinator.analyze(&datasets).unwrap();

        let order: Vec<_> = report.regions.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(order, vec!["1", "2", "0"]);
        assert_eq!(report.recommended.as_deref(), Some("1"));
        assert_eq!(coordinator.stats().regions_analyzed, 3);
        assert_eq!(coordinator.stats().wells_loaded, 1200);
        assert_eq!(coordinator.stats().bootstrap_iterations, 600);
        assert_eq!(report.parameters.top_wells, 20);
    }

    #[test]
    fn test_no_recommendation_when_every_region_loses() {
        let mut config = small_config();
        config.economics.budget_usd = 1.0e12;
        let datasets = vec![region("0", 200, 30.0)];

        let report = PipelineCoordinator::new(&config).analyze(&datasets).unwrap();
        assert!(report.recommended.is_none());
        assert!((report.regions[0].bootstrap.loss_risk - 1.0).abs() < 1e-12);
        assert!(!report.regions[0].within_risk_limit);
    }

    #[test]
    fn test_empty_input_is_error() {
        let config = small_config();
        assert!(matches!(
            PipelineCoordinator::new(&config).analyze(&[]),
            Err(PipelineError::NoRegions)
        ));
    }

    #[test]
    fn test_tiny_region_reports_region_name() {
        let config = small_config();
        let datasets = vec![region("tiny", 1, 30.0)];
        let err = PipelineCoordinator::new(&config).analyze(&datasets).unwrap_err();
        assert!(err.to_string().contains("Region tiny"));
    }
}
