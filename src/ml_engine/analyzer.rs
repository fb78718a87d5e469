//! Region Analyzer
//!
//! Orchestrates model training for one region:
//! 1. Seeded train/validation split
//! 2. OLS fit on the training rows
//! 3. Prediction on the validation rows
//! 4. Validation metrics (RMSE, R², means)

use ndarray::Axis;

use crate::config::AnalysisConfig;
use crate::dataset::RegionDataset;
use crate::types::{ModelMetrics, TrainedRegion};

use super::{metrics, split::split_train_validation, ModelError, RegionModel};

/// Trains and validates the per-region reserve model
pub struct RegionAnalyzer;

impl RegionAnalyzer {
    /// Run split → fit → predict → score on one region.
    ///
    /// The split uses `config.seed`, so every region is split with the same
    /// seed and repeated runs select the same validation wells.
    pub fn train(
        dataset: &RegionDataset,
        config: &AnalysisConfig,
    ) -> Result<TrainedRegion, ModelError> {
        let split = split_train_validation(
            dataset.len(),
            config.model.validation_fraction,
            config.seed,
        )?;

        let features = dataset.features();
        let targets = dataset.targets();

        let train_x = features.select(Axis(0), &split.train);
        let train_y = targets.select(Axis(0), &split.train);
        let valid_x = features.select(Axis(0), &split.validation);
        let valid_y = targets.select(Axis(0), &split.validation);

        let model = RegionModel::fit(train_x, train_y)?;
        let predictions = model.predict(&valid_x);

        let validation_targets = valid_y.to_vec();
        let validation_predictions = predictions.to_vec();

        let metrics = ModelMetrics {
            rmse: metrics::rmse(&validation_targets, &validation_predictions),
            r2: metrics::r2_score(&validation_targets, &validation_predictions),
            mean_predicted: metrics::mean(&validation_predictions),
            mean_actual: metrics::mean(&validation_targets),
            train_rows: split.train.len(),
            validation_rows: split.validation.len(),
        };

        tracing::info!(
            region = %dataset.name,
            train_rows = metrics.train_rows,
            validation_rows = metrics.validation_rows,
            rmse = %format!("{:.2}", metrics.rmse),
            r2 = %format!("{:.3}", metrics.r2),
            mean_predicted = %format!("{:.2}", metrics.mean_predicted),
            "Region model trained"
        );

        Ok(TrainedRegion {
            region: dataset.name.clone(),
            coefficients: model.coefficients(),
            metrics,
            validation_targets,
            validation_predictions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GeoRecord;

    fn linear_dataset(n: usize) -> RegionDataset {
        let records = (0..n)
            .map(|i| {
                let f0 = (i % 7) as f64;
                let f1 = (i % 11) as f64 * 0.5;
                let f2 = (i % 5) as f64 - 2.0;
                GeoRecord {
                    id: format!("w{i}"),
                    f0,
                    f1,
                    f2,
                    product: 50.0 + 4.0 * f0 - 2.0 * f1 + 10.0 * f2,
                }
            })
            .collect();
        RegionDataset::from_records("test", records)
    }

    #[test]
    fn test_train_on_exact_linear_region() {
        let ds = linear_dataset(200);
        let trained = RegionAnalyzer::train(&ds, &AnalysisConfig::default()).unwrap();

        assert_eq!(trained.region, "test");
        assert_eq!(trained.metrics.validation_rows, 50);
        assert_eq!(trained.metrics.train_rows, 150);
        assert_eq!(trained.validation_targets.len(), 50);
        assert_eq!(trained.validation_predictions.len(), 50);
        assert!(trained.metrics.rmse < 1e-6, "rmse = {}", trained.metrics.rmse);
        assert!((trained.metrics.r2 - 1.0).abs() < 1e-9);
        assert!((trained.coefficients.coefficients[2] - 10.0).abs() < 1e-6);
        assert!((trained.metrics.mean_predicted - trained.metrics.mean_actual).abs() < 1e-6);
    }

    #[test]
    fn test_train_is_deterministic() {
        let ds = linear_dataset(120);
        let config = AnalysisConfig::default();
        let a = RegionAnalyzer::train(&ds, &config).unwrap();
        let b = RegionAnalyzer::train(&ds, &config).unwrap();
        assert_eq!(a.validation_targets, b.validation_targets);
        assert_eq!(a.validation_predictions, b.validation_predictions);
    }

    #[test]
    fn test_tiny_region_cannot_be_split() {
        let ds = linear_dataset(1);
        let err = RegionAnalyzer::train(&ds, &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, ModelError::SplitTooSmall { rows: 1, .. }));
    }
}
