//! Synthetic region generator
//!
//! Produces exploration-well data with a known linear reserve model plus
//! Gaussian noise, in the same CSV layout as the field data. Used by the
//! `synthetic-regions` binary and by tests.

use std::path::Path;

use rand::prelude::*;
use rand_distr::{Distribution, Normal};
use thiserror::Error;

use crate::types::GeoRecord;

#[derive(Debug, Error)]
pub enum SyntheticError {
    #[error("Invalid distribution parameter for region {region}: {message}")]
    Distribution { region: String, message: String },

    #[error("Failed to write {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}

/// Generating model of one region:
/// `product = intercept + Σ coefficientᵢ · fᵢ + N(0, noise_sd)`, clipped at 0.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionProfile {
    pub name: String,
    pub intercept: f64,
    pub coefficients: [f64; 3],
    /// Mean of each feature
    pub feature_means: [f64; 3],
    /// Standard deviation of each feature
    pub feature_sds: [f64; 3],
    /// Standard deviation of the reserve noise
    pub noise_sd: f64,
}

/// Three profiles shaped like the reference field data: a noisy region, a
/// near-deterministic region with lower reserves, and a region where the
/// features explain little.
pub fn default_profiles() -> Vec<RegionProfile> {
    vec![
        RegionProfile {
            name: "0".to_string(),
            intercept: 77.0,
            coefficients: [3.8, -14.2, 6.6],
            feature_means: [0.5, 0.25, 2.5],
            feature_sds: [0.87, 0.5, 3.25],
            noise_sd: 37.5,
        },
        RegionProfile {
            name: "1".to_string(),
            intercept: 1.6,
            coefficients: [-0.14, -0.02, 26.9],
            feature_means: [1.1, -4.8, 2.5],
            feature_sds: [8.9, 5.1, 1.7],
            noise_sd: 0.9,
        },
        RegionProfile {
            name: "2".to_string(),
            intercept: 80.0,
            coefficients: [0.05, 0.03, 5.7],
            feature_means: [0.0, 0.0, 2.5],
            feature_sds: [1.7, 1.7, 3.5],
            noise_sd: 40.0,
        },
    ]
}

fn normal(region: &str, mean: f64, sd: f64) -> Result<Normal<f64>, SyntheticError> {
    let invalid = |message: String| SyntheticError::Distribution {
        region: region.to_string(),
        message,
    };
    // Normal::new accepts a negative sd and mirrors the samples
    if !(sd >= 0.0 && sd.is_finite()) {
        return Err(invalid(format!("standard deviation must be finite and >= 0, got {sd}")));
    }
    Normal::new(mean, sd).map_err(|e| invalid(e.to_string()))
}

/// Draw `wells` records for one profile.
pub fn generate_region<R: Rng + ?Sized>(
    profile: &RegionProfile,
    wells: usize,
    rng: &mut R,
) -> Result<Vec<GeoRecord>, SyntheticError> {
    let features = [
        normal(&profile.name, profile.feature_means[0], profile.feature_sds[0])?,
        normal(&profile.name, profile.feature_means[1], profile.feature_sds[1])?,
        normal(&profile.name, profile.feature_means[2], profile.feature_sds[2])?,
    ];
    let noise = normal(&profile.name, 0.0, profile.noise_sd)?;

    let records = (0..wells)
        .map(|i| {
            let f = [
                features[0].sample(rng),
                features[1].sample(rng),
                features[2].sample(rng),
            ];
            let signal: f64 = profile.intercept
                + profile
                    .coefficients
                    .iter()
                    .zip(f.iter())
                    .map(|(c, x)| c * x)
                    .sum::<f64>();
            GeoRecord {
                id: format!("{}{:06}", profile.name, i),
                f0: f[0],
                f1: f[1],
                f2: f[2],
                product: (signal + noise.sample(rng)).max(0.0),
            }
        })
        .collect();

    Ok(records)
}

/// Write records as `id,f0,f1,f2,product` CSV.
pub fn write_region_csv(path: &Path, records: &[GeoRecord]) -> Result<(), SyntheticError> {
    let csv_err = |source| SyntheticError::Csv {
        path: path.display().to_string(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
    for record in records {
        writer.serialize(record).map_err(csv_err)?;
    }
    writer
        .flush()
        .map_err(|e| csv_err(csv::Error::from(e)))?;
    Ok(())
}
