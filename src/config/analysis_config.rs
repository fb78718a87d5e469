//! Analysis Configuration - every run parameter as an operator-tunable TOML value
//!
//! Each struct implements `Default` with the values from [`super::defaults`],
//! so a run without a config file reproduces the reference analysis.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for one region-selection run.
///
/// Load with `AnalysisConfig::load()` which searches:
/// 1. `$REGION_PROFIT_CONFIG` env var
/// 2. `./region_config.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Seed for the train/validation split and the bootstrap sampler
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Candidate regions, analysed in this order
    #[serde(default = "default_regions")]
    pub regions: Vec<RegionSource>,

    /// Budget, revenue and risk limits
    #[serde(default)]
    pub economics: EconomicsConfig,

    /// Bootstrap sampling
    #[serde(default)]
    pub bootstrap: BootstrapConfig,

    /// Regression training
    #[serde(default)]
    pub model: ModelConfig,

    /// CSV loading behaviour
    #[serde(default)]
    pub loader: LoaderConfig,
}

fn default_seed() -> u64 {
    defaults::SEED
}

fn default_regions() -> Vec<RegionSource> {
    defaults::REGION_FILES
        .iter()
        .map(|(name, path)| RegionSource::new(*name, *path))
        .collect()
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            regions: default_regions(),
            economics: EconomicsConfig::default(),
            bootstrap: BootstrapConfig::default(),
            model: ModelConfig::default(),
            loader: LoaderConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load configuration using the standard search order:
    /// 1. `$REGION_PROFIT_CONFIG` environment variable
    /// 2. `./region_config.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(defaults::CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), regions = config.regions.len(), "Loaded analysis config from REGION_PROFIT_CONFIG");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from REGION_PROFIT_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "REGION_PROFIT_CONFIG points to non-existent file, falling back");
            }
        }

        // 2. Check ./region_config.toml
        let local = PathBuf::from(defaults::LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!(regions = config.regions.len(), "Loaded analysis config from ./region_config.toml");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./region_config.toml, using defaults");
                }
            }
        }

        // 3. Defaults
        info!("No region_config.toml found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    ///
    /// Unknown keys are logged as warnings; parse and validation failures are errors.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;

        let config = Self::from_toml_str(&contents)
            .map_err(|e| match e {
                ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
                other => other,
            })?;
        Ok(config)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        // Two-pass: check for unknown keys first (warnings only)
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Save config to a file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Analysis config saved");
        Ok(())
    }

    /// Validate all parameters for internal consistency.
    ///
    /// Rules:
    /// - At least one region, with unique non-empty names
    /// - `top_wells` must fit inside one bootstrap sample
    /// - Fractions and probabilities must lie in their open/closed unit ranges
    /// - Every float must be finite
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        // Regions
        if self.regions.is_empty() {
            errors.push("regions: at least one region must be configured".to_string());
        }
        let mut seen = HashSet::new();
        for region in &self.regions {
            if region.name.trim().is_empty() {
                errors.push(format!(
                    "regions: entry for '{}' has an empty name",
                    region.path.display()
                ));
            } else if !seen.insert(region.name.as_str()) {
                errors.push(format!("regions: duplicate region name '{}'", region.name));
            }
        }

        // Sample sizing: developed wells are chosen out of the explored sample
        let e = &self.economics;
        let b = &self.bootstrap;
        if e.top_wells == 0 {
            errors.push("economics.top_wells must be > 0".to_string());
        }
        if b.wells_per_sample == 0 {
            errors.push("bootstrap.wells_per_sample must be > 0".to_string());
        }
        if e.top_wells > b.wells_per_sample {
            errors.push(format!(
                "economics.top_wells ({}) must be <= bootstrap.wells_per_sample ({})",
                e.top_wells, b.wells_per_sample
            ));
        }
        if b.iterations == 0 {
            errors.push("bootstrap.iterations must be > 0".to_string());
        }

        // Floats: finite first, then physical ranges
        Self::check_finite(e.budget_usd, "economics.budget_usd", &mut errors);
        Self::check_finite(e.revenue_per_unit_usd, "economics.revenue_per_unit_usd", &mut errors);
        Self::check_finite(e.max_loss_risk, "economics.max_loss_risk", &mut errors);
        Self::check_finite(b.confidence_level, "bootstrap.confidence_level", &mut errors);
        Self::check_finite(self.model.validation_fraction, "model.validation_fraction", &mut errors);

        let (range_errors, range_warnings) = super::validation::validate_ranges(self);
        errors.extend(range_errors);
        for w in &range_warnings {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_finite(value: f64, name: &str, errors: &mut Vec<String>) {
        // NaN comparisons silently pass the range checks, catch them here
        if !value.is_finite() {
            errors.push(format!("{name}: value must be finite (got {value})"));
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Regions
// ============================================================================

/// One candidate region and the CSV holding its exploration wells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSource {
    /// Region name used in logs and reports
    pub name: String,
    /// Path to the region CSV (`id,f0,f1,f2,product`)
    pub path: PathBuf,
}

impl RegionSource {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

// ============================================================================
// Economics
// ============================================================================

/// Development budget, revenue and the risk limit used to pick a region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomicsConfig {
    /// Budget to develop wells in one region (USD)
    #[serde(default = "default_budget")]
    pub budget_usd: f64,

    /// Revenue per thousand barrels (USD)
    #[serde(default = "default_revenue")]
    pub revenue_per_unit_usd: f64,

    /// Wells developed out of each explored sample
    #[serde(default = "default_top_wells")]
    pub top_wells: usize,

    /// Maximum probability of a loss for a region to be recommended (0.0 - 1.0)
    #[serde(default = "default_max_loss_risk")]
    pub max_loss_risk: f64,
}

fn default_budget() -> f64 {
    defaults::BUDGET_USD
}
fn default_revenue() -> f64 {
    defaults::REVENUE_PER_UNIT_USD
}
fn default_top_wells() -> usize {
    defaults::TOP_WELLS
}
fn default_max_loss_risk() -> f64 {
    defaults::MAX_LOSS_RISK
}

impl Default for EconomicsConfig {
    fn default() -> Self {
        Self {
            budget_usd: default_budget(),
            revenue_per_unit_usd: default_revenue(),
            top_wells: default_top_wells(),
            max_loss_risk: default_max_loss_risk(),
        }
    }
}

// ============================================================================
// Bootstrap
// ============================================================================

/// Resampling parameters for the profit distribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Number of resamples per region
    #[serde(default = "default_iterations")]
    pub iterations: usize,

    /// Wells drawn (with replacement) from the validation set per resample
    #[serde(default = "default_wells_per_sample")]
    pub wells_per_sample: usize,

    /// Two-sided confidence level of the profit interval
    #[serde(default = "default_confidence_level")]
    pub confidence_level: f64,
}

fn default_iterations() -> usize {
    defaults::BOOTSTRAP_ITERATIONS
}
fn default_wells_per_sample() -> usize {
    defaults::WELLS_PER_SAMPLE
}
fn default_confidence_level() -> f64 {
    defaults::CONFIDENCE_LEVEL
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            wells_per_sample: default_wells_per_sample(),
            confidence_level: default_confidence_level(),
        }
    }
}

// ============================================================================
// Model
// ============================================================================

/// Regression training parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Share of each region held out for validation (exclusive 0.0 - 1.0)
    #[serde(default = "default_validation_fraction")]
    pub validation_fraction: f64,
}

fn default_validation_fraction() -> f64 {
    defaults::VALIDATION_FRACTION
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            validation_fraction: default_validation_fraction(),
        }
    }
}

// ============================================================================
// Loader
// ============================================================================

/// CSV loading behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Skip rows with unparseable or non-finite numbers instead of failing
    #[serde(default = "default_skip_invalid_rows")]
    pub skip_invalid_rows: bool,
}

fn default_skip_invalid_rows() -> bool {
    true
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            skip_invalid_rows: default_skip_invalid_rows(),
        }
    }
}
