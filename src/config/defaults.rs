//! System-wide default constants.
//!
//! Every default the analysis runs with lives here, grouped by pipeline stage.
//! The config structs fall back to these when a key is absent from the TOML file.

// ============================================================================
// Reproducibility
// ============================================================================

/// Seed shared by the train/validation split and the bootstrap sampler.
pub const SEED: u64 = 12_345;

// ============================================================================
// Data Loading
// ============================================================================

/// Region files looked up when no `[[regions]]` are configured: (name, path).
pub const REGION_FILES: [(&str, &str); 3] = [
    ("0", "Data/geo_data_0.csv"),
    ("1", "Data/geo_data_1.csv"),
    ("2", "Data/geo_data_2.csv"),
];

// ============================================================================
// Model
// ============================================================================

/// Share of each region held out for validation.
pub const VALIDATION_FRACTION: f64 = 0.25;

// ============================================================================
// Economics
// ============================================================================

/// Budget to develop wells in one region (USD).
pub const BUDGET_USD: f64 = 10_000_000.0;

/// Revenue per unit of product (USD). One unit is a thousand barrels.
pub const REVENUE_PER_UNIT_USD: f64 = 4_500.0;

/// Wells developed in the chosen region (highest predicted reserves).
pub const TOP_WELLS: usize = 200;

/// Maximum admissible probability of a loss for a region to be recommended.
pub const MAX_LOSS_RISK: f64 = 0.025;

// ============================================================================
// Bootstrap
// ============================================================================

/// Wells explored per bootstrap sample.
pub const WELLS_PER_SAMPLE: usize = 500;

/// Bootstrap iterations per region.
pub const BOOTSTRAP_ITERATIONS: usize = 1_000;

/// Two-sided confidence level of the profit interval.
pub const CONFIDENCE_LEVEL: f64 = 0.95;

// ============================================================================
// Config discovery
// ============================================================================

/// Environment variable holding an explicit config path.
pub const CONFIG_ENV_VAR: &str = "REGION_PROFIT_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "region_config.toml";
