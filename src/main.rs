//! Region Profit - oil-region selection from exploration-well data
//!
//! Trains a reserve regression per region, bootstraps the profit of the
//! predicted best wells and recommends the most profitable region whose
//! loss risk stays under the configured limit.
//!
//! # Usage
//!
//! ```bash
//! # Run with region_config.toml or built-in defaults (Data/geo_data_{0,1,2}.csv)
//! cargo run --release
//!
//! # Explicit region files and JSON export
//! ./region-profit --region north=north.csv --region south=south.csv --json report.json
//!
//! # Write the default config for editing
//! ./region-profit init-config --out region_config.toml
//! ```
//!
//! # Environment Variables
//!
//! - `REGION_PROFIT_CONFIG`: Path to the analysis config TOML
//! - `RUST_LOG`: Logging level (default: info)

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use region_profit::config::AnalysisConfig;
use region_profit::dataset::load_regions;
use region_profit::pipeline::PipelineCoordinator;
use region_profit::report;
use region_profit::RegionSource;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "region-profit")]
#[command(about = "Oil region selection by bootstrapped well profit")]
#[command(version)]
struct CliArgs {
    /// Analysis config TOML (overrides REGION_PROFIT_CONFIG and ./region_config.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Region data file as NAME=PATH; repeat for each region.
    /// Replaces the configured region list.
    #[arg(short, long = "region", value_name = "NAME=PATH", value_parser = parse_region)]
    regions: Vec<RegionSource>,

    /// Override the random seed for the split and the bootstrap
    #[arg(long)]
    seed: Option<u64>,

    /// Override the number of bootstrap iterations
    #[arg(long)]
    iterations: Option<usize>,

    /// Treat malformed CSV rows as errors instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Write the full report as JSON to this path
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<SubCommand>,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Write the default analysis config to a TOML file
    InitConfig {
        /// Destination path
        #[arg(long, default_value = "region_config.toml")]
        out: PathBuf,
    },

    /// Print the effective config (after file loading and CLI overrides)
    ShowConfig,
}

fn parse_region(arg: &str) -> Result<RegionSource, String> {
    match arg.split_once('=') {
        Some((name, path)) if !name.trim().is_empty() && !path.trim().is_empty() => {
            Ok(RegionSource::new(name.trim(), path.trim()))
        }
        _ => Err(format!("expected NAME=PATH, got '{arg}'")),
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Load the config file (if any) and apply CLI overrides.
fn resolve_config(args: &CliArgs) -> Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AnalysisConfig::load(),
    };

    if !args.regions.is_empty() {
        config.regions = args.regions.clone();
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(iterations) = args.iterations {
        config.bootstrap.iterations = iterations;
    }
    if args.strict {
        config.loader.skip_invalid_rows = false;
    }

    config.validate().context("Invalid configuration after CLI overrides")?;
    Ok(config)
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    // Subcommand dispatch
    if let Some(SubCommand::InitConfig { out }) = &args.command {
        AnalysisConfig::default()
            .save_to_file(out)
            .with_context(|| format!("Failed to write {}", out.display()))?;
        return Ok(());
    }

    let config = resolve_config(&args)?;

    if let Some(SubCommand::ShowConfig) = &args.command {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    info!(
        regions = config.regions.len(),
        seed = config.seed,
        iterations = config.bootstrap.iterations,
        "Starting region analysis"
    );

    // STAGE 1: load and summarise region data
    let datasets = load_regions(&config.regions, &config.loader)
        .context("Failed to load region data")?;
    for dataset in &datasets {
        dataset.print_summary();
    }
    println!();

    // STAGE 2-5
    let mut coordinator = PipelineCoordinator::new(&config);
    let analysis = coordinator.analyze(&datasets)?;

    print!("{}", report::render(&analysis));

    if let Some(path) = &args.json {
        report::write_json(&analysis, path)
            .with_context(|| format!("Failed to export report to {}", path.display()))?;
    }

    let stats = coordinator.stats();
    info!(
        regions = stats.regions_analyzed,
        wells = stats.wells_loaded,
        bootstrap_iterations = stats.bootstrap_iterations,
        elapsed_ms = stats.elapsed_ms as u64,
        "Analysis complete"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_region() {
        let r = parse_region("north = data/north.csv").unwrap();
        assert_eq!(r.name, "north");
        assert_eq!(r.path, PathBuf::from("data/north.csv"));
        assert!(parse_region("north").is_err());
        assert!(parse_region("=a.csv").is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let args = CliArgs::parse_from([
            "region-profit",
            "--region",
            "a=a.csv",
            "--region",
            "b=b.csv",
            "--seed",
            "7",
            "--iterations",
            "250",
            "--strict",
        ]);
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.regions.len(), 2);
        assert_eq!(config.regions[1].name, "b");
        assert_eq!(config.seed, 7);
        assert_eq!(config.bootstrap.iterations, 250);
        assert!(!config.loader.skip_invalid_rows);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let args = CliArgs::parse_from(["region-profit", "--iterations", "0"]);
        assert!(resolve_config(&args).is_err());
    }
}
