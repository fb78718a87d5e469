//! Synthetic Region Data Generator
//!
//! Writes `geo_data_0.csv`, `geo_data_1.csv` and `geo_data_2.csv` with
//! exploration wells drawn from a known linear reserve model, so the
//! analysis can be exercised without field data.
//!
//! # Usage
//! ```bash
//! ./synthetic-regions --out-dir Data --wells 100000 --seed 42
//! ./region-profit
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::prelude::*;
use tracing::info;

use region_profit::synthetic::{default_profiles, generate_region, write_region_csv};

#[derive(Parser, Debug)]
#[command(name = "synthetic-regions")]
#[command(about = "Generate synthetic exploration-well data for three regions")]
#[command(version = "1.0")]
struct Args {
    /// Directory the CSV files are written to
    #[arg(short, long, default_value = "Data")]
    out_dir: PathBuf,

    /// Wells per region
    #[arg(short, long, default_value = "100000", value_parser = clap::value_parser!(u64).range(10..=10_000_000))]
    wells: u64,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create {}", args.out_dir.display()))?;

    let mut rng: StdRng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let wells = usize::try_from(args.wells).context("Well count does not fit in memory")?;
    for (i, profile) in default_profiles().iter().enumerate() {
        let records = generate_region(profile, wells, &mut rng)?;
        let path = args.out_dir.join(format!("geo_data_{i}.csv"));
        write_region_csv(&path, &records)?;
        info!(region = %profile.name, wells, path = %path.display(), "Region written");
    }

    Ok(())
}
