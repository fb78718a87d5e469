//! Shared data structures for region profitability analysis
//!
//! This module defines the core types for the analysis pipeline:
//! - Stage 1: GeoRecord, DatasetInfo (region CSV data)
//! - Stage 2: ModelMetrics, TrainedRegion (per-region regression outputs)
//! - Stage 3-4: BootstrapResult (profit distribution)
//! - Stage 5: RegionSummary, AnalysisReport (reporting)

mod geo;
mod model;
mod profit;

pub use geo::*;
pub use model::*;
pub use profit::*;
