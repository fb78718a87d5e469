//! Analysis Pipeline Module
//!
//! ## 5-Stage Pipeline
//!
//! ```text
//! STAGE 1: Region data loading (one CSV per region)
//! STAGE 2: Per-region train/validate regression
//! STAGE 3: Top-well profit calculation
//! STAGE 4: Bootstrap resampling → profit distribution
//! STAGE 5: Summary, ranking and recommendation
//! ```
//!
//! Regions run one after another; every stage consumes the previous one's output.

mod coordinator;

pub use coordinator::{PipelineCoordinator, PipelineError, PipelineStats};
