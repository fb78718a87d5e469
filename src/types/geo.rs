//! Region geology types: one exploration well per record.

use serde::{Deserialize, Serialize};

/// Column names every region CSV must provide.
pub const REQUIRED_COLUMNS: [&str; 5] = ["id", "f0", "f1", "f2", "product"];

/// Number of geological features fed to the regression.
pub const FEATURE_COUNT: usize = 3;

/// A single exploration well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoRecord {
    /// Opaque well identifier (not unique across the raw data)
    pub id: String,
    pub f0: f64,
    pub f1: f64,
    pub f2: f64,
    /// Reserve volume in thousands of barrels
    pub product: f64,
}

impl GeoRecord {
    /// Feature vector in column order (f0, f1, f2).
    pub fn features(&self) -> [f64; FEATURE_COUNT] {
        [self.f0, self.f1, self.f2]
    }

    /// True when every numeric field is a finite number.
    pub fn is_finite(&self) -> bool {
        self.f0.is_finite() && self.f1.is_finite() && self.f2.is_finite() && self.product.is_finite()
    }
}

/// Load statistics for a region file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    /// Data rows found in the file (header excluded)
    pub total_rows: usize,
    /// Rows kept after validation
    pub loaded_rows: usize,
    /// Rows dropped for unparseable or non-finite values
    pub skipped_rows: usize,
    /// Rows whose id already appeared earlier in the file
    pub duplicate_ids: usize,
    /// Mean reserve volume over loaded rows
    pub mean_product: f64,
}
