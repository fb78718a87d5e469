//! Region Dataset Loader
//!
//! Reads exploration-well CSV files (one per candidate region) into
//! [`RegionDataset`]s. Every file must carry the header `id,f0,f1,f2,product`;
//! extra columns are ignored and column order is free.
//!
//! # Usage
//!
//! ```ignore
//! use region_profit::dataset::RegionDataset;
//! use region_profit::config::LoaderConfig;
//!
//! let dataset = RegionDataset::load("0", "Data/geo_data_0.csv", &LoaderConfig::default())?;
//! let x = dataset.features(); // (n, 3)
//! let y = dataset.targets();  // (n,)
//! ```

use ndarray::{Array1, Array2};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::{LoaderConfig, RegionSource};
use crate::types::{DatasetInfo, GeoRecord, FEATURE_COUNT, REQUIRED_COLUMNS};

/// Errors raised while loading region data
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Missing required column '{column}' in {path}")]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("Invalid row at line {line} in {path}: {message}")]
    InvalidRow {
        path: PathBuf,
        line: u64,
        message: String,
    },

    #[error("No valid rows in {path} ({skipped} skipped)")]
    Empty { path: PathBuf, skipped: usize },
}

// ============================================================================
// Column Mapping
// ============================================================================

/// Indices of the required columns within a header row
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    id: usize,
    f0: usize,
    f1: usize,
    f2: usize,
    product: usize,
}

impl ColumnMap {
    fn from_header(header: &csv::StringRecord, path: &Path) -> Result<Self, DatasetError> {
        let find = |column: &'static str| {
            header
                .iter()
                .position(|h| h.trim() == column)
                .ok_or_else(|| DatasetError::MissingColumn {
                    path: path.to_path_buf(),
                    column,
                })
        };

        Ok(Self {
            id: find(REQUIRED_COLUMNS[0])?,
            f0: find(REQUIRED_COLUMNS[1])?,
            f1: find(REQUIRED_COLUMNS[2])?,
            f2: find(REQUIRED_COLUMNS[3])?,
            product: find(REQUIRED_COLUMNS[4])?,
        })
    }

    /// Parse one data row; `Err` carries a human-readable reason.
    fn parse(&self, row: &csv::StringRecord) -> Result<GeoRecord, String> {
        let field = |idx: usize, name: &str| {
            row.get(idx)
                .map(str::trim)
                .ok_or_else(|| format!("missing field '{name}'"))
        };
        let number = |idx: usize, name: &str| -> Result<f64, String> {
            let raw = field(idx, name)?;
            raw.parse()
                .map_err(|_| format!("'{name}' is not a number: '{raw}'"))
        };

        let record = GeoRecord {
            id: field(self.id, "id")?.to_string(),
            f0: number(self.f0, "f0")?,
            f1: number(self.f1, "f1")?,
            f2: number(self.f2, "f2")?,
            product: number(self.product, "product")?,
        };
        if record.is_finite() {
            Ok(record)
        } else {
            Err(format!("non-finite value in well '{}'", record.id))
        }
    }
}

// ============================================================================
// Region Dataset
// ============================================================================

/// All exploration wells of one candidate region
#[derive(Debug, Clone)]
pub struct RegionDataset {
    /// Region name used in logs and reports
    pub name: String,
    /// File the data came from (None for in-memory datasets)
    pub source: Option<PathBuf>,
    records: Vec<GeoRecord>,
    pub info: DatasetInfo,
}

impl RegionDataset {
    /// Load a region CSV file.
    pub fn load(
        name: impl Into<String>,
        path: impl AsRef<Path>,
        config: &LoaderConfig,
    ) -> Result<Self, DatasetError> {
        let name = name.into();
        let path = path.as_ref();
        let csv_err = |source| DatasetError::Csv {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(csv_err)?;

        let header = reader.headers().map_err(csv_err)?.clone();
        if header.is_empty() {
            return Err(DatasetError::Empty {
                path: path.to_path_buf(),
                skipped: 0,
            });
        }
        let columns = ColumnMap::from_header(&header, path)?;

        let mut records = Vec::new();
        let mut total_rows = 0usize;
        let mut skipped = 0usize;

        for (i, row) in reader.records().enumerate() {
            total_rows += 1;
            // Physical start line of the record; quoted fields may span lines
            let position = match &row {
                Ok(record) => record.position(),
                Err(e) => e.position(),
            };
            let line = position.map_or(i as u64 + 2, csv::Position::line);

            let parsed = row
                .map_err(|e| e.to_string())
                .and_then(|r| columns.parse(&r));

            match parsed {
                Ok(record) => records.push(record),
                Err(message) if config.skip_invalid_rows => {
                    if skipped < 10 {
                        tracing::warn!(region = %name, line, error = %message, "Skipping invalid row");
                    }
                    skipped += 1;
                }
                Err(message) => {
                    return Err(DatasetError::InvalidRow {
                        path: path.to_path_buf(),
                        line,
                        message,
                    });
                }
            }
        }

        if records.is_empty() {
            return Err(DatasetError::Empty {
                path: path.to_path_buf(),
                skipped,
            });
        }

        let mut dataset = Self::from_records(name, records);
        dataset.source = Some(path.to_path_buf());
        dataset.info.total_rows = total_rows;
        dataset.info.skipped_rows = skipped;

        tracing::info!(
            region = %dataset.name,
            file = %path.display(),
            rows = dataset.info.loaded_rows,
            skipped = dataset.info.skipped_rows,
            duplicate_ids = dataset.info.duplicate_ids,
            mean_product = %format!("{:.2}", dataset.info.mean_product),
            "Region data loaded"
        );

        Ok(dataset)
    }

    /// Build a dataset from in-memory records (no file, nothing skipped).
    pub fn from_records(name: impl Into<String>, records: Vec<GeoRecord>) -> Self {
        let mut seen = HashSet::with_capacity(records.len());
        let duplicate_ids = records
            .iter()
            .filter(|r| !seen.insert(r.id.as_str()))
            .count();

        let mean_product = if records.is_empty() {
            0.0
        } else {
            records.iter().map(|r| r.product).sum::<f64>() / records.len() as f64
        };

        let info = DatasetInfo {
            total_rows: records.len(),
            loaded_rows: records.len(),
            skipped_rows: 0,
            duplicate_ids,
            mean_product,
        };

        Self {
            name: name.into(),
            source: None,
            records,
            info,
        }
    }

    /// All loaded wells, in file order
    pub fn records(&self) -> &[GeoRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Feature matrix, one row per well: `[f0, f1, f2]`
    pub fn features(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.records.len(), FEATURE_COUNT), |(i, j)| {
            self.records[i].features()[j]
        })
    }

    /// Reserve volumes (thousand barrels), one per well
    pub fn targets(&self) -> Array1<f64> {
        self.records.iter().map(|r| r.product).collect()
    }

    /// Summary statistics for quick validation
    pub fn print_summary(&self) {
        println!("=== Region {} ===", self.name);
        if let Some(source) = &self.source {
            println!("  Source:     {}", source.display());
        }
        println!(
            "  Wells:      {} loaded, {} skipped, {} duplicate ids",
            self.info.loaded_rows, self.info.skipped_rows, self.info.duplicate_ids
        );
        println!("  Mean prod.: {:.2} thousand barrels", self.info.mean_product);
    }
}

/// Load every configured region, in configuration order.
///
/// Fails on the first region that cannot be loaded.
pub fn load_regions(
    sources: &[RegionSource],
    config: &LoaderConfig,
) -> Result<Vec<RegionDataset>, DatasetError> {
    sources
        .iter()
        .map(|source| RegionDataset::load(source.name.clone(), &source.path, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_file() {
        let file = write_csv(
            "id,f0,f1,f2,product\n\
             txEyH,0.705745,-0.497823,1.221170,105.280062\n\
             2acmU,1.334711,-0.340164,4.365080,73.037750\n\
             409Wp,1.022732,0.151990,1.419926,85.265647\n",
        );

        let ds = RegionDataset::load("0", file.path(), &LoaderConfig::default()).unwrap();
        assert_eq!(ds.name, "0");
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.info.total_rows, 3);
        assert_eq!(ds.info.skipped_rows, 0);
        assert_eq!(ds.records()[1].id, "2acmU");
        assert!((ds.records()[0].f2 - 1.221170).abs() < 1e-12);

        let x = ds.features();
        assert_eq!(x.dim(), (3, 3));
        assert!((x[[2, 0]] - 1.022732).abs() < 1e-12);
        let y = ds.targets();
        assert!((y[1] - 73.037750).abs() < 1e-12);
    }

    #[test]
    fn test_column_order_is_free() {
        let file = write_csv("product,f2,f1,f0,id\n10.0,3.0,2.0,1.0,a\n");
        let ds = RegionDataset::load("r", file.path(), &LoaderConfig::default()).unwrap();
        assert_eq!(ds.records()[0].features(), [1.0, 2.0, 3.0]);
        assert!((ds.records()[0].product - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_missing_column_is_error() {
        let file = write_csv("id,f0,f1,product\na,1,2,3\n");
        let err = RegionDataset::load("r", file.path(), &LoaderConfig::default()).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn { column: "f2", .. }));
    }

    #[test]
    fn test_invalid_rows_skipped_by_default() {
        let file = write_csv("id,f0,f1,f2,product\na,1,2,3,4\nb,x,2,3,4\nc,1,2,NaN,4\nd,1,2,3,5\n");
        let ds = RegionDataset::load("r", file.path(), &LoaderConfig::default()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.info.total_rows, 4);
        assert_eq!(ds.info.skipped_rows, 2);
        assert!((ds.info.mean_product - 4.5).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_row_is_error_in_strict_mode() {
        let file = write_csv("id,f0,f1,f2,product\na,1,2,3,4\nb,x,2,3,4\n");
        let strict = LoaderConfig {
            skip_invalid_rows: false,
        };
        let err = RegionDataset::load("r", file.path(), &strict).unwrap_err();
        match err {
            DatasetError::InvalidRow { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_header_only_file_is_empty() {
        let file = write_csv("id,f0,f1,f2,product\n");
        let err = RegionDataset::load("r", file.path(), &LoaderConfig::default()).unwrap_err();
        assert!(matches!(err, DatasetError::Empty { skipped: 0, .. }));
    }

    #[test]
    fn test_zero_byte_file_is_empty() {
        let file = write_csv("");
        let err = RegionDataset::load("r", file.path(), &LoaderConfig::default()).unwrap_err();
        assert!(matches!(err, DatasetError::Empty { skipped: 0, .. }));
    }

    #[test]
    fn test_non_finite_values_are_invalid() {
        let file = write_csv("id,f0,f1,f2,product
a,1,2,3,4
b,1,inf,3,4
");
        let strict = LoaderConfig {
            skip_invalid_rows: false,
        };
        match RegionDataset::load("r", file.path(), &strict).unwrap_err() {
            DatasetError::InvalidRow { line, message, .. } => {
                assert_eq!(line, 3);
                assert!(message.contains("non-finite"), "{message}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_row_line_counts_quoted_newlines() {
        let file = write_csv("id,f0,f1,f2,product\n\"multi\nline\",1,2,3,4\nc,x,2,3,4\n");
        let strict = LoaderConfig {
            skip_invalid_rows: false,
        };
        match RegionDataset::load("r", file.path(), &strict).unwrap_err() {
            DatasetError::InvalidRow { line, .. } => assert_eq!(line, 4),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_ids_are_kept_and_counted() {
        let file = write_csv("id,f0,f1,f2,product\na,1,2,3,4\na,1,2,3,6\nb,0,0,0,1\n");
        let ds = RegionDataset::load("r", file.path(), &LoaderConfig::default()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.info.duplicate_ids, 1);
    }

    #[test]
    fn test_missing_file_is_csv_error() {
        let err = RegionDataset::load(
            "r",
            "/nonexistent/geo_data.csv",
            &LoaderConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DatasetError::Csv { .. }));
    }
}
