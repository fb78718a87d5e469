//! Linear reserve model
//!
//! Ordinary least squares with an intercept, fitted through linfa-linear.

use linfa::prelude::*;
use linfa_linear::{FittedLinearRegression, LinearRegression};
use ndarray::{Array1, Array2};

use super::ModelError;
use crate::types::{LinearCoefficients, FEATURE_COUNT};

/// Fitted per-region regression of reserves on (f0, f1, f2)
pub struct RegionModel {
    fitted: FittedLinearRegression<f64>,
}

impl RegionModel {
    /// Fit OLS on a feature matrix (n × 3) and reserve vector (n).
    pub fn fit(features: Array2<f64>, targets: Array1<f64>) -> Result<Self, ModelError> {
        if features.nrows() != targets.len() {
            return Err(ModelError::LengthMismatch {
                features: features.nrows(),
                targets: targets.len(),
            });
        }

        let dataset = Dataset::new(features, targets);
        let fitted = LinearRegression::new()
            .with_intercept(true)
            .fit(&dataset)
            .map_err(|e| ModelError::Fit(e.to_string()))?;

        tracing::debug!(
            intercept = fitted.intercept(),
            params = ?fitted.params().to_vec(),
            "Linear model fitted"
        );

        Ok(Self { fitted })
    }

    /// Predict reserves for every row of `features`.
    pub fn predict(&self, features: &Array2<f64>) -> Array1<f64> {
        self.fitted.predict(features)
    }

    /// Intercept and per-feature coefficients.
    pub fn coefficients(&self) -> LinearCoefficients {
        let params = self.fitted.params();
        let mut coefficients = [0.0; FEATURE_COUNT];
        for (slot, value) in coefficients.iter_mut().zip(params.iter()) {
            *slot = *value;
        }
        LinearCoefficients {
            intercept: self.fitted.intercept(),
            coefficients,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    /// y = 2 + 1·f0 - 3·f1 + 0.5·f2, no noise
    fn exact_linear_data() -> (Array2<f64>, Array1<f64>) {
        let x = array![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 2.0],
            [0.0, 1.0, 1.0],
            [2.0, 1.0, 0.0],
            [1.0, 3.0, 4.0],
            [3.0, 2.0, 5.0],
            [-1.0, 0.5, 2.5],
        ];
        let y = x
            .rows()
            .into_iter()
            .map(|r| 2.0 + r[0] - 3.0 * r[1] + 0.5 * r[2])
            .collect::<Array1<f64>>();
        (x, y)
    }

    #[test]
    fn test_fit_recovers_exact_coefficients() {
        let (x, y) = exact_linear_data();
        let model = RegionModel::fit(x, y).unwrap();
        let c = model.coefficients();

        assert_abs_diff_eq!(c.intercept, 2.0, epsilon = 1e-8);
        assert_abs_diff_eq!(c.coefficients[0], 1.0, epsilon = 1e-8);
        assert_abs_diff_eq!(c.coefficients[1], -3.0, epsilon = 1e-8);
        assert_abs_diff_eq!(c.coefficients[2], 0.5, epsilon = 1e-8);
    }

    #[test]
    fn test_predict_matches_coefficients() {
        let (x, y) = exact_linear_data();
        let model = RegionModel::fit(x.clone(), y.clone()).unwrap();
        let preds = model.predict(&x);
        let c = model.coefficients();

        for (i, row) in x.rows().into_iter().enumerate() {
            let manual = c.intercept
                + c.coefficients[0] * row[0]
                + c.coefficients[1] * row[1]
                + c.coefficients[2] * row[2];
            assert_abs_diff_eq!(preds[i], manual, epsilon = 1e-9);
            assert_abs_diff_eq!(preds[i], y[i], epsilon = 1e-8);
        }
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let (x, _) = exact_linear_data();
        let y = Array1::zeros(3);
        assert!(matches!(
            RegionModel::fit(x, y),
            Err(ModelError::LengthMismatch { features: 7, targets: 3 })
        ));
    }
}
