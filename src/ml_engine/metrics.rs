//! Validation metrics for reserve predictions.

/// Arithmetic mean; 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Root mean squared error between actual and predicted values.
///
/// Formula: sqrt(Σ(yᵢ - ŷᵢ)² / n)
pub fn rmse(actual: &[f64], predicted: &[f64]) -> f64 {
    debug_assert_eq!(actual.len(), predicted.len());
    if actual.is_empty() {
        return 0.0;
    }
    (sum_squared_residuals(actual, predicted) / actual.len() as f64).sqrt()
}

/// Coefficient of determination.
///
/// Formula: R² = 1 - Σ(yᵢ - ŷᵢ)² / Σ(yᵢ - ȳ)²
///
/// For constant `actual` values the ratio is undefined: exact predictions
/// score 1.0, anything else 0.0.
pub fn r2_score(actual: &[f64], predicted: &[f64]) -> f64 {
    debug_assert_eq!(actual.len(), predicted.len());
    let y_mean = mean(actual);
    let ss_res = sum_squared_residuals(actual, predicted);
    let ss_tot: f64 = actual.iter().map(|y| (y - y_mean).powi(2)).sum();

    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}

fn sum_squared_residuals(actual: &[f64], predicted: &[f64]) -> f64 {
    actual
        .iter()
        .zip(predicted.iter())
        .map(|(y, p)| (y - p).powi(2))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_perfect_predictions() {
        let y = [1.0, 2.0, 3.0, 4.0];
        assert_abs_diff_eq!(rmse(&y, &y), 0.0);
        assert_abs_diff_eq!(r2_score(&y, &y), 1.0);
    }

    #[test]
    fn test_rmse_known_value() {
        // residuals 1, -1, 2, 0 → mean square 6/4
        let actual = [3.0, 5.0, 7.0, 9.0];
        let predicted = [2.0, 6.0, 5.0, 9.0];
        assert_abs_diff_eq!(rmse(&actual, &predicted), 1.5_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_r2_of_mean_predictor_is_zero() {
        let actual = [1.0, 2.0, 3.0, 4.0, 5.0];
        let predicted = [3.0; 5];
        assert_abs_diff_eq!(r2_score(&actual, &predicted), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_r2_can_be_negative() {
        let actual = [1.0, 2.0, 3.0];
        let predicted = [3.0, 2.0, 1.0];
        // ss_res = 8, ss_tot = 2
        assert_abs_diff_eq!(r2_score(&actual, &predicted), -3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_r2_constant_actual() {
        let actual = [5.0, 5.0, 5.0];
        assert_abs_diff_eq!(r2_score(&actual, &[5.0, 5.0, 5.0]), 1.0);
        assert_abs_diff_eq!(r2_score(&actual, &[4.0, 5.0, 6.0]), 0.0);
    }

    #[test]
    fn test_mean_empty() {
        assert_abs_diff_eq!(mean(&[]), 0.0);
        assert_abs_diff_eq!(mean(&[2.0, 4.0]), 3.0);
    }
}
