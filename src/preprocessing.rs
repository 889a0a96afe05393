//! Data preparation utilities for spectral Hurst estimation.
//!
//! The Whittle estimator expects a stationary increment series. Raw price
//! levels are integrated and must be differenced first; series on wildly
//! different scales can be standardized for comparability, which leaves the
//! estimate itself untouched because the objective is scale invariant.

use crate::errors::{validate_all_finite, validate_data_length, WhittleError, WhittleResult};
use crate::math_utils::calculate_std_dev;

/// First differences of a level series, `x[i + 1] - x[i]`.
///
/// Turns price levels into increments. The output is one element shorter
/// than the input.
///
/// # Example
///
/// ```
/// use whittle_hurst::preprocessing::price_differences;
///
/// let prices = vec![100.0, 101.5, 101.0, 102.25];
/// let diffs = price_differences(&prices).unwrap();
/// assert_eq!(diffs, vec![1.5, -0.5, 1.25]);
/// ```
pub fn price_differences(levels: &[f64]) -> WhittleResult<Vec<f64>> {
    validate_data_length(levels, 2, "differencing")?;
    validate_all_finite(levels, "levels")?;
    Ok(levels.windows(2).map(|pair| pair[1] - pair[0]).collect())
}

/// Divides a series by its sample standard deviation.
///
/// Useful when comparing series of very different magnitudes. Rescaling
/// does not change the Whittle estimate.
///
/// # Errors
///
/// Returns [`WhittleError::DegenerateSeries`] when the standard deviation
/// is zero, since a constant series cannot be standardized.
pub fn standardize_by_std(series: &[f64]) -> WhittleResult<Vec<f64>> {
    validate_data_length(series, 2, "standardization")?;
    validate_all_finite(series, "series")?;

    let std_dev = calculate_std_dev(series);
    if std_dev <= 0.0 {
        return Err(WhittleError::DegenerateSeries {
            reason: "standard deviation is zero, series is constant".to_string(),
        });
    }
    Ok(series.iter().map(|x| x / std_dev).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_price_differences_basic() {
        let prices = vec![10.0, 12.0, 11.0, 11.5];
        let diffs = price_differences(&prices).unwrap();
        assert_eq!(diffs.len(), 3);
        assert_approx_eq!(diffs[0], 2.0, 1e-12);
        assert_approx_eq!(diffs[1], -1.0, 1e-12);
        assert_approx_eq!(diffs[2], 0.5, 1e-12);
    }

    #[test]
    fn test_price_differences_rejects_short_input() {
        assert!(matches!(
            price_differences(&[5.0]),
            Err(WhittleError::InsufficientData {
                required: 2,
                actual: 1
            })
        ));
        assert!(price_differences(&[]).is_err());
    }

    #[test]
    fn test_price_differences_rejects_non_finite() {
        let prices = vec![10.0, f64::NAN, 11.0];
        assert!(matches!(
            price_differences(&prices),
            Err(WhittleError::NonFiniteInput { index: 1, .. })
        ));
    }

    #[test]
    fn test_standardize_unit_std() {
        let series = vec![1.0, -1.0, 2.0, -2.0, 0.5, -0.5, 1.5, -1.5];
        let standardized = standardize_by_std(&series).unwrap();

        let std_dev = calculate_std_dev(&standardized);
        assert_approx_eq!(std_dev, 1.0, 1e-10);

        // Signs and ordering survive the rescale.
        for (original, scaled) in series.iter().zip(&standardized) {
            assert_eq!(original.signum(), scaled.signum());
        }
    }

    #[test]
    fn test_standardize_rejects_constant_series() {
        let series = vec![3.0; 16];
        assert!(matches!(
            standardize_by_std(&series),
            Err(WhittleError::DegenerateSeries { .. })
        ));
    }

    #[test]
    fn test_difference_then_standardize_pipeline() {
        let prices: Vec<f64> = (0..64)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0)
            .collect();
        let diffs = price_differences(&prices).unwrap();
        let standardized = standardize_by_std(&diffs).unwrap();
        assert_eq!(standardized.len(), 63);
        assert_approx_eq!(calculate_std_dev(&standardized), 1.0, 1e-10);
    }
}
