//! Error types and validation functions for Whittle estimation.
//!
//! This module provides error handling for the estimator, the spectral
//! density kernel, and the fGn simulators, including input validation and
//! numerical stability checks.

use thiserror::Error;

/// Error types for Whittle estimation operations.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum WhittleError {
    /// Series shorter than the operation's minimum length.
    #[error("Series too short: {required} samples needed, {actual} given")]
    InsufficientData {
        /// Smallest length the operation accepts
        required: usize,
        /// Length actually supplied
        actual: usize,
    },

    /// Input series contains a NaN or infinite sample.
    #[error("Non-finite input at index {index}: {value}")]
    NonFiniteInput {
        /// Index of the first offending sample
        index: usize,
        /// The offending value
        value: f64,
    },

    /// Series carries no usable spectral information.
    #[error("Degenerate series: {reason}")]
    DegenerateSeries {
        /// Why the series cannot be estimated
        reason: String,
    },

    /// A scalar argument or configuration field failed validation.
    #[error("Parameter {parameter} = {value} rejected: {constraint}")]
    InvalidParameter {
        /// Field or argument name
        parameter: String,
        /// Value that failed validation
        value: f64,
        /// Constraint the value was checked against
        constraint: String,
    },

    /// Bounded minimization exhausted its evaluation budget.
    #[error(
        "Optimization failed to converge within {max_evaluations} evaluations (xatol = {tolerance})"
    )]
    NonConvergence {
        /// Evaluation budget that was exhausted
        max_evaluations: usize,
        /// Absolute x-tolerance the search was run with
        tolerance: f64,
    },

    /// Numerical breakdown outside the input-validation layer.
    #[error("Numerical failure: {reason}")]
    NumericalError {
        /// Description of the failure site
        reason: String,
    },

    /// FFT plan construction or sizing failure.
    #[error("FFT unavailable for input size {size}")]
    FftError {
        /// Requested transform size
        size: usize,
    },
}

/// Result type for Whittle estimation operations.
///
/// This is a convenience type alias for operations that may fail with [`WhittleError`].
pub type WhittleResult<T> = Result<T, WhittleError>;

/// Checks that a series is long enough for the requested computation.
///
/// # Arguments
/// * `data` - Series to check
/// * `required` - Smallest usable length
/// * `context` - Operation name, kept for call-site readability (the error
///   carries the lengths)
///
/// # Returns
/// * `Ok(())` when the series has at least `required` samples
/// * `Err(WhittleError::InsufficientData)` otherwise
///
/// # Example
/// ```rust
/// use whittle_hurst::errors::validate_data_length;
///
/// let series = vec![0.5, -0.25, 1.0, 0.75];
/// assert!(validate_data_length(&series, 4, "periodogram").is_ok());
/// assert!(validate_data_length(&series, 5, "periodogram").is_err());
/// ```
pub fn validate_data_length(data: &[f64], required: usize, _context: &str) -> WhittleResult<()> {
    if data.len() < required {
        Err(WhittleError::InsufficientData {
            required,
            actual: data.len(),
        })
    } else {
        Ok(())
    }
}

/// Checks that a scalar parameter lies in a closed interval.
///
/// Both endpoints are accepted. A NaN value is rejected as an invalid
/// parameter; NaN or inverted bounds indicate a caller bug and come back as
/// a numerical error instead.
///
/// # Arguments
/// * `value` - Candidate value
/// * `min` - Lower endpoint (inclusive)
/// * `max` - Upper endpoint (inclusive)
/// * `name` - Parameter name used in the error
///
/// # Returns
/// * `Ok(())` when `min <= value <= max`
/// * `Err(WhittleError::InvalidParameter)` when the value is outside or NaN
///
/// # Example
/// ```rust
/// use whittle_hurst::errors::validate_parameter;
///
/// assert!(validate_parameter(0.7, 0.0, 1.0, "hurst_exponent").is_ok());
/// assert!(validate_parameter(-2.0, 0.0, 1.0, "hurst_exponent").is_err());
/// ```
pub fn validate_parameter(value: f64, min: f64, max: f64, name: &str) -> WhittleResult<()> {
    if value.is_nan() {
        return Err(WhittleError::InvalidParameter {
            parameter: name.to_string(),
            value,
            constraint: "value must not be NaN".to_string(),
        });
    }

    if min.is_nan() || max.is_nan() || min > max {
        return Err(WhittleError::NumericalError {
            reason: format!(
                "parameter {} checked against unusable bounds: min = {}, max = {}",
                name, min, max
            ),
        });
    }

    if value < min || value > max {
        Err(WhittleError::InvalidParameter {
            parameter: name.to_string(),
            value,
            constraint: format!("within [{}, {}]", min, max),
        })
    } else {
        Ok(())
    }
}

/// Checks that a single value is finite.
///
/// # Arguments
/// * `value` - Value to check
/// * `name` - Variable name used in the error
///
/// # Returns
/// * `Ok(())` for finite values
/// * `Err(WhittleError::NumericalError)` for NaN or infinities
///
/// # Example
/// ```rust
/// use whittle_hurst::errors::validate_finite;
///
/// assert!(validate_finite(2.5, "scale").is_ok());
/// assert!(validate_finite(f64::NAN, "scale").is_err());
/// assert!(validate_finite(f64::NEG_INFINITY, "scale").is_err());
/// ```
pub fn validate_finite(value: f64, name: &str) -> WhittleResult<()> {
    if !value.is_finite() {
        Err(WhittleError::NumericalError {
            reason: format!("{} must be finite, got {}", name, value),
        })
    } else {
        Ok(())
    }
}

/// Checks that every sample in a slice is finite.
///
/// Returns immediately on the first non-finite value, reporting its position.
///
/// # Arguments
/// * `data` - Samples to check
/// * `name` - Series name, kept for call-site readability (the error carries
///   the index and value)
///
/// # Returns
/// * `Ok(())` when every sample is finite (an empty slice passes vacuously)
/// * `Err(WhittleError::NonFiniteInput)` locating the first NaN or infinity
///
/// # Example
/// ```rust
/// use whittle_hurst::errors::validate_all_finite;
///
/// let clean = vec![0.1, -0.4, 2.0];
/// let tainted = vec![0.1, f64::INFINITY, 2.0];
///
/// assert!(validate_all_finite(&clean, "returns").is_ok());
/// assert!(validate_all_finite(&tainted, "returns").is_err());
/// ```
pub fn validate_all_finite(data: &[f64], _name: &str) -> WhittleResult<()> {
    if let Some((i, &value)) = data.iter().enumerate().find(|(_, &v)| !v.is_finite()) {
        return Err(WhittleError::NonFiniteInput { index: i, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_data_length_accepts_long_enough_series() {
        let returns = vec![0.02, -0.01, 0.005, 0.03, -0.015, 0.01];
        assert!(validate_data_length(&returns, 4, "whittle").is_ok());
    }

    #[test]
    fn test_validate_data_length_reports_both_lengths() {
        let returns = vec![0.02, -0.01];
        match validate_data_length(&returns, 4, "whittle") {
            Err(WhittleError::InsufficientData { required, actual }) => {
                assert_eq!(required, 4);
                assert_eq!(actual, 2);
            }
            other => panic!("expected InsufficientData, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_data_length_exact_boundary_passes() {
        // Exactly the required length is enough
        let returns = vec![1.0, -1.0, 0.5, -0.5];
        assert!(validate_data_length(&returns, 4, "whittle").is_ok());
    }

    #[test]
    fn test_validate_parameter_interior_value() {
        assert!(validate_parameter(0.7, 0.01, 0.99, "hurst_exponent").is_ok());
    }

    #[test]
    fn test_validate_parameter_out_of_range_carries_context() {
        match validate_parameter(1.5, 0.0, 1.0, "hurst_exponent") {
            Err(WhittleError::InvalidParameter {
                parameter,
                value,
                constraint,
            }) => {
                assert_eq!(parameter, "hurst_exponent");
                assert_eq!(value, 1.5);
                assert_eq!(constraint, "within [0, 1]");
            }
            other => panic!("expected InvalidParameter, got {:?}", other),
        }

        assert!(matches!(
            validate_parameter(-0.5, 0.0, 1.0, "hurst_exponent"),
            Err(WhittleError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_validate_parameter_closed_interval_endpoints() {
        // Both endpoints are inside the accepted interval
        assert!(validate_parameter(0.01, 0.01, 0.99, "hurst_exponent").is_ok());
        assert!(validate_parameter(0.99, 0.01, 0.99, "hurst_exponent").is_ok());
    }

    #[test]
    fn test_validate_parameter_nan_value_and_bad_bounds() {
        assert!(matches!(
            validate_parameter(f64::NAN, 0.0, 1.0, "volatility"),
            Err(WhittleError::InvalidParameter { .. })
        ));

        // NaN bounds and inverted bounds are caller bugs, not bad input
        assert!(matches!(
            validate_parameter(0.5, f64::NAN, 1.0, "volatility"),
            Err(WhittleError::NumericalError { .. })
        ));
        assert!(matches!(
            validate_parameter(0.5, 1.0, 0.0, "volatility"),
            Err(WhittleError::NumericalError { .. })
        ));
    }

    #[test]
    fn test_validate_finite_value_classes() {
        assert!(validate_finite(3.25, "scale").is_ok());
        assert!(validate_finite(-1e-9, "scale").is_ok());
        assert!(validate_finite(0.0, "scale").is_ok());
        assert!(validate_finite(f64::NAN, "scale").is_err());
        assert!(validate_finite(f64::INFINITY, "scale").is_err());
        assert!(validate_finite(f64::NEG_INFINITY, "scale").is_err());
    }

    #[test]
    fn test_validate_all_finite_clean_series() {
        let clean = vec![0.5, -2.0, 1e-12, 1e9, 0.0];
        assert!(validate_all_finite(&clean, "series").is_ok());
    }

    #[test]
    fn test_validate_all_finite_empty_slice_passes() {
        let empty: Vec<f64> = Vec::new();
        assert!(validate_all_finite(&empty, "series").is_ok());
    }

    #[test]
    fn test_validate_all_finite_locates_first_offender() {
        // The NaN at index 2 is reported even with another at index 3
        let tainted = vec![0.5, 1.5, f64::NAN, f64::NAN];
        match validate_all_finite(&tainted, "series") {
            Err(WhittleError::NonFiniteInput { index, value }) => {
                assert_eq!(index, 2);
                assert!(value.is_nan());
            }
            other => panic!("expected NonFiniteInput, got {:?}", other),
        }

        // An infinity in the final slot is still found
        let tail_infinity = vec![0.5, 1.5, 2.5, f64::NEG_INFINITY];
        match validate_all_finite(&tail_infinity, "series") {
            Err(WhittleError::NonFiniteInput { index, value }) => {
                assert_eq!(index, 3);
                assert_eq!(value, f64::NEG_INFINITY);
            }
            other => panic!("expected NonFiniteInput, got {:?}", other),
        }
    }

    #[test]
    fn test_error_display_formatting() {
        let short = WhittleError::InsufficientData {
            required: 4,
            actual: 2,
        };
        let rendered = short.to_string();
        assert!(rendered.contains("too short"));
        assert!(rendered.contains('4'));
        assert!(rendered.contains('2'));

        let degenerate = WhittleError::DegenerateSeries {
            reason: "constant input".to_string(),
        };
        let rendered = degenerate.to_string();
        assert!(rendered.contains("Degenerate series"));
        assert!(rendered.contains("constant input"));

        let stuck = WhittleError::NonConvergence {
            max_evaluations: 500,
            tolerance: 1e-5,
        };
        assert!(stuck.to_string().contains("500"));
    }

    #[test]
    fn test_whittle_result_threads_through_question_mark() {
        fn half_spectrum_count(n: usize) -> WhittleResult<usize> {
            validate_data_length(&vec![0.0; n], 4, "half spectrum")?;
            Ok((n - 1) / 2)
        }

        assert_eq!(half_spectrum_count(9).ok(), Some(4));
        assert!(matches!(
            half_spectrum_count(3),
            Err(WhittleError::InsufficientData { .. })
        ));
    }
}
