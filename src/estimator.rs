//! Whittle maximum-likelihood estimation of the Hurst exponent.
//!
//! The estimator fits the theoretical fGn spectral density to the
//! half-spectrum periodogram of a series by minimizing the profiled Whittle
//! objective over H in [0, 1]. The scale of the series is profiled out of
//! the likelihood, so the estimate is invariant under multiplying the input
//! by a constant.
//!
//! Estimation is stateless: apart from the FFT plan cache (transform plans
//! only, never data), no state is shared between calls, and identical input
//! yields a bit-for-bit identical estimate.

use crate::config::WhittleConfig;
use crate::errors::{
    validate_all_finite, validate_data_length, WhittleError, WhittleResult,
};
use crate::fft_ops::calculate_half_periodogram;
use crate::math_utils::calculate_variance;
use crate::optimize::{minimize_bounded, MinimizeOptions};
use crate::spectrum::whittle_objective;

/// Minimum series length the half-spectrum likelihood needs
pub const MIN_SERIES_LENGTH: usize = 4;

/// Variance below this is treated as a constant series.
///
/// Deliberately below the exact-constant detection in `calculate_variance`,
/// so truly constant data (variance exactly 0) and pathological
/// near-constant data both fail the same way.
const ZERO_VARIANCE_THRESHOLD: f64 = 1e-13;

/// Estimate the Hurst exponent of a series with the default configuration.
///
/// See [`estimate_hurst_with_config`] for the algorithm, error cases, and
/// the tunable knobs.
///
/// # Example
/// ```rust
/// use whittle_hurst::estimate_hurst;
///
/// let series: Vec<f64> = (0..128).map(|i| ((i * 37 % 101) as f64) - 50.0).collect();
/// let h = estimate_hurst(&series).unwrap();
/// assert!((0.0..=1.0).contains(&h));
/// ```
pub fn estimate_hurst(series: &[f64]) -> WhittleResult<f64> {
    estimate_hurst_with_config(series, &WhittleConfig::default())
}

/// Estimate the Hurst exponent of a series under an explicit configuration.
///
/// ## Algorithm
///
/// 1. Validate: length ≥ 4, all samples finite, variance above the
///    degeneracy threshold.
/// 2. Compute the half-spectrum periodogram I(ω_k) = |FFT(x)_k|² / (2πn)
///    at k = 1..⌊(n−1)/2⌋.
/// 3. Minimize the profiled Whittle objective over H ∈ [0, 1] with a
///    bounded golden-section/parabolic search. The returned H is strictly
///    inside the interval by construction of the search.
///
/// ## Errors
///
/// * [`WhittleError::InsufficientData`] when the series is shorter than 4
/// * [`WhittleError::NonFiniteInput`] on NaN or infinite samples
/// * [`WhittleError::DegenerateSeries`] when the series is constant
/// * [`WhittleError::NonConvergence`] when the search exhausts its budget;
///   no partial estimate is returned in that case
pub fn estimate_hurst_with_config(
    series: &[f64],
    config: &WhittleConfig,
) -> WhittleResult<f64> {
    config.validate()?;
    validate_data_length(series, MIN_SERIES_LENGTH, "Whittle estimation")?;
    validate_all_finite(series, "series")?;
    validate_series_variance(series)?;

    let n = series.len();
    let periodogram = calculate_half_periodogram(series)?;

    let options = MinimizeOptions {
        xatol: config.tolerance,
        max_evaluations: config.max_evaluations,
    };
    let minimum = minimize_bounded(
        |h| whittle_objective(h, &periodogram, n, config),
        (0.0, 1.0),
        &options,
    )?;

    // A located minimum with an infinite value means every candidate H was a
    // domain failure, which a non-degenerate series cannot produce.
    if !minimum.fmin.is_finite() {
        return Err(WhittleError::NumericalError {
            reason: "Whittle objective infeasible across (0, 1)".to_string(),
        });
    }

    log::debug!(
        "Whittle search converged: H = {:.6} after {} evaluations",
        minimum.xmin,
        minimum.evaluations
    );

    Ok(minimum.xmin)
}

/// Whittle estimator carrying a reusable configuration.
///
/// Thin wrapper over [`estimate_hurst_with_config`] for callers that
/// estimate many series under the same settings.
#[derive(Debug, Clone, Default)]
pub struct WhittleEstimator {
    config: WhittleConfig,
}

impl WhittleEstimator {
    /// Estimator with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Estimator with an explicit configuration.
    pub fn with_config(config: WhittleConfig) -> Self {
        Self { config }
    }

    /// The configuration this estimator applies.
    pub fn config(&self) -> &WhittleConfig {
        &self.config
    }

    /// Estimate the Hurst exponent of one series.
    pub fn estimate(&self, series: &[f64]) -> WhittleResult<f64> {
        estimate_hurst_with_config(series, &self.config)
    }
}

/// Rejects constant and near-constant series before any FFT work.
fn validate_series_variance(data: &[f64]) -> WhittleResult<f64> {
    let variance = calculate_variance(data);
    if variance < ZERO_VARIANCE_THRESHOLD {
        return Err(WhittleError::DegenerateSeries {
            reason: format!(
                "variance {:e} is below the degeneracy threshold {:e}",
                variance, ZERO_VARIANCE_THRESHOLD
            ),
        });
    }
    Ok(variance)
}
