//! Mathematical utility functions and constants for Whittle estimation.
//!
//! This module provides the numerical foundation shared by the estimator,
//! the simulators, and the ensemble diagnostics: variance and standard
//! deviation with stability safeguards, percentile interpolation, and
//! approximate floating-point comparison.

/// Total ordering for `f64`, sorting every NaN after the real values.
///
/// Shaped for direct use with `slice::sort_by`.
pub fn float_total_cmp(a: &f64, b: &f64) -> std::cmp::Ordering {
    use std::cmp::Ordering;

    if a.is_nan() {
        if b.is_nan() {
            Ordering::Equal
        } else {
            Ordering::Greater
        }
    } else if b.is_nan() {
        Ordering::Less
    } else {
        a.partial_cmp(b).unwrap_or(Ordering::Equal)
    }
}

/// Linear-interpolation percentile of already-sorted data.
///
/// `p` is a fraction in [0, 1]; values between sample points are
/// interpolated the way the common statistical packages do it. Out-of-range
/// `p` clamps to the nearest end, and an empty slice has no percentile (NaN).
pub fn percentile(sorted_data: &[f64], p: f64) -> f64 {
    let n = sorted_data.len();
    if n == 0 {
        return f64::NAN;
    }
    if p <= 0.0 {
        return sorted_data[0];
    }
    if p >= 1.0 {
        return sorted_data[n - 1];
    }

    let rank = p * (n - 1) as f64;
    let below = rank as usize;
    let weight = rank - below as f64;

    if weight == 0.0 {
        sorted_data[below]
    } else {
        sorted_data[below] + weight * (sorted_data[below + 1] - sorted_data[below])
    }
}

// ============================================================================
// NUMERICAL CONSTANTS
// ============================================================================

/// Numerical constants for stability thresholds and common values.
pub mod constants {
    /// Tolerance used by the default approximate comparisons
    pub const DEFAULT_EPSILON: f64 = 1e-12;

    /// Smallest variance reported for non-constant data
    pub const MIN_VARIANCE: f64 = 1e-15;

    /// Cap applied to bounded computations
    pub const MAX_ABS_VALUE: f64 = 1e100;

    /// One full turn in angular frequency
    pub const TWO_PI: f64 = 2.0 * std::f64::consts::PI;
}

// ============================================================================
// APPROXIMATE FLOATING-POINT COMPARISON
// ============================================================================

/// Approximate floating-point equality checks.
pub mod float_ops {
    use super::constants::DEFAULT_EPSILON;

    /// Approximate equality at the default tolerance.
    #[inline]
    pub fn approx_eq(a: f64, b: f64) -> bool {
        approx_eq_eps(a, b, DEFAULT_EPSILON)
    }

    /// Approximate equality at a caller-chosen tolerance.
    #[inline]
    pub fn approx_eq_eps(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }
}

// ============================================================================
// MOMENT CALCULATIONS
// ============================================================================

/// Sample variance with numerical safeguards.
///
/// Uses the unbiased n−1 denominator. Degenerate inputs (fewer than two
/// samples, or any non-finite sample) report zero. Exactly constant data
/// reports a mathematical zero, while non-constant data with vanishing
/// spread is floored at [`constants::MIN_VARIANCE`] so downstream divisions
/// stay meaningful.
///
/// # Example
/// ```rust
/// use whittle_hurst::calculate_variance;
///
/// let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
/// let variance = calculate_variance(&data);
/// assert!((variance - 2.5).abs() < 1e-10);
/// ```
pub fn calculate_variance(data: &[f64]) -> f64 {
    if data.len() < 2 || data.iter().any(|x| !x.is_finite()) {
        return 0.0;
    }

    // Exactly constant input is zero-variance by definition; detect it
    // directly rather than trusting whatever cancellation noise the
    // accumulator leaves behind.
    let head = data[0];
    let all_equal = data
        .iter()
        .all(|&x| float_ops::approx_eq_eps(x, head, 1e-15));

    // Welford accumulation, stable when the mean dwarfs the spread.
    let mut mean = 0.0;
    let mut sum_sq = 0.0;
    for (seen, &x) in data.iter().enumerate() {
        let delta = x - mean;
        mean += delta / (seen + 1) as f64;
        sum_sq += delta * (x - mean);
    }
    let variance = sum_sq / (data.len() - 1) as f64;

    if all_equal {
        return 0.0;
    }
    if variance < constants::MIN_VARIANCE {
        return constants::MIN_VARIANCE;
    }
    variance.min(constants::MAX_ABS_VALUE)
}

/// Sample standard deviation: square root of [`calculate_variance`].
///
/// Zero for constant or degenerate input, like the variance it is built on.
pub fn calculate_std_dev(data: &[f64]) -> f64 {
    calculate_variance(data).sqrt()
}
