//! Synthetic fractional Gaussian noise generators for testing and validation.
//!
//! Two exact-covariance simulation methods are provided: the Hosking recursion,
//! which builds each sample from the conditional distribution given the past,
//! and circulant embedding, which diagonalizes the covariance with a single FFT
//! pair. Both produce the stationary increment process (fGn); cumulative sums
//! of those increments give fractional Brownian motion sample paths.
//!
//! # Example
//!
//! ```
//! use whittle_hurst::generators::{
//!     generate_fractional_gaussian_noise, FgnConfig, FgnMethod, GeneratorConfig,
//! };
//!
//! let config = GeneratorConfig { length: 512, seed: Some(42) };
//! let fgn_config = FgnConfig {
//!     hurst_exponent: 0.7,
//!     volatility: 1.0,
//!     method: FgnMethod::Auto,
//! };
//! let increments = generate_fractional_gaussian_noise(&config, &fgn_config).unwrap();
//! assert_eq!(increments.len(), 512);
//! ```

use crate::errors::{validate_parameter, WhittleError, WhittleResult};
use crate::fft_ops::{get_cached_fft_forward, get_cached_fft_inverse};
use crate::rng::SimulationRng;
use num_complex::Complex;
use std::f64::consts::SQRT_2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Configuration
// ============================================================================

/// Largest series length the Hosking recursion handles before the generator
/// switches to circulant embedding. The recursion is O(n^2) in time, so very
/// long series are cheaper through the FFT path.
const MAX_HOSKING_LENGTH: usize = 16_384;

/// Length above which [`FgnMethod::Auto`] prefers circulant embedding.
const AUTO_METHOD_CUTOFF: usize = 1_000;

/// Largest series length accepted by circulant embedding. The embedding
/// doubles the length and rounds up to a power of two, and the resulting
/// transform size must stay within the shared FFT plan cache limit.
const MAX_EMBEDDING_LENGTH: usize = 1 << 19;

/// Innovation variances below this are treated as a collapsed recursion.
const MIN_INNOVATION_VARIANCE: f64 = 1e-15;

/// Common parameters for synthetic series generation.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeneratorConfig {
    /// Number of samples to generate.
    pub length: usize,
    /// Seed for reproducible generation. `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            length: 1000,
            seed: None,
        }
    }
}

/// Parameters of the fractional Gaussian noise process.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FgnConfig {
    /// Hurst exponent in [0.01, 0.99].
    pub hurst_exponent: f64,
    /// Standard deviation of the increments.
    pub volatility: f64,
    /// Simulation method.
    pub method: FgnMethod,
}

impl Default for FgnConfig {
    fn default() -> Self {
        Self {
            hurst_exponent: 0.5,
            volatility: 1.0,
            method: FgnMethod::Auto,
        }
    }
}

/// Simulation method for fractional Gaussian noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FgnMethod {
    /// Hosking's conditional recursion. Exact covariance, O(n^2) time.
    Hosking,
    /// Circulant embedding. Exact covariance when the embedding is
    /// nonnegative definite, O(n log n) time.
    CirculantEmbedding,
    /// Pick by length: Hosking for short series, circulant embedding
    /// for long ones.
    Auto,
}

// ============================================================================
// Public generators
// ============================================================================

/// Generates fractional Gaussian noise with the requested Hurst exponent.
///
/// The returned series is the stationary increment process, suitable for
/// direct spectral estimation. Use
/// [`generate_fractional_brownian_motion`] for the integrated path.
///
/// # Errors
///
/// Returns [`WhittleError::InvalidParameter`] when the Hurst exponent or
/// volatility is out of range or the length is zero, and
/// [`WhittleError::NumericalError`] when the simulation itself breaks down.
pub fn generate_fractional_gaussian_noise(
    config: &GeneratorConfig,
    fgn_config: &FgnConfig,
) -> WhittleResult<Vec<f64>> {
    validate_parameter(fgn_config.hurst_exponent, 0.01, 0.99, "hurst_exponent")?;
    validate_parameter(fgn_config.volatility, 1e-6, 1e6, "volatility")?;
    if config.length == 0 {
        return Err(WhittleError::InvalidParameter {
            parameter: "length".to_string(),
            value: 0.0,
            constraint: "must be at least 1".to_string(),
        });
    }

    match fgn_config.method {
        FgnMethod::Hosking => generate_fgn_hosking(config, fgn_config),
        FgnMethod::CirculantEmbedding => generate_fgn_circulant_embedding(config, fgn_config),
        FgnMethod::Auto => {
            let selected = if config.length <= AUTO_METHOD_CUTOFF {
                FgnMethod::Hosking
            } else {
                FgnMethod::CirculantEmbedding
            };
            let resolved = FgnConfig {
                method: selected,
                ..fgn_config.clone()
            };
            generate_fractional_gaussian_noise(config, &resolved)
        }
    }
}

/// Generates a fractional Brownian motion path as the cumulative sum of
/// fractional Gaussian noise.
pub fn generate_fractional_brownian_motion(
    config: &GeneratorConfig,
    fgn_config: &FgnConfig,
) -> WhittleResult<Vec<f64>> {
    let fgn = generate_fractional_gaussian_noise(config, fgn_config)?;
    let mut path = Vec::with_capacity(fgn.len());
    let mut level = 0.0;
    for &increment in &fgn {
        level += increment;
        path.push(level);
    }
    Ok(path)
}

// ============================================================================
// Autocovariance
// ============================================================================

/// Autocovariance of fractional Gaussian noise at lags `0..n`.
///
/// gamma(k) = (sigma^2 / 2) * (|k+1|^2H - 2|k|^2H + |k-1|^2H)
fn fgn_autocovariance(hurst: f64, variance: f64, n: usize) -> WhittleResult<Vec<f64>> {
    let two_h = 2.0 * hurst;
    let mut gamma = Vec::with_capacity(n);
    gamma.push(variance);
    for k in 1..n {
        let lag = k as f64;
        let value = 0.5
            * variance
            * ((lag + 1.0).powf(two_h) - 2.0 * lag.powf(two_h) + (lag - 1.0).powf(two_h));
        if !value.is_finite() {
            return Err(WhittleError::NumericalError {
                reason: format!("fGn autocovariance non-finite at lag {}", k),
            });
        }
        gamma.push(value);
    }
    Ok(gamma)
}

// ============================================================================
// Hosking recursion
// ============================================================================

/// Hosking's method: draw each sample from its conditional distribution
/// given all previous samples, with the partial autocorrelations computed
/// by the Levinson-Durbin recursion.
fn generate_fgn_hosking(
    config: &GeneratorConfig,
    fgn_config: &FgnConfig,
) -> WhittleResult<Vec<f64>> {
    let n = config.length;
    if n > MAX_HOSKING_LENGTH {
        log::debug!(
            "Hosking recursion requested for {} samples; using circulant embedding instead",
            n
        );
        return generate_fgn_circulant_embedding(config, fgn_config);
    }

    let variance = fgn_config.volatility * fgn_config.volatility;
    let gamma = fgn_autocovariance(fgn_config.hurst_exponent, variance, n)?;
    let mut rng = SimulationRng::from_optional_seed(config.seed);

    let mut fgn = vec![0.0; n];
    let mut innovation_variance = gamma[0];
    fgn[0] = innovation_variance.sqrt() * rng.standard_normal();

    // Levinson-Durbin rows: phi_prev holds the coefficients of order j - 1,
    // phi_curr receives order j. Only the previous row is ever needed.
    let mut phi_prev = vec![0.0; n];
    let mut phi_curr = vec![0.0; n];

    for j in 1..n {
        if innovation_variance.abs() < MIN_INNOVATION_VARIANCE {
            return Err(WhittleError::NumericalError {
                reason: format!("innovation variance collapsed at recursion step {}", j),
            });
        }

        let mut numerator = gamma[j];
        for k in 1..j {
            numerator -= phi_prev[k - 1] * gamma[j - k];
        }
        let mut reflection = numerator / innovation_variance;
        if reflection.abs() >= 1.0 {
            // Keeps the recursion inside the stationarity region when
            // rounding pushes the partial autocorrelation out of (-1, 1).
            reflection = reflection.signum() * 0.999;
        }

        for k in 1..j {
            phi_curr[k - 1] = phi_prev[k - 1] - reflection * phi_prev[j - k - 1];
        }
        phi_curr[j - 1] = reflection;
        innovation_variance *= 1.0 - reflection * reflection;

        let mut prediction = 0.0;
        for k in 1..=j {
            prediction += phi_curr[k - 1] * fgn[j - k];
        }
        fgn[j] = prediction + innovation_variance.sqrt() * rng.standard_normal();

        std::mem::swap(&mut phi_prev, &mut phi_curr);
    }

    Ok(fgn)
}

// ============================================================================
// Circulant embedding
// ============================================================================

/// Circulant embedding: embed the n-point covariance in a circulant matrix of
/// power-of-two size m >= 2n, diagonalize it with one FFT, and synthesize the
/// series from Hermitian-symmetric Gaussian Fourier coefficients.
fn generate_fgn_circulant_embedding(
    config: &GeneratorConfig,
    fgn_config: &FgnConfig,
) -> WhittleResult<Vec<f64>> {
    let n = config.length;
    let hurst = fgn_config.hurst_exponent;
    if n > MAX_EMBEDDING_LENGTH {
        return Err(WhittleError::InvalidParameter {
            parameter: "length".to_string(),
            value: n as f64,
            constraint: format!(
                "must be at most {} for circulant embedding",
                MAX_EMBEDDING_LENGTH
            ),
        });
    }

    let variance = fgn_config.volatility * fgn_config.volatility;
    let gamma = fgn_autocovariance(hurst, variance, n)?;
    let mut rng = SimulationRng::from_optional_seed(config.seed);

    // First row of the circulant matrix: covariances out to lag n - 1, then
    // mirrored so that row[m - k] = row[k].
    let m = (2 * n).next_power_of_two();
    let mut eigen_buffer = vec![Complex::new(0.0, 0.0); m];
    for (k, &g) in gamma.iter().enumerate() {
        eigen_buffer[k] = Complex::new(g, 0.0);
    }
    for k in 1..n {
        eigen_buffer[m - k] = Complex::new(gamma[k], 0.0);
    }

    let fft = get_cached_fft_forward(m)?;
    fft.process(&mut eigen_buffer);

    // The eigenvalues of the circulant matrix are the DFT of its first row.
    // They must be nonnegative for the square root below; tiny negatives are
    // rounding noise and get clamped, large ones mean the embedding failed.
    let max_eigenvalue = eigen_buffer
        .iter()
        .map(|value| value.re.abs())
        .fold(0.0_f64, f64::max);
    let tolerance = (1e-10 * max_eigenvalue).max(1e-15);
    let mut num_negative = 0usize;
    let mut min_eigenvalue = 0.0_f64;
    for value in eigen_buffer.iter_mut() {
        if value.re < 0.0 {
            num_negative += 1;
            min_eigenvalue = min_eigenvalue.min(value.re);
            if value.re < -tolerance && hurst < 0.85 {
                return Err(WhittleError::NumericalError {
                    reason: format!(
                        "circulant embedding produced eigenvalue {:.3e} at H = {}",
                        value.re, hurst
                    ),
                });
            }
            value.re = 0.0;
        }
    }
    if num_negative > m / 10 {
        log::warn!(
            "{} of {} embedding eigenvalues were negative at H = {:.2} (most negative {:.3e})",
            num_negative,
            m,
            hurst,
            min_eigenvalue
        );
    }

    // Hermitian-symmetric Gaussian coefficients: real at the DC and Nyquist
    // bins, complex with half the variance in each component elsewhere, and
    // the upper half mirrors the lower as conjugates.
    let mut coefficients: Vec<Complex<f64>> = Vec::with_capacity(m);
    for i in 0..m {
        let eigenvalue = eigen_buffer[i].re;
        if i == 0 || (m % 2 == 0 && i == m / 2) {
            coefficients.push(Complex::new(eigenvalue.sqrt() * rng.standard_normal(), 0.0));
        } else if i < m / 2 {
            let scale = eigenvalue.sqrt() / SQRT_2;
            coefficients.push(Complex::new(
                scale * rng.standard_normal(),
                scale * rng.standard_normal(),
            ));
        } else {
            let mirror = coefficients[m - i].conj();
            coefficients.push(mirror);
        }
    }

    let ifft = get_cached_fft_inverse(m)?;
    ifft.process(&mut coefficients);

    // rustfft's inverse transform is unnormalized; 1/sqrt(m) restores the
    // target covariance.
    let scale_factor = 1.0 / (m as f64).sqrt();
    let mut fgn: Vec<f64> = coefficients[..n]
        .iter()
        .map(|value| value.re * scale_factor)
        .collect();

    let mean = fgn.iter().sum::<f64>() / n as f64;
    for value in &mut fgn {
        *value -= mean;
    }

    Ok(fgn)
}

// ============================================================================
// Tests
// ============================================================================
