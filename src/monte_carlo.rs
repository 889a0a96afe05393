//! Forecast-path simulation and ensemble diagnostics.
//!
//! A point forecast of future increments says nothing about how the memory
//! structure of the series propagates forward. This module fans a mean
//! forecast out into an ensemble of noisy paths and summarizes the ensemble:
//! the distribution of Hurst exponents across paths, cross-sectional
//! quantile bands, and the spread of simulated increments.

use crate::config::WhittleConfig;
use crate::errors::{validate_all_finite, validate_parameter, WhittleError, WhittleResult};
use crate::estimator::estimate_hurst_with_config;
use crate::math_utils::{calculate_std_dev, float_total_cmp, percentile};
use crate::rng::SimulationRng;
use rayon::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default number of simulated paths in an ensemble.
pub const DEFAULT_NUM_PATHS: usize = 100;

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for forecast-path simulation.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathSimulationConfig {
    /// Number of noisy paths to simulate around the mean forecast.
    pub num_paths: usize,
    /// Seed for reproducible simulation. `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for PathSimulationConfig {
    fn default() -> Self {
        Self {
            num_paths: DEFAULT_NUM_PATHS,
            seed: None,
        }
    }
}

/// Distribution of Hurst exponents across an ensemble of simulated paths.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnsembleHurstSummary {
    /// Hurst estimate for each path that could be estimated.
    pub estimates: Vec<f64>,
    /// Mean of the per-path estimates.
    pub mean: f64,
    /// Sample standard deviation of the per-path estimates.
    pub std_dev: f64,
    /// Number of paths dropped because estimation failed on them.
    pub failed_paths: usize,
}

// ============================================================================
// Path simulation
// ============================================================================

/// Simulates an ensemble of forecast paths around a mean increment forecast.
///
/// Each path is `forecast_mean[t] + noise_scale * z` with independent
/// standard normal draws, so the ensemble shares the predicted drift while
/// the noise scale carries the residual uncertainty of the forecaster.
///
/// Returns `num_paths` rows, each as long as `forecast_mean`.
pub fn simulate_forecast_paths(
    forecast_mean: &[f64],
    noise_scale: f64,
    config: &PathSimulationConfig,
) -> WhittleResult<Vec<Vec<f64>>> {
    if forecast_mean.is_empty() {
        return Err(WhittleError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }
    validate_all_finite(forecast_mean, "forecast_mean")?;
    if !noise_scale.is_finite() || noise_scale < 0.0 {
        return Err(WhittleError::InvalidParameter {
            parameter: "noise_scale".to_string(),
            value: noise_scale,
            constraint: "must be finite and non-negative".to_string(),
        });
    }
    if config.num_paths == 0 {
        return Err(WhittleError::InvalidParameter {
            parameter: "num_paths".to_string(),
            value: 0.0,
            constraint: "must be at least 1".to_string(),
        });
    }

    let mut rng = SimulationRng::from_optional_seed(config.seed);
    let mut paths = Vec::with_capacity(config.num_paths);
    for _ in 0..config.num_paths {
        let path: Vec<f64> = forecast_mean
            .iter()
            .map(|&mean| mean + noise_scale * rng.standard_normal())
            .collect();
        paths.push(path);
    }
    Ok(paths)
}

// ============================================================================
// Ensemble diagnostics
// ============================================================================

/// Estimates the Hurst exponent on every path of an ensemble.
///
/// Paths are processed in parallel. A path on which estimation fails (for
/// example a degenerate constant path) is skipped and counted rather than
/// failing the whole ensemble.
///
/// # Errors
///
/// Returns [`WhittleError::NumericalError`] when estimation fails on every
/// path, since the summary would be empty.
pub fn ensemble_hurst_estimates(
    paths: &[Vec<f64>],
    config: &WhittleConfig,
) -> WhittleResult<EnsembleHurstSummary> {
    validate_ensemble(paths)?;

    let results: Vec<WhittleResult<f64>> = paths
        .par_iter()
        .map(|path| estimate_hurst_with_config(path, config))
        .collect();

    let mut estimates = Vec::with_capacity(results.len());
    let mut failed_paths = 0usize;
    for result in results {
        match result {
            Ok(estimate) => estimates.push(estimate),
            Err(_) => failed_paths += 1,
        }
    }

    if estimates.is_empty() {
        return Err(WhittleError::NumericalError {
            reason: format!(
                "Hurst estimation failed on all {} ensemble paths",
                paths.len()
            ),
        });
    }
    if failed_paths > 0 {
        log::warn!(
            "Hurst estimation failed on {} of {} ensemble paths",
            failed_paths,
            paths.len()
        );
    }

    let mean = estimates.iter().sum::<f64>() / estimates.len() as f64;
    let std_dev = calculate_std_dev(&estimates);

    Ok(EnsembleHurstSummary {
        estimates,
        mean,
        std_dev,
        failed_paths,
    })
}

/// Cross-sectional quantiles of an ensemble at each time step.
///
/// For every time index the ensemble values are pooled across paths and the
/// requested quantile levels are read off with linear interpolation. The
/// result has one row per level, each as long as the paths.
pub fn ensemble_quantiles(
    paths: &[Vec<f64>],
    levels: &[f64],
) -> WhittleResult<Vec<Vec<f64>>> {
    validate_ensemble(paths)?;
    if levels.is_empty() {
        return Err(WhittleError::InvalidParameter {
            parameter: "levels".to_string(),
            value: 0.0,
            constraint: "must contain at least one quantile level".to_string(),
        });
    }
    for &level in levels {
        validate_parameter(level, 0.0, 1.0, "quantile_level")?;
    }

    let horizon = paths[0].len();
    let mut quantile_rows = vec![Vec::with_capacity(horizon); levels.len()];
    let mut cross_section = vec![0.0; paths.len()];

    for t in 0..horizon {
        for (i, path) in paths.iter().enumerate() {
            cross_section[i] = path[t];
        }
        cross_section.sort_by(float_total_cmp);
        for (row, &level) in quantile_rows.iter_mut().zip(levels) {
            row.push(percentile(&cross_section, level));
        }
    }
    Ok(quantile_rows)
}

/// Mean absolute error of each quantile band against an observed series.
///
/// `quantile_rows` is the output of [`ensemble_quantiles`]; the result has
/// one error per row.
pub fn quantile_mean_absolute_errors(
    quantile_rows: &[Vec<f64>],
    observed: &[f64],
) -> WhittleResult<Vec<f64>> {
    if quantile_rows.is_empty() {
        return Err(WhittleError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }
    validate_all_finite(observed, "observed")?;
    for row in quantile_rows {
        if row.len() != observed.len() {
            return Err(WhittleError::InvalidParameter {
                parameter: "observed".to_string(),
                value: observed.len() as f64,
                constraint: format!("must match the quantile horizon of {}", row.len()),
            });
        }
    }

    Ok(quantile_rows
        .iter()
        .map(|row| {
            row.iter()
                .zip(observed)
                .map(|(q, x)| (q - x).abs())
                .sum::<f64>()
                / row.len() as f64
        })
        .collect())
}

/// Mean across paths of the per-path standard deviation of increments.
///
/// The per-path spread is the population standard deviation (divisor n) of
/// the step-to-step differences, so a path with a single increment
/// contributes zero. Measures how volatile the simulated paths are step to
/// step.
pub fn mean_increment_volatility(paths: &[Vec<f64>]) -> WhittleResult<f64> {
    validate_ensemble(paths)?;
    if paths[0].len() < 2 {
        return Err(WhittleError::InsufficientData {
            required: 2,
            actual: paths[0].len(),
        });
    }

    let total: f64 = paths
        .iter()
        .map(|path| {
            let increments: Vec<f64> =
                path.windows(2).map(|pair| pair[1] - pair[0]).collect();
            population_std_dev(&increments)
        })
        .sum();
    Ok(total / paths.len() as f64)
}

/// Population standard deviation (divisor n) of a non-empty slice.
fn population_std_dev(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

/// Shared shape checks: at least one path, no empty paths, equal lengths.
fn validate_ensemble(paths: &[Vec<f64>]) -> WhittleResult<()> {
    if paths.is_empty() {
        return Err(WhittleError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }
    let horizon = paths[0].len();
    if horizon == 0 {
        return Err(WhittleError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }
    for path in paths {
        if path.len() != horizon {
            return Err(WhittleError::InvalidParameter {
                parameter: "paths".to_string(),
                value: path.len() as f64,
                constraint: format!("all paths must share the horizon {}", horizon),
            });
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
