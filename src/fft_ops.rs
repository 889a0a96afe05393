//! FFT operations for spectral Hurst estimation.
//!
//! This module provides the FFT-based computations behind the Whittle
//! likelihood: the half-spectrum periodogram of a series and cached FFT
//! planners shared with the circulant-embedding simulator. All operations
//! are O(n log n) with plan reuse across calls.
//!
//! Only transform plans are cached; no computed spectra are retained, so
//! repeated estimation calls stay bit-for-bit reproducible.

use crate::errors::{validate_all_finite, WhittleError, WhittleResult};
use crate::math_utils::constants::TWO_PI;
use lru::LruCache;
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::num::NonZeroUsize;
use std::sync::LazyLock;
use std::sync::{Arc, Mutex};

/// Shared handle to a planned transform.
///
/// `rustfft::Fft` carries `Send + Sync` as supertraits, so the handle can
/// cross threads freely.
pub type SharedFft = Arc<dyn Fft<f64>>;

/// Identifies one plan by length and direction.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct PlanKey {
    size: usize,
    forward: bool,
}

/// Plans kept alive across calls, bounded by LRU eviction.
const PLAN_CACHE_CAPACITY: usize = 1000;
/// Largest transform the cache will plan (2^20 points).
const MAX_TRANSFORM_SIZE: usize = 1 << 20;

static PLAN_CACHE: LazyLock<Mutex<LruCache<PlanKey, SharedFft>>> =
    LazyLock::new(|| Mutex::new(LruCache::new(NonZeroUsize::new(PLAN_CACHE_CAPACITY).unwrap())));

/// Looks up a plan of the given length and direction, planning on a miss.
///
/// A poisoned lock is recovered rather than propagated: the cache holds
/// nothing but plans, so a panicked holder cannot have left torn data.
fn lookup_or_plan(size: usize, forward: bool) -> WhittleResult<SharedFft> {
    if size == 0 {
        return Err(WhittleError::InvalidParameter {
            parameter: "transform_size".to_string(),
            value: 0.0,
            constraint: "must be positive".to_string(),
        });
    }
    if size > MAX_TRANSFORM_SIZE {
        return Err(WhittleError::InvalidParameter {
            parameter: "transform_size".to_string(),
            value: size as f64,
            constraint: format!("at most {} points", MAX_TRANSFORM_SIZE),
        });
    }

    let key = PlanKey { size, forward };
    let mut cache = PLAN_CACHE
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    // get() refreshes the entry's LRU position
    if let Some(plan) = cache.get(&key) {
        return Ok(Arc::clone(plan));
    }

    let mut planner = FftPlanner::new();
    let plan = if forward {
        planner.plan_fft_forward(size)
    } else {
        planner.plan_fft_inverse(size)
    };
    cache.put(key, Arc::clone(&plan));
    Ok(plan)
}

/// Cached forward-transform plan for the given length.
pub fn get_cached_fft_forward(size: usize) -> WhittleResult<SharedFft> {
    lookup_or_plan(size, true)
}

/// Cached inverse-transform plan for the given length.
pub fn get_cached_fft_inverse(size: usize) -> WhittleResult<SharedFft> {
    lookup_or_plan(size, false)
}

/// Calculate the half-spectrum periodogram used by the Whittle likelihood.
///
/// Computes I(ω_k) = |FFT(x)_k|² / (2πn) at the positive Fourier frequencies
/// ω_k = 2πk/n for k = 1..⌊(n−1)/2⌋. The DC bin is excluded (the likelihood
/// carries no information at frequency zero), and for even n the Nyquist bin
/// falls outside the index set as well.
///
/// # Arguments
///
/// * `data` - Input time series, length at least 4
///
/// # Returns
///
/// Periodogram ordinates at k = 1..⌊(n−1)/2⌋, in frequency order
///
/// # Example
///
/// ```rust
/// use whittle_hurst::calculate_half_periodogram;
///
/// let data = vec![1.0, 2.0, 1.0, -1.0, -2.0, -1.0];
/// let periodogram = calculate_half_periodogram(&data).unwrap();
/// assert_eq!(periodogram.len(), 2); // (6 - 1) / 2 bins
/// ```
pub fn calculate_half_periodogram(data: &[f64]) -> WhittleResult<Vec<f64>> {
    let n = data.len();
    if n < 4 {
        return Err(WhittleError::FftError { size: n });
    }

    validate_all_finite(data, "periodogram input")?;

    let mut buffer: Vec<Complex<f64>> = data.iter().map(|&x| Complex::new(x, 0.0)).collect();

    let fft = get_cached_fft_forward(n)?;
    fft.process(&mut buffer);

    // |FFT(x)_k|² / (2πn) over the positive half-spectrum, DC excluded
    let n_half = (n - 1) / 2;
    let scale = TWO_PI * n as f64;
    let periodogram: Vec<f64> = buffer[1..=n_half]
        .iter()
        .map(|c| c.norm_sqr() / scale)
        .collect();

    Ok(periodogram)
}

/// Drops every cached plan.
///
/// Long-running processes that churn through many distinct lengths can call
/// this to release planner memory; correctness never depends on it.
pub fn clear_fft_cache() {
    PLAN_CACHE
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clear();
}

/// Counts the cached plans as a `(forward, inverse)` pair.
pub fn get_fft_cache_stats() -> (usize, usize) {
    let cache = PLAN_CACHE
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    let forward = cache.iter().filter(|(key, _)| key.forward).count();
    (forward, cache.len() - forward)
}
