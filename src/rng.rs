//! Seeded random number generation for reproducible simulations.
//!
//! The fGn simulators and the forecast-path sampler draw from ChaCha20,
//! which pairs a high-quality stream with exact reproducibility from a
//! `u64` seed across platforms.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rand_distr::StandardNormal;

/// Random source for the simulators.
///
/// Deterministic when seeded: two instances built from the same seed
/// produce identical draw sequences.
#[derive(Clone)]
pub struct SimulationRng {
    rng: ChaCha20Rng,
}

impl SimulationRng {
    /// Create an RNG seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: ChaCha20Rng::from_entropy(),
        }
    }

    /// Create a reproducible RNG from a `u64` seed.
    ///
    /// `seed_from_u64` expands the seed to the full 256-bit ChaCha20 state.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Construct from the optional seed carried by configuration structs.
    ///
    /// `Some(seed)` gives a reproducible stream, `None` falls back to OS entropy.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::with_seed(s),
            None => Self::new(),
        }
    }

    /// Draw a single standard normal variate.
    pub fn standard_normal(&mut self) -> f64 {
        self.rng.sample(StandardNormal)
    }

    /// Draw `n` iid standard normal variates.
    pub fn standard_normal_vec(&mut self, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.standard_normal()).collect()
    }
}

impl Default for SimulationRng {
    fn default() -> Self {
        Self::new()
    }
}
