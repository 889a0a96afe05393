//! # Estimator Configuration
//!
//! This module contains the configuration structure controlling the Whittle
//! estimator: the spectral approximation depth and the bounded-search
//! stopping rule.

use crate::errors::{WhittleError, WhittleResult};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default number of aliasing terms in the fGn spectral density sum
pub const DEFAULT_ALIASING_TERMS: usize = 200;

/// Default absolute x-tolerance of the bounded search over H
pub const DEFAULT_TOLERANCE: f64 = 1e-5;

/// Default evaluation budget of the bounded search
pub const DEFAULT_MAX_EVALUATIONS: usize = 500;

/// Configuration for Whittle Hurst estimation
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WhittleConfig {
    /// Number of aliased frequency copies summed in the fGn spectral density.
    ///
    /// The exact density is an infinite sum over shifts of 2πj; it is
    /// truncated to this many terms (j = 0..aliasing_terms). The truncation
    /// is a fixed, documented count rather than a convergence criterion, so
    /// identical inputs always see identical spectra.
    pub aliasing_terms: usize,
    /// Absolute x-tolerance of the bounded scalar search over H.
    ///
    /// The search stops once the bracket around the candidate minimum is
    /// narrower than roughly twice this value.
    pub tolerance: f64,
    /// Maximum number of objective evaluations before the search reports
    /// non-convergence.
    pub max_evaluations: usize,
}

impl Default for WhittleConfig {
    fn default() -> Self {
        Self {
            aliasing_terms: DEFAULT_ALIASING_TERMS,
            tolerance: DEFAULT_TOLERANCE,
            max_evaluations: DEFAULT_MAX_EVALUATIONS,
        }
    }
}

impl WhittleConfig {
    /// Validate the configuration before use.
    ///
    /// # Returns
    /// * `Ok(())` if every field is usable
    /// * `Err(WhittleError::InvalidParameter)` naming the offending field
    pub fn validate(&self) -> WhittleResult<()> {
        if self.aliasing_terms == 0 {
            return Err(WhittleError::InvalidParameter {
                parameter: "aliasing_terms".to_string(),
                value: 0.0,
                constraint: "must be >= 1".to_string(),
            });
        }

        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(WhittleError::InvalidParameter {
                parameter: "tolerance".to_string(),
                value: self.tolerance,
                constraint: "must be finite and > 0".to_string(),
            });
        }

        if self.max_evaluations == 0 {
            return Err(WhittleError::InvalidParameter {
                parameter: "max_evaluations".to_string(),
                value: 0.0,
                constraint: "must be >= 1".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = WhittleConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.aliasing_terms, 200);
        assert_eq!(config.max_evaluations, 500);
        assert!((config.tolerance - 1e-5).abs() < 1e-15);
    }

    #[test]
    fn test_config_rejects_zero_aliasing_terms() {
        let config = WhittleConfig {
            aliasing_terms: 0,
            ..WhittleConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(WhittleError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_config_rejects_bad_tolerance() {
        for tolerance in [0.0, -1e-5, f64::NAN, f64::INFINITY] {
            let config = WhittleConfig {
                tolerance,
                ..WhittleConfig::default()
            };
            assert!(
                config.validate().is_err(),
                "tolerance {} should be rejected",
                tolerance
            );
        }
    }

    #[test]
    fn test_config_rejects_zero_budget() {
        let config = WhittleConfig {
            max_evaluations: 0,
            ..WhittleConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
