//! Behavioral properties of the estimator through the public API.
//!
//! Edge cases, invariances, and error taxonomy: everything a caller can
//! rely on beyond point accuracy, which is covered by the recovery tests.

use whittle_hurst::{
    estimate_hurst, estimate_hurst_with_config, SimulationRng, WhittleConfig, WhittleError,
    WhittleEstimator,
};

fn seeded_noise(n: usize, seed: u64) -> Vec<f64> {
    SimulationRng::with_seed(seed).standard_normal_vec(n)
}

mod invariances {
    use super::*;

    #[test]
    fn test_estimate_is_deterministic() {
        let series = seeded_noise(512, 5);
        let first = estimate_hurst(&series).unwrap();
        let second = estimate_hurst(&series).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_estimate_is_scale_invariant() {
        let series = seeded_noise(512, 6);
        let scaled: Vec<f64> = series.iter().map(|x| x * 1e4).collect();
        let shrunk: Vec<f64> = series.iter().map(|x| x * 1e-4).collect();

        let base = estimate_hurst(&series).unwrap();
        let up = estimate_hurst(&scaled).unwrap();
        let down = estimate_hurst(&shrunk).unwrap();

        assert!((base - up).abs() < 1e-4, "scaling up moved H: {} vs {}", base, up);
        assert!(
            (base - down).abs() < 1e-4,
            "scaling down moved H: {} vs {}",
            base,
            down
        );
    }

    #[test]
    fn test_estimate_is_shift_invariant() {
        // The zero-frequency bin is excluded, so an additive level change
        // cannot move the estimate beyond floating-point noise.
        let series = seeded_noise(512, 7);
        let shifted: Vec<f64> = series.iter().map(|x| x + 100.0).collect();

        let base = estimate_hurst(&series).unwrap();
        let moved = estimate_hurst(&shifted).unwrap();
        assert!(
            (base - moved).abs() < 1e-4,
            "level shift moved H: {} vs {}",
            base,
            moved
        );
    }

    #[test]
    fn test_sign_flip_does_not_move_estimate() {
        let series = seeded_noise(512, 8);
        let flipped: Vec<f64> = series.iter().map(|x| -x).collect();

        let base = estimate_hurst(&series).unwrap();
        let negated = estimate_hurst(&flipped).unwrap();
        assert!((base - negated).abs() < 1e-6);
    }
}

mod edge_cases {
    use super::*;

    #[test]
    fn test_minimum_length_series_is_accepted() {
        // Four samples give exactly one periodogram bin.
        let series = vec![1.0, -2.0, 3.0, -4.0];
        let estimate = estimate_hurst(&series).unwrap();
        assert!((0.0..=1.0).contains(&estimate));
    }

    #[test]
    fn test_alternating_series_stays_finite() {
        // All retained periodogram bins vanish for this input; the
        // objective is constant and the search must still terminate.
        let series = vec![1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0];
        let estimate = estimate_hurst(&series).unwrap();
        assert!(estimate.is_finite());
        assert!((0.0..=1.0).contains(&estimate));
    }

    #[test]
    fn test_estimates_stay_in_unit_interval() {
        let inputs: Vec<Vec<f64>> = vec![
            (0..256).map(|i| i as f64).collect(),
            (0..256).map(|i| (i as f64 * 0.37).sin()).collect(),
            seeded_noise(256, 9),
            (0..256).map(|i| if i % 3 == 0 { 2.0 } else { -1.0 }).collect(),
        ];
        for series in &inputs {
            let estimate = estimate_hurst(series).unwrap();
            assert!(
                (0.0..=1.0).contains(&estimate),
                "estimate {} escaped the unit interval",
                estimate
            );
        }
    }
}

mod error_taxonomy {
    use super::*;

    #[test]
    fn test_short_series_is_rejected() {
        assert!(matches!(
            estimate_hurst(&[1.0, 2.0, 3.0]),
            Err(WhittleError::InsufficientData {
                required: 4,
                actual: 3
            })
        ));
        assert!(matches!(
            estimate_hurst(&[]),
            Err(WhittleError::InsufficientData { required: 4, .. })
        ));
    }

    #[test]
    fn test_non_finite_samples_are_located() {
        let mut series = seeded_noise(64, 10);
        series[17] = f64::NAN;
        assert!(matches!(
            estimate_hurst(&series),
            Err(WhittleError::NonFiniteInput { index: 17, .. })
        ));

        let mut series = seeded_noise(64, 11);
        series[0] = f64::NEG_INFINITY;
        assert!(matches!(
            estimate_hurst(&series),
            Err(WhittleError::NonFiniteInput { index: 0, .. })
        ));
    }

    #[test]
    fn test_constant_series_is_degenerate() {
        assert!(matches!(
            estimate_hurst(&[7.5; 128]),
            Err(WhittleError::DegenerateSeries { .. })
        ));
        assert!(matches!(
            estimate_hurst(&[0.0; 128]),
            Err(WhittleError::DegenerateSeries { .. })
        ));
    }

    #[test]
    fn test_exhausted_budget_is_reported() {
        let config = WhittleConfig {
            max_evaluations: 2,
            ..Default::default()
        };
        let series = seeded_noise(256, 12);
        assert!(matches!(
            estimate_hurst_with_config(&series, &config),
            Err(WhittleError::NonConvergence {
                max_evaluations: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let series = seeded_noise(256, 13);

        let no_terms = WhittleConfig {
            aliasing_terms: 0,
            ..Default::default()
        };
        assert!(matches!(
            estimate_hurst_with_config(&series, &no_terms),
            Err(WhittleError::InvalidParameter { .. })
        ));

        let bad_tolerance = WhittleConfig {
            tolerance: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            estimate_hurst_with_config(&series, &bad_tolerance),
            Err(WhittleError::InvalidParameter { .. })
        ));
    }
}

mod estimator_struct {
    use super::*;

    #[test]
    fn test_struct_matches_free_function() {
        let series = seeded_noise(512, 14);
        let estimator = WhittleEstimator::new();
        assert_eq!(
            estimator.estimate(&series).unwrap().to_bits(),
            estimate_hurst(&series).unwrap().to_bits()
        );
    }

    #[test]
    fn test_struct_carries_custom_config() {
        let config = WhittleConfig {
            tolerance: 1e-3,
            ..Default::default()
        };
        let estimator = WhittleEstimator::with_config(config.clone());
        assert_eq!(estimator.config().tolerance, 1e-3);

        let series = seeded_noise(512, 15);
        let loose = estimator.estimate(&series).unwrap();
        let tight = estimate_hurst(&series).unwrap();
        // A looser tolerance still lands near the tight optimum.
        assert!((loose - tight).abs() < 1e-2);
    }
}
