//! Bounded scalar minimization for the Whittle likelihood search.
//!
//! Implements the classical FMIN bounded minimizer (Forsythe, Malcolm and
//! Moler, 1977): golden-section search with parabolic-interpolation
//! acceleration. The search never evaluates outside the given bounds and
//! never returns a point on them, which is exactly what the likelihood over
//! H in [0, 1] needs since both boundary values are domain failures.

use crate::errors::{WhittleError, WhittleResult};

/// Options for the bounded scalar search.
#[derive(Debug, Clone)]
pub struct MinimizeOptions {
    /// Absolute tolerance on the argument of the minimum
    pub xatol: f64,
    /// Maximum number of objective evaluations
    pub max_evaluations: usize,
}

impl Default for MinimizeOptions {
    fn default() -> Self {
        Self {
            xatol: 1e-5,
            max_evaluations: 500,
        }
    }
}

/// Result of a bounded scalar minimization.
#[derive(Debug, Clone)]
pub struct ScalarMinimum {
    /// Argument of the located minimum, strictly inside the bounds
    pub xmin: f64,
    /// Objective value at `xmin`
    pub fmin: f64,
    /// Number of objective evaluations spent
    pub evaluations: usize,
}

/// Minimize a scalar function over a closed interval.
///
/// The objective may return `f64::INFINITY` to mark a candidate as
/// infeasible; the search routes around such regions as long as some
/// evaluated point is finite. Objectives must not return NaN.
///
/// # Arguments
/// * `objective` - Function to minimize
/// * `bounds` - (lower, upper) with lower < upper, both finite
/// * `options` - Tolerance and evaluation budget
///
/// # Returns
/// * `Ok(ScalarMinimum)` once the bracket around the minimum is narrower
///   than the tolerance
/// * `Err(WhittleError::NonConvergence)` if the evaluation budget runs out
///   first; the best point so far is deliberately not returned
/// * `Err(WhittleError::NumericalError)` if the objective produced NaN
pub fn minimize_bounded<F>(
    mut objective: F,
    bounds: (f64, f64),
    options: &MinimizeOptions,
) -> WhittleResult<ScalarMinimum>
where
    F: FnMut(f64) -> f64,
{
    let (lower, upper) = bounds;

    if !lower.is_finite() || !upper.is_finite() || lower >= upper {
        return Err(WhittleError::InvalidParameter {
            parameter: "bounds".to_string(),
            value: lower,
            constraint: format!("finite interval with lower < upper, got ({}, {})", lower, upper),
        });
    }
    if !options.xatol.is_finite() || options.xatol <= 0.0 {
        return Err(WhittleError::InvalidParameter {
            parameter: "xatol".to_string(),
            value: options.xatol,
            constraint: "must be finite and > 0".to_string(),
        });
    }
    if options.max_evaluations == 0 {
        return Err(WhittleError::InvalidParameter {
            parameter: "max_evaluations".to_string(),
            value: 0.0,
            constraint: "must be >= 1".to_string(),
        });
    }

    let golden_mean = 0.5 * (3.0 - 5.0_f64.sqrt());
    let sqrt_eps = (2.2e-16_f64).sqrt();

    let mut a = lower;
    let mut b = upper;

    // Three best points tracked in order: xf (best), nfc, fulc
    let mut fulc = a + golden_mean * (b - a);
    let mut nfc = fulc;
    let mut xf = fulc;

    let mut rat = 0.0;
    let mut e = 0.0_f64;

    let mut x = xf;
    let mut fx = objective(x);
    let mut evaluations = 1usize;
    let mut fu = f64::INFINITY;

    let mut ffulc = fx;
    let mut fnfc = fx;

    let mut xm = 0.5 * (a + b);
    let mut tol1 = sqrt_eps * xf.abs() + options.xatol / 3.0;
    let mut tol2 = 2.0 * tol1;

    let mut exhausted = false;

    while (xf - xm).abs() > tol2 - 0.5 * (b - a) {
        let mut golden = true;

        // Attempt a parabolic fit through the three best points
        if e.abs() > tol1 {
            golden = false;
            let r = (xf - nfc) * (fx - ffulc);
            let mut q = (xf - fulc) * (fx - fnfc);
            let mut p = (xf - fulc) * q - (xf - nfc) * r;
            q = 2.0 * (q - r);
            if q > 0.0 {
                p = -p;
            }
            q = q.abs();
            let r_prev = e;
            e = rat;

            // Accept the parabola only if it lands inside the bracket and
            // moves less than half the step before last
            if p.abs() < (0.5 * q * r_prev).abs() && p > q * (a - xf) && p < q * (b - xf) {
                rat = p / q;
                x = xf + rat;

                // Do not step within tol2 of the bounds
                if (x - a) < tol2 || (b - x) < tol2 {
                    let si = if xm - xf == 0.0 {
                        1.0
                    } else {
                        (xm - xf).signum()
                    };
                    rat = tol1 * si;
                }
            } else {
                golden = true;
            }
        }

        if golden {
            // Golden-section step into the larger half of the bracket
            e = if xf >= xm { a - xf } else { b - xf };
            rat = golden_mean * e;
        }

        // Never step by less than tol1
        let si = if rat == 0.0 { 1.0 } else { rat.signum() };
        x = xf + si * rat.abs().max(tol1);
        fu = objective(x);
        evaluations += 1;

        if fu <= fx {
            if x >= xf {
                a = xf;
            } else {
                b = xf;
            }
            fulc = nfc;
            ffulc = fnfc;
            nfc = xf;
            fnfc = fx;
            xf = x;
            fx = fu;
        } else {
            if x < xf {
                a = x;
            } else {
                b = x;
            }
            if fu <= fnfc || nfc == xf {
                fulc = nfc;
                ffulc = fnfc;
                nfc = x;
                fnfc = fu;
            } else if fu <= ffulc || fulc == xf || fulc == nfc {
                fulc = x;
                ffulc = fu;
            }
        }

        xm = 0.5 * (a + b);
        tol1 = sqrt_eps * xf.abs() + options.xatol / 3.0;
        tol2 = 2.0 * tol1;

        if evaluations >= options.max_evaluations {
            exhausted = true;
            break;
        }
    }

    if xf.is_nan() || fx.is_nan() || fu.is_nan() {
        return Err(WhittleError::NumericalError {
            reason: "objective produced NaN during bounded minimization".to_string(),
        });
    }

    if exhausted && (xf - xm).abs() > tol2 - 0.5 * (b - a) {
        return Err(WhittleError::NonConvergence {
            max_evaluations: options.max_evaluations,
            tolerance: options.xatol,
        });
    }

    Ok(ScalarMinimum {
        xmin: xf,
        fmin: fx,
        evaluations,
    })
}
