//! Maximum-R² regression Monte Carlo simulation.
//!
//! Models a researcher who fits m separate regressions on fresh noise
//! and reports only the best fit. Both x and y are i.i.d. standard
//! normal with no relationship by construction; R² is scored on the
//! same data used to fit, so the reported maximum is upward-biased.
//! That bias is the effect being demonstrated.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use tracing::debug;

use crate::sim::stats;
use crate::types::RegressionParams;

// ---------------------------------------------------------------------------
// Ordinary least squares
// ---------------------------------------------------------------------------

/// A fitted simple linear regression.
#[derive(Debug, Clone, Copy)]
pub struct OlsFit {
    pub slope: f64,
    pub intercept: f64,
    /// In-sample coefficient of determination, clamped to [0,1].
    pub r_squared: f64,
}

/// Fit y = a + b·x by closed-form least squares and score R² on the
/// fitting data.
///
/// Degenerate inputs fit flat: zero variance in x gives slope 0, and
/// zero variance in y reports R² = 0 rather than NaN.
pub fn fit_ols(xs: &[f64], ys: &[f64]) -> OlsFit {
    debug_assert_eq!(xs.len(), ys.len());
    debug_assert!(xs.len() >= 2);

    let x_mean = stats::mean(xs);
    let y_mean = stats::mean(ys);

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        sxx += (x - x_mean) * (x - x_mean);
        sxy += (x - x_mean) * (y - y_mean);
    }

    let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };
    let intercept = y_mean - slope * x_mean;

    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        let predicted = intercept + slope * x;
        ss_res += (y - predicted) * (y - predicted);
        ss_tot += (y - y_mean) * (y - y_mean);
    }

    let r_squared = if ss_tot > 0.0 {
        (1.0 - ss_res / ss_tot).clamp(0.0, 1.0)
    } else {
        0.0
    };

    OlsFit { slope, intercept, r_squared }
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

/// Results of one maximum-R² simulation.
#[derive(Debug, Clone)]
pub struct RegressionOutcome {
    /// One maximum R² per simulated study, in trial order.
    pub maxima: Vec<f64>,
    /// Mean of the maxima.
    pub expected_max_r2: f64,
}

/// Run the simulation: `params.trials` studies, each fitting
/// `params.regressions` null regressions on `params.sample_size`
/// observations and keeping the best R².
pub fn run<R: Rng>(params: &RegressionParams, rng: &mut R) -> RegressionOutcome {
    let n = params.sample_size as usize;
    let mut maxima = Vec::with_capacity(params.trials as usize);
    let mut xs = vec![0.0f64; n];
    let mut ys = vec![0.0f64; n];

    for _ in 0..params.trials {
        let mut max_r2 = 0.0f64;
        for _ in 0..params.regressions {
            for x in xs.iter_mut() {
                *x = StandardNormal.sample(rng);
            }
            for y in ys.iter_mut() {
                *y = StandardNormal.sample(rng);
            }
            let fit = fit_ols(&xs, &ys);
            if fit.r_squared > max_r2 {
                max_r2 = fit.r_squared;
            }
        }
        maxima.push(max_r2);
    }

    let expected_max_r2 = stats::mean(&maxima);

    debug!(
        %params,
        expected_max_r2 = format!("{expected_max_r2:.4}"),
        "regression simulation complete"
    );

    RegressionOutcome { maxima, expected_max_r2 }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
