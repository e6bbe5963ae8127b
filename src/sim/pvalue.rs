//! Minimum-p-value Monte Carlo simulation.
//!
//! Models a researcher who runs m independent tests on pure noise and
//! reports only the best one. Under the null every p-value is uniform on
//! [0,1), so the reported minimum concentrates near zero as m grows,
//! producing false positives without any real effect.

use rand::Rng;
use tracing::debug;

use crate::sim::stats;
use crate::types::PHackParams;

/// Results of one minimum-p-value simulation.
#[derive(Debug, Clone)]
pub struct PHackOutcome {
    /// One minimum p-value per simulated study, in trial order.
    pub minima: Vec<f64>,
    /// Fraction of studies whose minimum fell below alpha.
    pub false_positive_rate: f64,
    /// Mean of the minima.
    pub expected_minimum: f64,
}

/// Run the simulation: `params.trials` studies of `params.attempts`
/// uniform draws each, keeping the per-study minimum.
///
/// Deterministic for a given RNG state; callers control reproducibility
/// by the `Rng` they pass in.
pub fn run<R: Rng>(params: &PHackParams, rng: &mut R) -> PHackOutcome {
    let mut minima = Vec::with_capacity(params.trials as usize);

    for _ in 0..params.trials {
        let mut min_p = f64::MAX;
        for _ in 0..params.attempts {
            let p: f64 = rng.gen();
            if p < min_p {
                min_p = p;
            }
        }
        minima.push(min_p);
    }

    let false_positive_rate = stats::fraction_below(&minima, params.alpha);
    let expected_minimum = stats::mean(&minima);

    debug!(
        %params,
        fpr = format!("{:.2}%", false_positive_rate * 100.0),
        expected_minimum = format!("{expected_minimum:.4}"),
        "p-hack simulation complete"
    );

    PHackOutcome {
        minima,
        false_positive_rate,
        expected_minimum,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
