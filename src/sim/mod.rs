//! Monte Carlo simulation core.
//!
//! Two pure simulators (minimum p-value and maximum R²) plus the
//! binning and summary-statistic helpers they share. All randomness
//! flows through an explicitly passed `Rng` so runs are reproducible
//! under a fixed seed and fresh otherwise.

pub mod histogram;
pub mod pvalue;
pub mod regression;
pub mod stats;

use rand::rngs::StdRng;
use rand::SeedableRng;

/// A deterministic RNG for a given seed.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// An entropy-seeded RNG; successive runs differ.
pub fn fresh_rng() -> StdRng {
    StdRng::from_entropy()
}

/// RNG for an optional request seed.
pub fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => seeded_rng(s),
        None => fresh_rng(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
