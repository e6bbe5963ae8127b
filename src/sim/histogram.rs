//! Fixed-range histogram binning for the result charts.
//!
//! Both simulators produce values in [0,1], so bins cover that interval
//! with a fixed width. The server does the binning; the page only draws.

use serde::{Deserialize, Serialize};

/// Default number of bins for both result charts.
pub const DEFAULT_BINS: usize = 50;

/// A histogram over the unit interval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Histogram {
    /// Width of each bin: `1.0 / counts.len()`.
    pub bin_width: f64,
    /// Count of values per bin, left to right from 0.0.
    pub counts: Vec<u64>,
}

impl Histogram {
    /// Bin `values` over [0,1] into `bins` equal-width buckets.
    ///
    /// Values equal to 1.0 land in the last bin; anything outside [0,1]
    /// is ignored (the simulators never produce such values).
    pub fn unit_interval(values: &[f64], bins: usize) -> Self {
        let bins = bins.max(1);
        let mut counts = vec![0u64; bins];
        let bin_width = 1.0 / bins as f64;

        for &v in values {
            if !(0.0..=1.0).contains(&v) {
                continue;
            }
            let idx = ((v / bin_width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Self { bin_width, counts }
    }

    /// Total number of binned values.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Left edge of bin `i`.
    pub fn bin_start(&self, i: usize) -> f64 {
        i as f64 * self.bin_width
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
