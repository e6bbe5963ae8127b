//! Summary statistics over simulation result sequences.
//!
//! Small helpers shared by both simulators. Degenerate inputs return 0.0
//! rather than NaN so downstream JSON stays well-formed.

/// Arithmetic mean. Returns 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Fraction of values strictly below `threshold`. Returns 0.0 for an
/// empty slice.
pub fn fraction_below(values: &[f64], threshold: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let count = values.iter().filter(|v| **v < threshold).count();
    count as f64 / values.len() as f64
}

/// Sample standard deviation (n − 1 denominator). Returns 0.0 when fewer
/// than two values.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_basic() {
        assert!((mean(&[1.0, 2.0, 3.0, 4.0, 5.0]) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_fraction_below() {
        let values = [0.01, 0.04, 0.05, 0.20, 0.90];
        // Strictly below 0.05: 0.01 and 0.04
        assert!((fraction_below(&values, 0.05) - 0.4).abs() < 1e-12);
        assert_eq!(fraction_below(&values, 0.0), 0.0);
        assert!((fraction_below(&values, 1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_fraction_below_empty() {
        assert_eq!(fraction_below(&[], 0.5), 0.0);
    }

    #[test]
    fn test_std_dev_known_value() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        // Sample variance 4.571428..., sd ≈ 2.13809
        assert!((std_dev(&values) - 2.138089935299395).abs() < 1e-10);
    }

    #[test]
    fn test_std_dev_degenerate() {
        assert_eq!(std_dev(&[]), 0.0);
        assert_eq!(std_dev(&[1.0]), 0.0);
        assert_eq!(std_dev(&[3.0, 3.0, 3.0]), 0.0);
    }
}
