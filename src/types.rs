//! Shared types for the PHACKLAB dashboard.
//!
//! These types form the data model used across all modules: simulation
//! parameters with widget-range validation, run-log records, and the
//! domain error enum.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The conventional significance levels offered by the dashboard.
pub const SIGNIFICANCE_LEVELS: &[f64] = &[0.01, 0.05, 0.10];

/// Tolerance used when matching a requested alpha against
/// [`SIGNIFICANCE_LEVELS`] (requests arrive as JSON floats).
const ALPHA_EPS: f64 = 1e-9;

// ---------------------------------------------------------------------------
// Widget ranges
// ---------------------------------------------------------------------------

/// An integer slider range with its default position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WidgetRange {
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

impl WidgetRange {
    /// Whether a value lies inside this range.
    pub fn contains(&self, value: u32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Slider ranges for the minimum-p-value simulator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PHackLimits {
    /// Tests attempted per simulated study (m).
    pub attempts: WidgetRange,
    /// Number of simulated studies (N).
    pub trials: WidgetRange,
    /// Pre-selected significance level.
    pub default_alpha: f64,
}

impl Default for PHackLimits {
    fn default() -> Self {
        Self {
            attempts: WidgetRange { min: 1, max: 50, default: 10 },
            trials: WidgetRange { min: 100, max: 50_000, default: 10_000 },
            default_alpha: 0.05,
        }
    }
}

/// Slider ranges for the maximum-R² regression simulator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionLimits {
    /// Observations per regression (n).
    pub sample_size: WidgetRange,
    /// Regressions fitted per simulated study (m).
    pub regressions: WidgetRange,
    /// Number of simulated studies (N).
    pub trials: WidgetRange,
}

impl Default for RegressionLimits {
    fn default() -> Self {
        Self {
            sample_size: WidgetRange { min: 10, max: 100, default: 30 },
            regressions: WidgetRange { min: 1, max: 20, default: 10 },
            trials: WidgetRange { min: 100, max: 20_000, default: 5_000 },
        }
    }
}

// ---------------------------------------------------------------------------
// Simulation parameters
// ---------------------------------------------------------------------------

/// Parameters for the minimum-p-value simulation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PHackParams {
    /// Tests attempted per simulated study; only the minimum p-value is kept.
    pub attempts: u32,
    /// Number of simulated studies.
    pub trials: u32,
    /// Significance threshold for the false-positive count.
    pub alpha: f64,
    /// Fixed RNG seed. `None` means a fresh entropy seed per run.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl PHackParams {
    /// Check the parameters against the configured widget ranges.
    pub fn validate(&self, limits: &PHackLimits) -> Result<(), LabError> {
        if !limits.attempts.contains(self.attempts) {
            return Err(LabError::AttemptsOutOfRange {
                got: self.attempts,
                min: limits.attempts.min,
                max: limits.attempts.max,
            });
        }
        if !limits.trials.contains(self.trials) {
            return Err(LabError::TrialsOutOfRange {
                got: self.trials,
                min: limits.trials.min,
                max: limits.trials.max,
            });
        }
        if !SIGNIFICANCE_LEVELS.iter().any(|a| (a - self.alpha).abs() < ALPHA_EPS) {
            return Err(LabError::UnsupportedAlpha(self.alpha));
        }
        Ok(())
    }
}

impl fmt::Display for PHackParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "m={} N={} α={:.2}{}",
            self.attempts,
            self.trials,
            self.alpha,
            if self.seed.is_some() { " (seeded)" } else { "" },
        )
    }
}

/// Parameters for the maximum-R² regression simulation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RegressionParams {
    /// Observations per regression.
    pub sample_size: u32,
    /// Regressions fitted per simulated study; only the maximum R² is kept.
    pub regressions: u32,
    /// Number of simulated studies.
    pub trials: u32,
    /// Fixed RNG seed. `None` means a fresh entropy seed per run.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl RegressionParams {
    /// Check the parameters against the configured widget ranges.
    pub fn validate(&self, limits: &RegressionLimits) -> Result<(), LabError> {
        if !limits.sample_size.contains(self.sample_size) {
            return Err(LabError::SampleSizeOutOfRange {
                got: self.sample_size,
                min: limits.sample_size.min,
                max: limits.sample_size.max,
            });
        }
        if !limits.regressions.contains(self.regressions) {
            return Err(LabError::AttemptsOutOfRange {
                got: self.regressions,
                min: limits.regressions.min,
                max: limits.regressions.max,
            });
        }
        if !limits.trials.contains(self.trials) {
            return Err(LabError::TrialsOutOfRange {
                got: self.trials,
                min: limits.trials.min,
                max: limits.trials.max,
            });
        }
        Ok(())
    }
}

impl fmt::Display for RegressionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={} m={} N={}{}",
            self.sample_size,
            self.regressions,
            self.trials,
            if self.seed.is_some() { " (seeded)" } else { "" },
        )
    }
}

// ---------------------------------------------------------------------------
// Run log
// ---------------------------------------------------------------------------

/// Which simulator produced a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunKind {
    PHack,
    Regression,
}

impl fmt::Display for RunKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunKind::PHack => write!(f, "p-hack"),
            RunKind::Regression => write!(f, "regression"),
        }
    }
}

/// A completed simulation run, kept in the in-memory run log.
///
/// Discarded on shutdown; there is deliberately no persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub id: Uuid,
    pub kind: RunKind,
    pub timestamp: DateTime<Utc>,
    /// Human-readable parameter summary, e.g. `m=10 N=10000 α=0.05`.
    pub params: String,
    /// The headline statistic: expected minimum p-value or expected
    /// maximum R², depending on `kind`.
    pub headline: f64,
    pub elapsed_ms: u64,
}

impl fmt::Display for RunRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} → {:.4} ({} ms)",
            self.kind, self.params, self.headline, self.elapsed_ms,
        )
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for PHACKLAB.
#[derive(Debug, thiserror::Error)]
pub enum LabError {
    #[error("attempt count {got} outside allowed range {min}..={max}")]
    AttemptsOutOfRange { got: u32, min: u32, max: u32 },

    #[error("trial count {got} outside allowed range {min}..={max}")]
    TrialsOutOfRange { got: u32, min: u32, max: u32 },

    #[error("sample size {got} outside allowed range {min}..={max}")]
    SampleSizeOutOfRange { got: u32, min: u32, max: u32 },

    #[error("significance level {0} is not one of the offered levels")]
    UnsupportedAlpha(f64),

    #[error("Configuration error: {0}")]
    Config(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn phack(attempts: u32, trials: u32, alpha: f64) -> PHackParams {
        PHackParams { attempts, trials, alpha, seed: None }
    }

    // -- PHackParams tests --

    #[test]
    fn test_phack_params_defaults_validate() {
        let limits = PHackLimits::default();
        let params = phack(
            limits.attempts.default,
            limits.trials.default,
            limits.default_alpha,
        );
        assert!(params.validate(&limits).is_ok());
    }

    #[test]
    fn test_phack_params_attempts_bounds() {
        let limits = PHackLimits::default();
        assert!(phack(1, 100, 0.05).validate(&limits).is_ok());
        assert!(phack(50, 100, 0.05).validate(&limits).is_ok());
        assert!(matches!(
            phack(0, 100, 0.05).validate(&limits),
            Err(LabError::AttemptsOutOfRange { got: 0, .. })
        ));
        assert!(matches!(
            phack(51, 100, 0.05).validate(&limits),
            Err(LabError::AttemptsOutOfRange { got: 51, .. })
        ));
    }

    #[test]
    fn test_phack_params_trials_bounds() {
        let limits = PHackLimits::default();
        assert!(matches!(
            phack(10, 99, 0.05).validate(&limits),
            Err(LabError::TrialsOutOfRange { got: 99, .. })
        ));
        assert!(matches!(
            phack(10, 50_001, 0.05).validate(&limits),
            Err(LabError::TrialsOutOfRange { .. })
        ));
    }

    #[test]
    fn test_phack_params_alpha_fixed_set() {
        let limits = PHackLimits::default();
        for &alpha in SIGNIFICANCE_LEVELS {
            assert!(phack(10, 1000, alpha).validate(&limits).is_ok());
        }
        assert!(matches!(
            phack(10, 1000, 0.07).validate(&limits),
            Err(LabError::UnsupportedAlpha(_))
        ));
    }

    #[test]
    fn test_phack_params_display() {
        let params = phack(10, 10_000, 0.05);
        assert_eq!(format!("{params}"), "m=10 N=10000 α=0.05");

        let seeded = PHackParams { seed: Some(42), ..params };
        assert!(format!("{seeded}").contains("(seeded)"));
    }

    #[test]
    fn test_phack_params_deserialize_without_seed() {
        let json = r#"{"attempts": 10, "trials": 1000, "alpha": 0.05}"#;
        let params: PHackParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.attempts, 10);
        assert!(params.seed.is_none());
    }

    // -- RegressionParams tests --

    #[test]
    fn test_regression_params_defaults_validate() {
        let limits = RegressionLimits::default();
        let params = RegressionParams {
            sample_size: limits.sample_size.default,
            regressions: limits.regressions.default,
            trials: limits.trials.default,
            seed: None,
        };
        assert!(params.validate(&limits).is_ok());
    }

    #[test]
    fn test_regression_params_sample_size_floor() {
        let limits = RegressionLimits::default();
        let params = RegressionParams {
            sample_size: 9,
            regressions: 10,
            trials: 1000,
            seed: None,
        };
        assert!(matches!(
            params.validate(&limits),
            Err(LabError::SampleSizeOutOfRange { got: 9, .. })
        ));
    }

    #[test]
    fn test_regression_params_display() {
        let params = RegressionParams {
            sample_size: 30,
            regressions: 10,
            trials: 5000,
            seed: None,
        };
        assert_eq!(format!("{params}"), "n=30 m=10 N=5000");
    }

    // -- RunRecord tests --

    #[test]
    fn test_run_kind_display() {
        assert_eq!(format!("{}", RunKind::PHack), "p-hack");
        assert_eq!(format!("{}", RunKind::Regression), "regression");
    }

    #[test]
    fn test_run_kind_serialization_roundtrip() {
        for kind in [RunKind::PHack, RunKind::Regression] {
            let json = serde_json::to_string(&kind).unwrap();
            let parsed: RunKind = serde_json::from_str(&json).unwrap();
            assert_eq!(kind, parsed);
        }
        assert_eq!(serde_json::to_string(&RunKind::PHack).unwrap(), "\"p-hack\"");
    }

    #[test]
    fn test_run_record_display() {
        let record = RunRecord {
            id: Uuid::new_v4(),
            kind: RunKind::PHack,
            timestamp: Utc::now(),
            params: "m=10 N=10000 α=0.05".into(),
            headline: 0.0921,
            elapsed_ms: 12,
        };
        let display = format!("{record}");
        assert!(display.contains("p-hack"));
        assert!(display.contains("0.0921"));
    }

    #[test]
    fn test_run_record_serialization_roundtrip() {
        let record = RunRecord {
            id: Uuid::new_v4(),
            kind: RunKind::Regression,
            timestamp: Utc::now(),
            params: "n=30 m=10 N=5000".into(),
            headline: 0.31,
            elapsed_ms: 40,
        };
        let json = serde_json::to_string(&record).unwrap();
        let parsed: RunRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, record.id);
        assert_eq!(parsed.kind, RunKind::Regression);
    }

    // -- LabError tests --

    #[test]
    fn test_lab_error_display() {
        let e = LabError::AttemptsOutOfRange { got: 0, min: 1, max: 50 };
        assert_eq!(format!("{e}"), "attempt count 0 outside allowed range 1..=50");

        let e = LabError::UnsupportedAlpha(0.2);
        assert!(format!("{e}").contains("0.2"));
    }

    // -- Limits tests --

    #[test]
    fn test_widget_range_contains() {
        let range = WidgetRange { min: 10, max: 100, default: 30 };
        assert!(range.contains(10));
        assert!(range.contains(100));
        assert!(!range.contains(9));
        assert!(!range.contains(101));
    }

    #[test]
    fn test_limits_serialization_roundtrip() {
        let limits = PHackLimits::default();
        let json = serde_json::to_string(&limits).unwrap();
        let parsed: PHackLimits = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.attempts.max, 50);
        assert!((parsed.default_alpha - 0.05).abs() < 1e-12);
    }
}
