//! Dashboard API route handlers.
//!
//! All endpoints return JSON. State is shared via `Arc<DashboardState>`.
//! The simulate handlers validate against the configured widget ranges,
//! run the simulation synchronously, and append to the in-memory run log.

use axum::{extract::State, http::StatusCode, response::IntoResponse, response::Response, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::config::SimulationConfig;
use crate::sim::histogram::Histogram;
use crate::sim::{self, pvalue, regression};
use crate::types::{
    LabError, PHackLimits, PHackParams, RegressionLimits, RegressionParams, RunKind, RunRecord,
    SIGNIFICANCE_LEVELS,
};

/// How many run records the log endpoint returns.
const RUN_LOG_TAIL: usize = 100;

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Shared state accessible by all route handlers.
pub struct DashboardState {
    pub limits: SimulationConfig,
    pub runs: RwLock<Vec<RunRecord>>,
    pub started_at: DateTime<Utc>,
}

impl DashboardState {
    pub fn new(limits: SimulationConfig) -> Self {
        Self {
            limits,
            runs: RwLock::new(Vec::new()),
            started_at: Utc::now(),
        }
    }
}

pub type AppState = Arc<DashboardState>;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct PHackResponse {
    pub run_id: Uuid,
    pub params: PHackParams,
    /// Minimum p-value per simulated study.
    pub results: Vec<f64>,
    pub histogram: Histogram,
    pub false_positive_rate: f64,
    pub expected_minimum: f64,
    pub std_dev: f64,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegressionResponse {
    pub run_id: Uuid,
    pub params: RegressionParams,
    /// Maximum R² per simulated study.
    pub results: Vec<f64>,
    pub histogram: Histogram,
    pub expected_max_r2: f64,
    pub std_dev: f64,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LimitsResponse {
    pub p_hack: PHackLimits,
    pub regression: RegressionLimits,
    pub significance_levels: Vec<f64>,
    pub histogram_bins: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub uptime_secs: i64,
    pub total_runs: usize,
    pub p_hack_runs: usize,
    pub regression_runs: usize,
}

/// Validation failure surfaced to the page as HTTP 422.
#[derive(Debug)]
pub struct ApiError(LabError);

impl From<LabError> for ApiError {
    fn from(e: LabError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// POST /api/simulate/p-hack
pub async fn simulate_p_hack(
    State(state): State<AppState>,
    Json(params): Json<PHackParams>,
) -> Result<Json<PHackResponse>, ApiError> {
    params.validate(&state.limits.p_hack)?;

    let started = Instant::now();
    let mut rng = sim::rng_for(params.seed);
    let outcome = pvalue::run(&params, &mut rng);
    let elapsed_ms = started.elapsed().as_millis() as u64;

    let histogram = Histogram::unit_interval(&outcome.minima, state.limits.histogram_bins);
    let std_dev = sim::stats::std_dev(&outcome.minima);

    let record = RunRecord {
        id: Uuid::new_v4(),
        kind: RunKind::PHack,
        timestamp: Utc::now(),
        params: params.to_string(),
        headline: outcome.expected_minimum,
        elapsed_ms,
    };
    info!(
        run_id = %record.id,
        %params,
        fpr = format!("{:.2}%", outcome.false_positive_rate * 100.0),
        expected_minimum = format!("{:.4}", outcome.expected_minimum),
        elapsed_ms,
        "p-hack run complete"
    );
    state.runs.write().await.push(record.clone());

    Ok(Json(PHackResponse {
        run_id: record.id,
        params,
        results: outcome.minima,
        histogram,
        false_positive_rate: outcome.false_positive_rate,
        expected_minimum: outcome.expected_minimum,
        std_dev,
        elapsed_ms,
    }))
}

/// POST /api/simulate/regression
pub async fn simulate_regression(
    State(state): State<AppState>,
    Json(params): Json<RegressionParams>,
) -> Result<Json<RegressionResponse>, ApiError> {
    params.validate(&state.limits.regression)?;

    let started = Instant::now();
    let mut rng = sim::rng_for(params.seed);
    let outcome = regression::run(&params, &mut rng);
    let elapsed_ms = started.elapsed().as_millis() as u64;

    let histogram = Histogram::unit_interval(&outcome.maxima, state.limits.histogram_bins);
    let std_dev = sim::stats::std_dev(&outcome.maxima);

    let record = RunRecord {
        id: Uuid::new_v4(),
        kind: RunKind::Regression,
        timestamp: Utc::now(),
        params: params.to_string(),
        headline: outcome.expected_max_r2,
        elapsed_ms,
    };
    info!(
        run_id = %record.id,
        %params,
        expected_max_r2 = format!("{:.4}", outcome.expected_max_r2),
        elapsed_ms,
        "regression run complete"
    );
    state.runs.write().await.push(record.clone());

    Ok(Json(RegressionResponse {
        run_id: record.id,
        params,
        results: outcome.maxima,
        histogram,
        expected_max_r2: outcome.expected_max_r2,
        std_dev,
        elapsed_ms,
    }))
}

/// GET /api/limits
pub async fn get_limits(State(state): State<AppState>) -> Json<LimitsResponse> {
    Json(LimitsResponse {
        p_hack: state.limits.p_hack.clone(),
        regression: state.limits.regression.clone(),
        significance_levels: SIGNIFICANCE_LEVELS.to_vec(),
        histogram_bins: state.limits.histogram_bins,
    })
}

/// GET /api/runs
pub async fn get_runs(State(state): State<AppState>) -> Json<Vec<RunRecord>> {
    let runs = state.runs.read().await;
    let start = runs.len().saturating_sub(RUN_LOG_TAIL);
    Json(runs[start..].to_vec())
}

/// GET /api/status
pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let runs = state.runs.read().await;
    let p_hack_runs = runs.iter().filter(|r| r.kind == RunKind::PHack).count();
    let regression_runs = runs.len() - p_hack_runs;

    Json(StatusResponse {
        status: "ok".into(),
        uptime_secs: (Utc::now() - state.started_at).num_seconds(),
        total_runs: runs.len(),
        p_hack_runs,
        regression_runs,
    })
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
