//! PHACKLAB — Interactive P-Hacking Simulator
//!
//! Entry point. Loads configuration, initialises structured logging,
//! and serves the dashboard until ctrl-c.

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use phacklab::config::AppConfig;
use phacklab::dashboard;
use phacklab::dashboard::routes::DashboardState;

const BANNER: &str = r#"
 ____  _   _    _    ____ _  ___        _    ____
|  _ \| | | |  / \  / ___| |/ / |      / \  | __ )
| |_) | |_| | / _ \| |   | ' /| |     / _ \ |  _ \
|  __/|  _  |/ ___ \ |___| . \| |___ / ___ \| |_) |
|_|   |_| |_/_/   \_\____|_|\_\_____/_/   \_\____/

  Monte Carlo demonstrations of p-hacking and selection bias
  v0.1.0
"#;

const CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    // Load configuration from TOML, falling back to compiled defaults
    let cfg = AppConfig::load_or_default(CONFIG_PATH)?;

    // Initialise structured logging
    init_logging();

    // Print startup banner
    println!("{BANNER}");
    if !std::path::Path::new(CONFIG_PATH).exists() {
        warn!("No {CONFIG_PATH} found — using compiled defaults");
    }
    info!(
        port = cfg.dashboard.port,
        histogram_bins = cfg.simulation.histogram_bins,
        max_attempts = cfg.simulation.p_hack.attempts.max,
        max_trials = cfg.simulation.p_hack.trials.max,
        "PHACKLAB starting up"
    );

    let state = Arc::new(DashboardState::new(cfg.simulation.clone()));
    dashboard::serve(state, cfg.dashboard.port).await?;

    info!("PHACKLAB shut down cleanly.");
    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("phacklab=info"));

    let json_logging = std::env::var("PHACKLAB_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
