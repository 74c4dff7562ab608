//! Server binary for the Cadence action engine.
//!
//! Wires configuration, the reference world, and the action manager
//! together and runs the tick loop until a termination condition is met.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `cadence-config.yaml` (or `CADENCE_CONFIG`)
//! 2. Initialize structured logging (tracing) from the `logging` section
//! 3. Build the map and spawn configured avatars
//! 4. Issue each avatar's startup command into the action manager
//! 5. Run the tick loop until `max_ticks`, idle, or Ctrl-C
//! 6. Log the final avatar state as JSON

mod config;
mod error;
mod runner;
mod scenario;

use std::path::PathBuf;

use cadence_actions::{ActionManager, SystemClock};
use cadence_world::Avatar;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{
    CONFIG_PATH_ENV, CadenceConfig, DEFAULT_CONFIG_PATH, LogFormat, LoggingConfig,
};
use crate::error::EngineError;
use crate::runner::InboxLogger;
use crate::scenario::Scenario;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, world setup, or the final summary
/// fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration. Logging is not up yet, so report afterwards.
    let (config, loaded_from) = load_config()?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!("cadence-engine starting");
    match &loaded_from {
        Some(path) => info!(path = %path.display(), "Config file loaded"),
        None => info!("Config file not found, using defaults"),
    }
    info!(
        seed = config.engine.seed,
        tick_interval_ms = config.engine.tick_interval_ms,
        max_ticks = config.engine.max_ticks,
        map = config.map.name,
        avatars = config.avatars.len(),
        "Configuration loaded"
    );

    // 3. Build the world.
    let mut scenario = Scenario::build(&config)?;

    // 4. Issue startup commands.
    let mut manager = ActionManager::new(SystemClock::new(), config.engine.seed);
    scenario.issue_commands(&mut manager)?;

    // 5. Run until done or interrupted.
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C, running without it");
            std::future::pending::<()>().await;
        }
    };
    let result = runner::run_engine(
        &mut manager,
        &mut scenario.world,
        &config.engine,
        &mut InboxLogger,
        shutdown,
    )
    .await;
    runner::log_run_end(&result);

    // 6. Final state.
    let avatars: Vec<&Avatar> = scenario.world.avatars().collect();
    let summary = serde_json::to_string(&avatars).map_err(EngineError::from)?;
    info!(avatars = %summary, "Final avatar state");

    info!(
        end_reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        "cadence-engine shutdown complete"
    );
    Ok(())
}

/// Load configuration from `CADENCE_CONFIG`, or `cadence-config.yaml` in
/// the working directory. Falls back to defaults when the file is missing.
fn load_config() -> Result<(CadenceConfig, Option<PathBuf>), EngineError> {
    let path = std::env::var_os(CONFIG_PATH_ENV)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    if path.exists() {
        let config = CadenceConfig::from_file(&path)?;
        Ok((config, Some(path)))
    } else {
        let mut config = CadenceConfig::default();
        config.apply_env_overrides()?;
        Ok((config, None))
    }
}

/// Install the global tracing subscriber. `RUST_LOG` wins over the
/// configured level.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    match logging.format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
    }
}
