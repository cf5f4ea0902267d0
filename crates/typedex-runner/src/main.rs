//! Typedex runner binary.
//!
//! Loads configuration, builds the HTTP provider and the JSON store, and
//! runs the pipeline in the mode named by the first argument.
//!
//! # Modes
//!
//! - `refresh` (default) -- re-aggregate `source.json`, fetching it if absent
//! - `rebuild` -- fetch every record from the provider, then aggregate
//! - `schedule` -- rebuild once a year at the configured instant
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `typedex-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Create the provider client and resource store
//! 4. Run the selected mode

mod error;
mod mode;
mod refresh;
mod schedule;

use std::path::Path;

use chrono::Utc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use typedex_core::config::TypedexConfig;
use typedex_fetch::PokeApiClient;
use typedex_store::ResourceStore;

use crate::error::RunnerError;
use crate::mode::RunMode;
use crate::refresh::{SourcePolicy, run_once};

/// Default configuration file, relative to the working directory.
const CONFIG_PATH: &str = "typedex-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid or any run fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration (logging level comes from it).
    let (config, from_file) = load_config()?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    let mode = RunMode::from_arg(std::env::args().nth(1).as_deref())?;
    info!(mode = mode.label(), "typedex-runner starting");
    if from_file {
        info!(path = CONFIG_PATH, "Configuration loaded");
    } else {
        info!("Config file not found, using defaults");
    }
    info!(
        base_url = config.source.base_url,
        request_delay_ms = config.source.request_delay_ms,
        data_dir = %config.storage.data_dir.display(),
        "Pipeline configured"
    );

    // 3. Provider and store.
    let provider = PokeApiClient::new(&config.source);
    let store = ResourceStore::new(&config.storage.data_dir);

    // 4. Run.
    match mode {
        RunMode::Refresh => {
            run_once(&provider, &store, &config, SourcePolicy::ReuseStored).await?;
        }
        RunMode::Rebuild => {
            run_once(&provider, &store, &config, SourcePolicy::FetchFresh).await?;
        }
        RunMode::Schedule => run_schedule(&provider, &store, &config).await?,
    }

    info!("typedex-runner finished");
    Ok(())
}

/// Sleep until each configured instant, then rebuild. Never returns `Ok`.
async fn run_schedule(
    provider: &PokeApiClient,
    store: &ResourceStore,
    config: &TypedexConfig,
) -> Result<(), RunnerError> {
    loop {
        let now = Utc::now();
        let next = schedule::next_run_after(now, &config.schedule)?;
        info!(next_run = %next, "waiting for scheduled run");

        let wait = next.signed_duration_since(now).to_std().unwrap_or_default();
        tokio::time::sleep(wait).await;

        run_once(provider, store, config, SourcePolicy::FetchFresh).await?;
    }
}

/// Load configuration from `typedex-config.yaml`.
///
/// Falls back to defaults (with environment overrides) when the file does
/// not exist. The flag reports whether the file was read.
fn load_config() -> Result<(TypedexConfig, bool), RunnerError> {
    let config_path = Path::new(CONFIG_PATH);
    if config_path.exists() {
        Ok((TypedexConfig::from_file(config_path)?, true))
    } else {
        let mut config = TypedexConfig::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok((config, false))
    }
}
