//! Engine configuration

use anyhow::{Context, Result};
use config::{Config, Environment};
use serde::Deserialize;

const ENV_PREFIX: &str = "ENCOUNTER";
const DEFAULT_LOG_FILTER: &str = "encounter_engine=info";

/// Engine configuration: built-in defaults overlaid by `ENCOUNTER_*` variables
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct EngineConfig {
    /// Tracing filter used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Fixed seed for the dice roller, for reproducible runs
    pub dice_seed: Option<u64>,
}

impl EngineConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::load(Environment::with_prefix(ENV_PREFIX))
    }

    fn load(environment: Environment) -> Result<Self> {
        Config::builder()
            .set_default("log_filter", DEFAULT_LOG_FILTER)?
            .add_source(environment.try_parsing(true))
            .build()
            .context("Failed to read engine configuration")?
            .try_deserialize()
            .context("Invalid engine configuration")
    }
}
