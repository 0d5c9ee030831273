use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::constants::{DEFAULT_MINIMAL_DURATION_SECS, DEFAULT_SETPOS_SCAN_LIMIT};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub expansion: ExpansionConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExpansionConfig {
    /// Duration assumed for rules whose end instant is absent.
    pub minimal_duration_seconds: u32,
    /// Defensive cap on BYSETPOS resolver invocations per expansion.
    pub setpos_scan_limit: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from `.env` file and environment variables into a `Settings`.
    /// Environment variables take precedence over `.env` file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Config::builder()
            .set_default(
                "expansion.minimal_duration_seconds",
                i64::from(DEFAULT_MINIMAL_DURATION_SECS),
            )?
            .set_default(
                "expansion.setpos_scan_limit",
                i64::from(DEFAULT_SETPOS_SCAN_LIMIT),
            )?
            .set_default("logging.level", "debug")?
            // Env file
            .add_source(
                config::Environment::default()
                    .convert_case(config::Case::Snake)
                    .separator("_")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    tracing::debug!(level = %settings.logging.level, "Configuration loaded");
    Ok(settings)
}
