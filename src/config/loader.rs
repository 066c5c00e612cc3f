//! Configuration loader

use config::{Config, Environment, File};
use std::path::Path;

use super::types::AppConfig;
use crate::common::errors::{ProbeError, Result};

/// Prefix for environment overrides, e.g. `BACKTEST_PROBE__TARGET__URL`
pub const ENV_PREFIX: &str = "BACKTEST_PROBE";

/// Load configuration from file and environment variables
///
/// Priority (highest to lowest):
/// 1. Environment variables (prefixed with BACKTEST_PROBE__)
/// 2. Configuration file (TOML format)
/// 3. Default values
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let mut builder = Config::builder();

    if let Some(path) = config_path {
        if Path::new(path).exists() {
            builder = builder.add_source(File::with_name(path).required(false));
        }
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    );

    let config = builder
        .build()
        .map_err(|e| ProbeError::Configuration(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ProbeError::Configuration(e.to_string()))?;

    validate(&app_config)?;
    Ok(app_config)
}

/// Reject values that would only fail later at request time
pub fn validate(config: &AppConfig) -> Result<()> {
    url::Url::parse(&config.target.url).map_err(|e| {
        ProbeError::Configuration(format!("Invalid target url '{}': {}", config.target.url, e))
    })?;

    if config.target.timeout_seconds == 0 {
        return Err(ProbeError::Configuration(
            "timeout_seconds must be greater than zero".to_string(),
        ));
    }

    Ok(())
}
