//! Configuration loading from disk and the environment.

use std::env;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationErrors};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),
}

/// Load, overlay environment overrides, and validate configuration.
///
/// With no path the built-in defaults are used. `LOG_LEVEL` and `APP_ENV`
/// are read once here; the rest of the system never touches the
/// environment.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut config = match path {
        Some(path) => parse_config(&fs::read_to_string(path)?)?,
        None => AppConfig::default(),
    };

    apply_env_overrides(&mut config);

    validate_config(&config)
        .map_err(|errors| ConfigError::Validation(ValidationErrors(errors)))?;

    Ok(config)
}

/// Parse a TOML config document.
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

fn apply_env_overrides(config: &mut AppConfig) {
    if let Ok(level) = env::var("LOG_LEVEL") {
        if !level.is_empty() {
            config.observability.log_level = level;
        }
    }
    if let Ok(app_env) = env::var("APP_ENV") {
        config.observability.production = app_env == "production";
    }
}
