//! Configuration validation.
//!
//! Serde handles the syntactic layer; this pass checks semantics (parseable
//! addresses, non-zero windows and timeouts) and reports every problem it
//! finds, not just the first.

use std::fmt;
use std::net::SocketAddr;

use url::Url;

use crate::config::schema::AppConfig;
use crate::observability::logger::Level;

/// A single semantic problem, keyed by the config field it concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All problems from one validation pass, displayed as one line.
#[derive(Debug)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

/// Semantic validation over a parsed config.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            "must be a valid socket address",
        ));
    }
    if config.listener.max_body_bytes == 0 {
        errors.push(ValidationError::new("listener.max_body_bytes", "must be greater than zero"));
    }
    if let Some(tls) = &config.listener.tls {
        if tls.cert_path.is_empty() {
            errors.push(ValidationError::new("listener.tls.cert_path", "must not be empty"));
        }
        if tls.key_path.is_empty() {
            errors.push(ValidationError::new("listener.tls.key_path", "must not be empty"));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than zero"));
    }

    if config.rate_limit.enabled {
        if config.rate_limit.window_ms == 0 {
            errors.push(ValidationError::new("rate_limit.window_ms", "must be greater than zero"));
        }
        if config.rate_limit.max_attempts == 0 {
            errors.push(ValidationError::new(
                "rate_limit.max_attempts",
                "must be greater than zero",
            ));
        }
        if config.rate_limit.sweep_interval_secs == 0 {
            errors.push(ValidationError::new(
                "rate_limit.sweep_interval_secs",
                "must be greater than zero",
            ));
        }
    }

    if !config.observability.log_level.is_empty()
        && Level::parse(&config.observability.log_level).is_none()
    {
        errors.push(ValidationError::new(
            "observability.log_level",
            "must be one of debug, info, warn, error",
        ));
    }
    if !matches!(config.observability.log_format.as_str(), "" | "json" | "pretty") {
        errors.push(ValidationError::new(
            "observability.log_format",
            "must be \"json\" or \"pretty\"",
        ));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            "must be a valid socket address",
        ));
    }

    if config.directory.enabled {
        if Url::parse(&config.directory.base_url).is_err() {
            errors.push(ValidationError::new("directory.base_url", "must be a valid URL"));
        }
        if config.directory.collection.is_empty() {
            errors.push(ValidationError::new("directory.collection", "must not be empty"));
        }
        if config.directory.timeout_secs == 0 {
            errors.push(ValidationError::new(
                "directory.timeout_secs",
                "must be greater than zero",
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
