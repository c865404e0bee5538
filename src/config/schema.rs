//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! gateway. All types derive Serde traits for deserialization from config
//! files, and every section has defaults so a minimal config works.

use serde::{Deserialize, Serialize};

use crate::observability::logger::{Level, LogFormat};

/// Root configuration for the signup gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address, TLS, body limits).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Rate limiting for the form endpoints.
    pub rate_limit: RateLimitConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,

    /// Member directory (headless CMS) forwarding.
    pub directory: DirectoryConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Optional TLS configuration.
    pub tls: Option<TlsConfig>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            tls: None,
            max_body_bytes: 64 * 1024,
        }
    }
}

/// TLS configuration for the listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TlsConfig {
    /// Path to certificate file (PEM).
    pub cert_path: String,

    /// Path to private key file (PEM).
    pub key_path: String,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Rate limiting configuration for the form endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Enable rate limiting.
    pub enabled: bool,

    /// Attempt window in milliseconds.
    pub window_ms: u64,

    /// Maximum attempts per key per window.
    pub max_attempts: u32,

    /// Interval between expired-window sweeps in seconds.
    pub sweep_interval_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            window_ms: 15 * 60 * 1000,
            max_attempts: 5,
            sweep_interval_secs: 60,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Minimum log level (debug, info, warn, error). Empty means derived
    /// from the production flag: info in production, debug otherwise.
    pub log_level: String,

    /// Log output format ("json" or "pretty"). Empty means derived from
    /// the production flag: json in production, pretty otherwise.
    pub log_format: String,

    /// Production deployment flag.
    pub production: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: String::new(),
            log_format: String::new(),
            production: false,
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

impl ObservabilityConfig {
    /// Effective minimum log level.
    pub fn min_level(&self) -> Level {
        if let Some(level) = Level::parse(&self.log_level) {
            return level;
        }
        if self.production {
            Level::Info
        } else {
            Level::Debug
        }
    }

    /// Effective log output format.
    pub fn format(&self) -> LogFormat {
        match self.log_format.as_str() {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            _ => {
                if self.production {
                    LogFormat::Json
                } else {
                    LogFormat::Pretty
                }
            }
        }
    }
}

/// Member directory (headless CMS) forwarding configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Enable forwarding of accepted signups.
    pub enabled: bool,

    /// Base URL of the directory REST API.
    pub base_url: String,

    /// Bearer token for the directory API.
    pub api_token: String,

    /// Collection accepted signups are written to.
    pub collection: String,

    /// Outbound request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: "http://127.0.0.1:8055/".to_string(),
            api_token: String::new(),
            collection: "members".to_string(),
            timeout_secs: 10,
        }
    }
}
