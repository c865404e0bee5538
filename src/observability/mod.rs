//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request pipeline produces:
//!     → logger.rs (structured entries: validation, throttling, services)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured entries (JSON in production) for machine parsing
//! - Sensitive context keys sanitized before any entry leaves the process
//! - Metrics are cheap (atomic increments)

pub mod logger;
pub mod metrics;

pub use logger::{Level, LogFormat, Logger, Severity};
