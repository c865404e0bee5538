//! Structured application logger.
//!
//! Level-filtered, context-sanitizing log emitter for the signup pipeline:
//! validation failures, rate-limit rejections, and downstream service
//! errors all funnel through one entry constructor and one sink. JSON
//! output for production, a human-readable line for development.

use std::io::Write;
use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::schema::ObservabilityConfig;

/// Marker substituted for redacted token values.
pub const REDACTED: &str = "[REDACTED]";

/// Marker substituted for context nested beyond [`MAX_CONTEXT_DEPTH`].
pub const TRUNCATED: &str = "[TRUNCATED]";

/// Bound on context nesting so serialization is total even for
/// pathological inputs.
const MAX_CONTEXT_DEPTH: usize = 16;

/// Context map attached to a log entry.
pub type Context = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }

    pub fn parse(value: &str) -> Option<Level> {
        match value.to_ascii_lowercase().as_str() {
            "debug" => Some(Level::Debug),
            "info" => Some(Level::Info),
            "warn" | "warning" => Some(Level::Warn),
            "error" => Some(Level::Error),
            _ => None,
        }
    }
}

/// Output mode, selected once per process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Single-line JSON entries for machine consumption.
    Json,
    /// Timestamp, level, message and inline context for humans.
    Pretty,
}

/// Severity attached to security events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    fn level(self) -> Level {
        match self {
            Severity::High | Severity::Critical => Level::Error,
            Severity::Medium | Severity::Low => Level::Warn,
        }
    }
}

/// Error descriptor carried on error-level entries.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl ErrorInfo {
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        Self {
            message: err.to_string(),
            source: err.source().map(|s| s.to_string()),
        }
    }
}

#[derive(Serialize)]
struct LogEntry<'a> {
    timestamp: String,
    level: &'static str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<Context>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorInfo>,
}

/// Leveled, context-sanitizing logger writing to a single sink.
pub struct Logger {
    min_level: Level,
    format: LogFormat,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl Logger {
    pub fn new(min_level: Level, format: LogFormat) -> Self {
        Self::with_sink(min_level, format, Box::new(std::io::stdout()))
    }

    /// Build from the observability section: explicit level/format when
    /// configured, otherwise debug+pretty in development and info+json in
    /// production.
    pub fn from_config(config: &ObservabilityConfig) -> Self {
        Self::new(config.min_level(), config.format())
    }

    pub fn with_sink(min_level: Level, format: LogFormat, sink: Box<dyn Write + Send>) -> Self {
        Self {
            min_level,
            format,
            sink: Mutex::new(sink),
        }
    }

    pub fn min_level(&self) -> Level {
        self.min_level
    }

    fn enabled(&self, level: Level) -> bool {
        level >= self.min_level
    }

    pub fn debug(&self, message: &str, context: Option<Context>) {
        self.emit(Level::Debug, message, context, None);
    }

    pub fn info(&self, message: &str, context: Option<Context>) {
        self.emit(Level::Info, message, context, None);
    }

    pub fn warn(&self, message: &str, context: Option<Context>) {
        self.emit(Level::Warn, message, context, None);
    }

    pub fn error(
        &self,
        message: &str,
        context: Option<Context>,
        error: Option<&(dyn std::error::Error + 'static)>,
    ) {
        self.emit(Level::Error, message, context, error.map(ErrorInfo::from_error));
    }

    /// Record an outbound collaborator call.
    pub fn service_call(&self, service: &str, operation: &str, context: Option<Context>) {
        let mut ctx = context.unwrap_or_default();
        ctx.insert("service".to_string(), Value::from(service));
        ctx.insert("operation".to_string(), Value::from(operation));
        self.emit(Level::Debug, &format!("{service}.{operation} call"), Some(ctx), None);
    }

    /// Record a failed collaborator call with its error descriptor.
    pub fn service_error(
        &self,
        service: &str,
        operation: &str,
        error: &(dyn std::error::Error + 'static),
        context: Option<Context>,
    ) {
        let mut ctx = context.unwrap_or_default();
        ctx.insert("service".to_string(), Value::from(service));
        ctx.insert("operation".to_string(), Value::from(operation));
        self.emit(
            Level::Error,
            &format!("{service}.{operation} failed"),
            Some(ctx),
            Some(ErrorInfo::from_error(error)),
        );
    }

    /// Record an abuse-relevant condition for operational monitoring.
    ///
    /// High and critical severities emit at error level, medium and low at
    /// warn. Entries are always tagged `securityEvent: true`.
    pub fn security(&self, event: &str, severity: Severity, context: Option<Context>) {
        let mut ctx = context.unwrap_or_default();
        ctx.insert("securityEvent".to_string(), Value::from(true));
        ctx.insert("severity".to_string(), Value::from(severity.as_str()));
        self.emit(severity.level(), event, Some(ctx), None);
    }

    /// Record an operation duration; anything over five seconds is a warning.
    pub fn performance(&self, operation: &str, duration_ms: u64, context: Option<Context>) {
        let mut ctx = context.unwrap_or_default();
        ctx.insert("performanceMetric".to_string(), Value::from(true));
        ctx.insert("durationMs".to_string(), Value::from(duration_ms));
        let level = if duration_ms > 5000 { Level::Warn } else { Level::Info };
        self.emit(level, operation, Some(ctx), None);
    }

    fn emit(
        &self,
        level: Level,
        message: &str,
        context: Option<Context>,
        error: Option<ErrorInfo>,
    ) {
        if !self.enabled(level) {
            return;
        }

        let entry = LogEntry {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            level: level.as_str(),
            message,
            context: context.map(sanitize_context),
            error,
        };

        let line = match self.format {
            LogFormat::Json => match serde_json::to_string(&entry) {
                Ok(json) => json,
                // Unreachable with these types; keep the entry rather than drop it.
                Err(_) => format!("{{\"level\":\"{}\",\"message\":\"{}\"}}", entry.level, message),
            },
            LogFormat::Pretty => {
                let mut line = format!("{} {:5} {}", entry.timestamp, level.as_str().to_uppercase(), message);
                if let Some(ctx) = &entry.context {
                    if let Ok(json) = serde_json::to_string(ctx) {
                        line.push(' ');
                        line.push_str(&json);
                    }
                }
                if let Some(err) = &entry.error {
                    line.push_str(" error=");
                    line.push_str(&err.message);
                }
                line
            }
        };

        // Fire and forget: a slow or broken sink must never fail a request.
        let mut sink = self.sink.lock().expect("log sink mutex poisoned");
        let _ = writeln!(sink, "{line}");
    }
}

/// Apply the fixed redaction rules: `password` keys are dropped entirely,
/// `token` values are replaced with [`REDACTED`]. Applies at every nesting
/// level, bounded by [`MAX_CONTEXT_DEPTH`].
fn sanitize_context(context: Context) -> Context {
    match sanitize_value(Value::Object(context), 0) {
        Value::Object(map) => map,
        _ => Context::new(),
    }
}

fn sanitize_value(value: Value, depth: usize) -> Value {
    if depth > MAX_CONTEXT_DEPTH {
        return Value::from(TRUNCATED);
    }
    match value {
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, inner) in map {
                if key == "password" {
                    continue;
                }
                if key == "token" {
                    out.insert(key, Value::from(REDACTED));
                    continue;
                }
                out.insert(key, sanitize_value(inner, depth + 1));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| sanitize_value(item, depth + 1))
                .collect(),
        ),
        other => other,
    }
}
