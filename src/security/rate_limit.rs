//! Fixed-window rate limiting for the form endpoints.

use std::net::SocketAddr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use serde_json::json;

use crate::http::server::AppState;
use crate::observability::logger::Severity;
use crate::observability::metrics;

/// Outcome of a single rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    /// Attempts left in the current window after this check.
    pub remaining: u32,
    /// Absolute end of the current window, milliseconds since the Unix epoch.
    pub reset_at: u64,
}

#[derive(Debug, Clone, Copy)]
struct WindowEntry {
    count: u32,
    window_start: u64,
}

/// Per-key fixed-window attempt counter.
///
/// Window length and attempt budget are injected at construction so tests
/// can run independent instances instead of sharing process-global state.
/// Entries live in a sharded map; the entry handle holds the shard lock for
/// the whole read-increment-write, so concurrent checks on one key can never
/// observe the same pre-increment count.
pub struct RateLimiter {
    entries: DashMap<String, WindowEntry>,
    window_ms: u64,
    max_attempts: u32,
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before Unix epoch")
        .as_millis() as u64
}

impl RateLimiter {
    pub fn new(window: Duration, max_attempts: u32) -> Self {
        Self {
            entries: DashMap::new(),
            window_ms: window.as_millis() as u64,
            max_attempts,
        }
    }

    /// Record an attempt for `key` and decide whether it is allowed.
    ///
    /// A fresh key opens a window with count 1. Once the count reaches the
    /// budget, further attempts are denied without incrementing. A key whose
    /// window has fully elapsed starts over; counts never carry across
    /// windows.
    pub fn check(&self, key: &str) -> RateLimitDecision {
        let now = now_millis();
        let mut entry = self.entries.entry(key.to_string()).or_insert(WindowEntry {
            count: 0,
            window_start: now,
        });

        if now.saturating_sub(entry.window_start) >= self.window_ms {
            entry.count = 0;
            entry.window_start = now;
        }

        let reset_at = entry.window_start + self.window_ms;
        if entry.count >= self.max_attempts {
            return RateLimitDecision {
                allowed: false,
                remaining: 0,
                reset_at,
            };
        }

        entry.count += 1;
        RateLimitDecision {
            allowed: true,
            remaining: self.max_attempts - entry.count,
            reset_at,
        }
    }

    /// Drop every entry whose window has fully elapsed.
    ///
    /// Pure garbage collection: active windows are untouched. Intended to
    /// run periodically to bound memory.
    pub fn sweep(&self) {
        let now = now_millis();
        self.entries
            .retain(|_, entry| now.saturating_sub(entry.window_start) < self.window_ms);
    }

    /// Forget all state. Test isolation hook.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of tracked keys.
    pub fn tracked_keys(&self) -> usize {
        self.entries.len()
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}

/// Middleware guarding the form endpoints.
///
/// Keys attempts by route path and client IP. A denied request is answered
/// directly with 429 and never reaches the handler; the denial is logged as
/// a security event and counted in metrics.
pub async fn rate_limit_middleware(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let key = format!("{}:{}", path, addr.ip());

    let decision = state.limiter.check(&key);
    if decision.allowed {
        return next.run(request).await;
    }

    state.logger.security(
        "rate_limit_exceeded",
        Severity::Medium,
        json!({
            "route": path,
            "key": key,
            "resetAt": decision.reset_at,
        })
        .as_object()
        .cloned(),
    );
    metrics::record_rate_limited(&path);

    rate_limited_response(&decision)
}

/// 429 response carrying the retry hint the caller may surface.
pub fn rate_limited_response(decision: &RateLimitDecision) -> Response {
    let retry_after_secs = decision
        .reset_at
        .saturating_sub(now_millis())
        .div_ceil(1000)
        .max(1);

    let body = json!({
        "error": "rate_limited",
        "remaining": decision.remaining,
        "reset_at": decision.reset_at,
    });

    let mut response = (StatusCode::TOO_MANY_REQUESTS, axum::Json(body)).into_response();
    if let Ok(value) = HeaderValue::from_str(&retry_after_secs.to_string()) {
        response.headers_mut().insert(header::RETRY_AFTER, value);
    }
    response
}
