//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming submission:
//!     → rate_limit.rs (fixed-window check per route + client IP)
//!     → Pass to the validation pipeline
//! ```
//!
//! # Design Decisions
//! - Fail closed: a throttled client never reaches the handler
//! - Denials are values, not errors; callers handle both branches
//! - No trust in client input

pub mod rate_limit;

pub use rate_limit::{RateLimitDecision, RateLimiter};
