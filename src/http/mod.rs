//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, middleware layering)
//!     → request.rs (request ID attach/echo)
//!     → security::rate_limit (throttle form endpoints)
//!     → handlers.rs (validate, forward, respond)
//!     → response.rs (error envelopes)
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{request_id_middleware, X_REQUEST_ID};
pub use server::HttpServer;
