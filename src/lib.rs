//! Community signup gateway library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;
pub mod services;
pub mod validation;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
