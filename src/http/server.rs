//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (trace, timeout, body limit, request ID, rate limit)
//! - Bind server to listener (plain TCP or TLS)
//! - Spawn the rate-limit sweep task
//! - Graceful shutdown on OS signals

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use axum_server::tls_rustls::RustlsConfig;
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::schema::AppConfig;
use crate::http::handlers;
use crate::http::request::request_id_middleware;
use crate::lifecycle::Shutdown;
use crate::observability::logger::Logger;
use crate::security::rate_limit::{rate_limit_middleware, RateLimiter};
use crate::services::directory::{DirectoryClient, ServiceError};

/// Application state injected into handlers and middleware.
#[derive(Clone)]
pub struct AppState {
    pub limiter: Arc<RateLimiter>,
    pub logger: Arc<Logger>,
    pub directory: Option<Arc<DirectoryClient>>,
}

/// HTTP server for the signup gateway.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
    limiter: Arc<RateLimiter>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig, logger: Arc<Logger>) -> Result<Self, ServiceError> {
        let limiter = Arc::new(RateLimiter::new(
            Duration::from_millis(config.rate_limit.window_ms),
            config.rate_limit.max_attempts,
        ));

        let directory = if config.directory.enabled {
            Some(Arc::new(DirectoryClient::new(&config.directory)?))
        } else {
            None
        };

        let state = AppState {
            limiter: Arc::clone(&limiter),
            logger,
            directory,
        };

        let router = Self::build_router(&config, state);
        Ok(Self {
            router,
            config,
            limiter,
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        let mut forms = Router::new()
            .route("/api/signup", post(handlers::signup_handler))
            .route("/api/login", post(handlers::login_handler));

        if config.rate_limit.enabled {
            forms = forms.layer(middleware::from_fn_with_state(
                state.clone(),
                rate_limit_middleware,
            ));
        }

        Router::new()
            .merge(forms)
            .route("/health", get(handlers::health_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(RequestBodyLimitLayer::new(config.listener.max_body_bytes))
            .layer(middleware::from_fn(request_id_middleware))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let shutdown = Shutdown::new();

        if self.config.rate_limit.enabled {
            let limiter = Arc::clone(&self.limiter);
            let sweep_interval = Duration::from_secs(self.config.rate_limit.sweep_interval_secs);
            let mut stop = shutdown.subscribe();
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(sweep_interval);
                // An interval's first tick completes immediately.
                ticker.tick().await;
                loop {
                    tokio::select! {
                        _ = ticker.tick() => limiter.sweep(),
                        _ = stop.recv() => break,
                    }
                }
            });
        }

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        match self.config.listener.tls.clone() {
            Some(tls) => {
                let rustls_config =
                    RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path).await?;
                let std_listener = listener.into_std()?;
                axum_server::from_tcp_rustls(std_listener, rustls_config)
                    .serve(app)
                    .await?;
            }
            None => {
                axum::serve(listener, app)
                    .with_graceful_shutdown(crate::lifecycle::signals::shutdown_signal())
                    .await?;
            }
        }

        shutdown.trigger();
        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The rate limiter backing the form endpoints.
    pub fn limiter(&self) -> Arc<RateLimiter> {
        Arc::clone(&self.limiter)
    }
}
