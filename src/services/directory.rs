//! Member directory client.
//!
//! Forwards accepted signups to the headless-CMS REST API configured in
//! `[directory]`. The directory is a remote document store as far as the
//! gateway is concerned; it owns retries, dedup, and schema management.

use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::config::schema::DirectoryConfig;
use crate::validation::form::SignupData;

/// Errors from directory calls.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Client-side configuration problem (bad base URL).
    #[error("invalid directory configuration: {0}")]
    Config(String),

    /// Transport-level failure (connect, timeout, TLS).
    #[error("directory request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The directory answered with a non-success status.
    #[error("directory returned status {0}")]
    Status(u16),
}

/// HTTP client for the member directory.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    http: reqwest::Client,
    endpoint: Url,
    api_token: String,
}

impl DirectoryClient {
    /// Build a client from the directory config section.
    pub fn new(config: &DirectoryConfig) -> Result<Self, ServiceError> {
        let base_url: Url = config
            .base_url
            .parse()
            .map_err(|e| ServiceError::Config(format!("invalid base URL '{}': {}", config.base_url, e)))?;
        let endpoint = base_url
            .join(&format!("items/{}", config.collection))
            .map_err(|e| ServiceError::Config(format!("invalid collection path: {e}")))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ServiceError::Transport)?;

        Ok(Self {
            http,
            endpoint,
            api_token: config.api_token.clone(),
        })
    }

    /// POST one cleaned signup record to the directory collection.
    pub async fn create_member(&self, member: &SignupData) -> Result<(), ServiceError> {
        let mut request = self.http.post(self.endpoint.clone()).json(member);
        if !self.api_token.is_empty() {
            request = request.bearer_auth(&self.api_token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status(status.as_u16()));
        }
        Ok(())
    }

    /// The collection endpoint this client writes to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}
