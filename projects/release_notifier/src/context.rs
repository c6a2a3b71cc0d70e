use interfaces_spotify_catalog::{fetch_access_token, AccessToken, FetchAccessTokenError};
use reqwest::Client;
use thiserror::Error;

use crate::config::Config;

/// Shared HTTP client plus configuration, handed to every task.
pub struct AppContext {
    pub http: Client,
    pub config: Config,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self, BuildContextError> {
        let http = Client::builder()
            .timeout(config.http_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| BuildContextError::HttpClient { source })?;

        Ok(Self { http, config })
    }

    /// Fresh client-credentials token, requested on every call.
    pub async fn access_token(&self) -> Result<AccessToken, FetchAccessTokenError> {
        let spotify = &self.config.spotify;
        fetch_access_token(
            &self.http,
            &spotify.endpoints,
            &spotify.client_id,
            &spotify.client_secret,
        )
        .await
    }
}

#[derive(Debug, Error)]
pub enum BuildContextError {
    #[error("HttpClient: {source}")]
    HttpClient { source: reqwest::Error },
}
