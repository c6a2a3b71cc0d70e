use std::fmt;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::endpoints::CatalogEndpoints;

/// Bearer token from the client-credentials grant. Never cached.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
}

pub async fn fetch_access_token(
    client: &Client,
    endpoints: &CatalogEndpoints,
    client_id: &str,
    client_secret: &str,
) -> Result<AccessToken, FetchAccessTokenError> {
    let response = client
        .post(endpoints.token_url())
        .basic_auth(client_id, Some(client_secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await
        .map_err(|source| FetchAccessTokenError::RequestSend { source })?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|source| FetchAccessTokenError::ResponseRead { source })?;

    if !status.is_success() {
        return Err(FetchAccessTokenError::Rejected { status, body });
    }

    let parsed: TokenResponse = serde_json::from_str(&body)
        .map_err(|source| FetchAccessTokenError::DeserializeResponseBody { source })?;

    match parsed.access_token {
        Some(token) if !token.trim().is_empty() => {
            debug!("Obtained catalog access token");
            Ok(AccessToken(token))
        }
        _ => Err(FetchAccessTokenError::TokenMissing),
    }
}

#[derive(Debug, Error)]
pub enum FetchAccessTokenError {
    #[error("RequestSend: {source}")]
    RequestSend { source: reqwest::Error },

    #[error("ResponseRead: {source}")]
    ResponseRead { source: reqwest::Error },

    #[error("Rejected: token endpoint answered {status}: {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("DeserializeResponseBody: {source}")]
    DeserializeResponseBody { source: serde_json::Error },

    #[error("Token endpoint returned no access_token")]
    TokenMissing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_the_token() {
        let token = AccessToken::new("BQDsecretvalue");
        assert_eq!(format!("{token:?}"), "AccessToken(***)");
        assert_eq!(token.as_str(), "BQDsecretvalue");
    }
}
