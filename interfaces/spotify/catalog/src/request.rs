use reqwest::{Client, StatusCode};

use crate::error::CatalogRequestError;
use crate::token::AccessToken;

pub(crate) struct CatalogResponse {
    pub status: StatusCode,
    pub body: String,
}

pub(crate) async fn get(
    client: &Client,
    url: &str,
    token: &AccessToken,
    query: &[(&str, &str)],
) -> Result<CatalogResponse, CatalogRequestError> {
    let response = client
        .get(url)
        .bearer_auth(token.as_str())
        .query(query)
        .send()
        .await
        .map_err(|source| CatalogRequestError::RequestSend { source })?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|source| CatalogRequestError::ResponseRead { source })?;

    Ok(CatalogResponse { status, body })
}
