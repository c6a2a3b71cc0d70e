use reqwest::Client;
use tracing::debug;

use crate::endpoints::CatalogEndpoints;
use crate::error::CatalogRequestError;
use crate::models::{Album, Page};
use crate::request;
use crate::token::AccessToken;

/// Most recent single or album of `artist_id`, `None` when the artist has none.
pub async fn fetch_latest_release(
    client: &Client,
    endpoints: &CatalogEndpoints,
    token: &AccessToken,
    artist_id: &str,
) -> Result<Option<Album>, CatalogRequestError> {
    let url = endpoints.api(&format!("artists/{artist_id}/albums"));
    let response = request::get(
        client,
        &url,
        token,
        &[("include_groups", "single,album"), ("limit", "1")],
    )
    .await?;

    if !response.status.is_success() {
        return Err(CatalogRequestError::Rejected {
            status: response.status,
            body: response.body,
        });
    }

    let page: Page<Album> = serde_json::from_str(&response.body)
        .map_err(|source| CatalogRequestError::DeserializeResponseBody { source })?;

    let latest = page.items.into_iter().next();
    debug!(artist_id, found = latest.is_some(), "Fetched latest release");
    Ok(latest)
}
