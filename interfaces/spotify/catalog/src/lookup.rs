use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::endpoints::CatalogEndpoints;
use crate::error::CatalogRequestError;
use crate::models::{Album, Playlist, Track};
use crate::request;
use crate::token::AccessToken;

pub async fn fetch_album(
    client: &Client,
    endpoints: &CatalogEndpoints,
    token: &AccessToken,
    album_id: &str,
) -> Result<Option<Album>, CatalogRequestError> {
    fetch_entity(client, endpoints, token, "albums", album_id).await
}

pub async fn fetch_track(
    client: &Client,
    endpoints: &CatalogEndpoints,
    token: &AccessToken,
    track_id: &str,
) -> Result<Option<Track>, CatalogRequestError> {
    fetch_entity(client, endpoints, token, "tracks", track_id).await
}

pub async fn fetch_playlist(
    client: &Client,
    endpoints: &CatalogEndpoints,
    token: &AccessToken,
    playlist_id: &str,
) -> Result<Option<Playlist>, CatalogRequestError> {
    fetch_entity(client, endpoints, token, "playlists", playlist_id).await
}

/// 400 and 404 mean the id does not name anything and map to `None`.
async fn fetch_entity<T: DeserializeOwned>(
    client: &Client,
    endpoints: &CatalogEndpoints,
    token: &AccessToken,
    collection: &str,
    id: &str,
) -> Result<Option<T>, CatalogRequestError> {
    let url = endpoints.api(&format!("{collection}/{id}"));
    let response = request::get(client, &url, token, &[]).await?;

    match response.status {
        StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => Ok(None),
        status if status.is_success() => serde_json::from_str(&response.body)
            .map(Some)
            .map_err(|source| CatalogRequestError::DeserializeResponseBody { source }),
        status => Err(CatalogRequestError::Rejected {
            status,
            body: response.body,
        }),
    }
}
