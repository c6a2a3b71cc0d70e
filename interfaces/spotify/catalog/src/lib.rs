//! Read-only client for the Spotify Web API catalog
//!
//! - `token`: client-credentials exchange against the accounts service
//! - `artist_albums`: latest release of an artist
//! - `lookup`: single album / track / playlist by id

pub mod artist_albums;
pub mod endpoints;
pub mod error;
pub mod lookup;
pub mod models;
mod request;
pub mod token;

pub use artist_albums::fetch_latest_release;
pub use endpoints::CatalogEndpoints;
pub use error::CatalogRequestError;
pub use lookup::{fetch_album, fetch_playlist, fetch_track};
pub use models::{Album, ArtistRef, ExternalUrls, Followers, Image, Playlist, Track};
pub use token::{fetch_access_token, AccessToken, FetchAccessTokenError};
