use interfaces_spotify_catalog::{Album, Track};

/// Anything announced as a release: an album/single, or a promoted track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub id: String,
    pub name: String,
    pub release_date: Option<String>,
    pub url: String,
    pub cover_url: Option<String>,
}

impl From<Album> for Release {
    fn from(album: Album) -> Self {
        Self {
            url: album.spotify_url(),
            cover_url: album.cover_url().map(str::to_string),
            id: album.id,
            name: album.name,
            release_date: album.release_date,
        }
    }
}

impl From<Track> for Release {
    fn from(track: Track) -> Self {
        Self {
            url: track.spotify_url(),
            cover_url: track.album.cover_url().map(str::to_string),
            id: track.id,
            name: track.name,
            release_date: track.album.release_date,
        }
    }
}
