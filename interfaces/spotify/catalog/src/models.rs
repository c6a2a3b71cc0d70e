use serde::Deserialize;

const OPEN_SPOTIFY: &str = "https://open.spotify.com";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArtistRef {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub album_type: Option<String>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub images: Vec<Image>,
}

impl Album {
    pub fn spotify_url(&self) -> String {
        canonical_url(&self.external_urls, "album", &self.id)
    }

    /// Spotify lists images largest first.
    pub fn cover_url(&self) -> Option<&str> {
        self.images.first().map(|image| image.url.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub album: Album,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

impl Track {
    pub fn spotify_url(&self) -> String {
        canonical_url(&self.external_urls, "track", &self.id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Followers {
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub followers: Followers,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    // null for playlists without artwork
    #[serde(default)]
    pub images: Option<Vec<Image>>,
}

impl Playlist {
    pub fn spotify_url(&self) -> String {
        canonical_url(&self.external_urls, "playlist", &self.id)
    }

    pub fn cover_url(&self) -> Option<&str> {
        self.images
            .as_deref()
            .and_then(|images| images.first())
            .map(|image| image.url.as_str())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Page<T> {
    pub items: Vec<T>,
}

fn canonical_url(urls: &ExternalUrls, kind: &str, id: &str) -> String {
    urls.spotify
        .clone()
        .unwrap_or_else(|| format!("{OPEN_SPOTIFY}/{kind}/{id}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn album_tolerates_missing_optional_fields() {
        let album: Album = serde_json::from_str(r#"{"id": "a1", "name": "Album A"}"#).unwrap();
        assert_eq!(album.release_date, None);
        assert_eq!(album.cover_url(), None);
        assert_eq!(album.spotify_url(), "https://open.spotify.com/album/a1");
    }

    #[test]
    fn album_prefers_reported_url_and_first_image() {
        let album: Album = serde_json::from_str(
            r#"{
                "id": "a1",
                "name": "Album A",
                "release_date": "2025-02-14",
                "album_type": "single",
                "external_urls": {"spotify": "https://open.spotify.com/album/a1?si=x"},
                "images": [
                    {"url": "https://i.scdn.co/image/large", "height": 640, "width": 640},
                    {"url": "https://i.scdn.co/image/small", "height": 64, "width": 64}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(album.spotify_url(), "https://open.spotify.com/album/a1?si=x");
        assert_eq!(album.cover_url(), Some("https://i.scdn.co/image/large"));
    }

    #[test]
    fn playlist_accepts_null_images() {
        let playlist: Playlist = serde_json::from_str(
            r#"{"id": "p1", "name": "Night Drive", "followers": {"href": null, "total": 1200}, "images": null}"#,
        )
        .unwrap();
        assert_eq!(playlist.followers.total, 1200);
        assert_eq!(playlist.cover_url(), None);
        assert_eq!(playlist.spotify_url(), "https://open.spotify.com/playlist/p1");
    }

    #[test]
    fn album_without_name_is_rejected() {
        assert!(serde_json::from_str::<Album>(r#"{"id": "a1"}"#).is_err());
    }
}
