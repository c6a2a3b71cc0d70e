use reqwest::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Album,
    Track,
    Playlist,
    Artist,
}

impl LinkKind {
    fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "album" => Some(LinkKind::Album),
            "track" => Some(LinkKind::Track),
            "playlist" => Some(LinkKind::Playlist),
            "artist" => Some(LinkKind::Artist),
            _ => None,
        }
    }
}

/// Catalog entity named by a share link. `kind` is `None` for a bare id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogLink {
    pub kind: Option<LinkKind>,
    pub id: String,
}

/// Accepts `https://open.spotify.com/<kind>/<id>?si=…`, `spotify:<kind>:<id>` or a bare id.
pub fn parse_catalog_link(input: &str) -> Option<CatalogLink> {
    let input = input.trim();

    if let Some(rest) = input.strip_prefix("spotify:") {
        let (kind, id) = rest.split_once(':')?;
        return build(LinkKind::from_segment(kind), id);
    }

    match Url::parse(input) {
        Ok(url) => {
            let segments: Vec<&str> = url
                .path_segments()?
                .filter(|segment| !segment.is_empty())
                .collect();
            let (id, before) = segments.split_last()?;
            let kind = before.last().and_then(|segment| LinkKind::from_segment(segment));
            build(kind, id)
        }
        Err(_) => build(None, input),
    }
}

fn build(kind: Option<LinkKind>, id: &str) -> Option<CatalogLink> {
    let valid = !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then(|| CatalogLink {
        kind,
        id: id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(kind: Option<LinkKind>, id: &str) -> Option<CatalogLink> {
        Some(CatalogLink {
            kind,
            id: id.to_string(),
        })
    }

    #[test]
    fn takes_trailing_segment_of_share_links() {
        assert_eq!(
            parse_catalog_link("https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=abc123"),
            link(Some(LinkKind::Playlist), "37i9dQZF1DXcBWIGoYBM5M")
        );
        assert_eq!(
            parse_catalog_link("https://open.spotify.com/intl-de/album/4aawyAB9vmqN3uQ7FjRGTy/"),
            link(Some(LinkKind::Album), "4aawyAB9vmqN3uQ7FjRGTy")
        );
    }

    #[test]
    fn accepts_uris_and_bare_ids() {
        assert_eq!(
            parse_catalog_link("spotify:track:11dFghVXANMlKmJXsNCbNl"),
            link(Some(LinkKind::Track), "11dFghVXANMlKmJXsNCbNl")
        );
        assert_eq!(
            parse_catalog_link("11dFghVXANMlKmJXsNCbNl"),
            link(None, "11dFghVXANMlKmJXsNCbNl")
        );
    }

    #[test]
    fn rejects_links_without_usable_id() {
        assert_eq!(parse_catalog_link("https://open.spotify.com/"), None);
        assert_eq!(parse_catalog_link("not a link"), None);
        assert_eq!(parse_catalog_link("spotify:album"), None);
    }
}
