use interfaces_discord_webhook::{role_mention, Embed, WebhookMessage, COLOR_GOLD, COLOR_GREEN, COLOR_RED};

use crate::release::Release;

pub const LISTEN_BUTTON: &str = "🎧 Listen on Spotify";
pub const LISTEN_PROMPT: &str = "👇 Stream it now";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Announcement {
    /// Found by the release check.
    Detected,
    /// Pushed through a chat command.
    Promoted,
}

pub fn discord_release(
    release: &Release,
    artist_name: &str,
    role_id: Option<&str>,
    announcement: Announcement,
) -> WebhookMessage {
    let headline = match announcement {
        Announcement::Detected => format!("🚀 **{artist_name} just dropped a new track!** 🎶"),
        Announcement::Promoted => format!("🔥 **{artist_name} has a release to share!** 🎶"),
    };
    let content = match role_id {
        Some(role_id) => format!("{} {headline}", role_mention(role_id)),
        None => headline,
    };

    let description = format!(
        "📅 **Release Date:** {}\n🔗 **[Listen on Spotify]({})**",
        release.release_date.as_deref().unwrap_or("unknown"),
        release.url
    );

    WebhookMessage {
        content,
        embeds: vec![Embed::new(&release.name, description, COLOR_RED)
            .with_thumbnail(release.cover_url.as_deref())],
    }
}

pub fn telegram_release(release: &Release, artist_name: &str) -> String {
    format!(
        "🚀 *New {} Release:* [{}]({}) 🎶",
        escape_markdown(artist_name),
        escape_markdown(&release.name),
        release.url
    )
}

pub fn discord_playlist_added(
    playlist_id: &str,
    name: &str,
    followers: u64,
    cover_url: Option<&str>,
) -> WebhookMessage {
    WebhookMessage {
        content: "🎵 **Playlist added**".to_string(),
        embeds: vec![Embed::new(
            name,
            format!(
                "🔗 [Open playlist]({})\n👥 **Followers:** {followers}",
                playlist_url(playlist_id)
            ),
            COLOR_GREEN,
        )
        .with_thumbnail(cover_url)],
    }
}

pub fn discord_milestone(playlist_id: &str, name: &str, milestone: u64, followers: u64) -> WebhookMessage {
    WebhookMessage {
        content: "🏆 **Playlist milestone reached!**".to_string(),
        embeds: vec![Embed::new(
            name,
            format!(
                "🎉 **{milestone} followers** reached (now {followers})\n🔗 [Open playlist]({})",
                playlist_url(playlist_id)
            ),
            COLOR_GOLD,
        )],
    }
}

fn playlist_url(playlist_id: &str) -> String {
    format!("https://open.spotify.com/playlist/{playlist_id}")
}

/// Escapes the entity characters of Telegram's legacy Markdown.
pub fn escape_markdown(text: &str) -> String {
    text.chars()
        .flat_map(|c| match c {
            '_' | '*' | '`' | '[' => vec!['\\', c],
            _ => vec![c],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release() -> Release {
        Release {
            id: "b1".into(),
            name: "Album B".into(),
            release_date: Some("2025-02-14".into()),
            url: "https://open.spotify.com/album/b1".into(),
            cover_url: Some("https://i.scdn.co/image/b1".into()),
        }
    }

    #[test]
    fn discord_release_mentions_role_and_links_album() {
        let message = discord_release(&release(), "Surreal.wav", Some("42"), Announcement::Detected);
        assert_eq!(
            message.content,
            "<@&42> 🚀 **Surreal.wav just dropped a new track!** 🎶"
        );
        let embed = &message.embeds[0];
        assert_eq!(embed.title, "Album B");
        assert_eq!(embed.color, 16711680);
        assert_eq!(
            embed.description,
            "📅 **Release Date:** 2025-02-14\n🔗 **[Listen on Spotify](https://open.spotify.com/album/b1)**"
        );
        assert_eq!(embed.thumbnail.as_ref().unwrap().url, "https://i.scdn.co/image/b1");
    }

    #[test]
    fn discord_release_without_role_or_date() {
        let mut release = release();
        release.release_date = None;
        let message = discord_release(&release, "Surreal.wav", None, Announcement::Promoted);
        assert!(message.content.starts_with("🔥 **Surreal.wav has a release"));
        assert!(message.embeds[0].description.contains("unknown"));
    }

    #[test]
    fn telegram_text_escapes_markdown() {
        let mut release = release();
        release.name = "night_drive *remix*".into();
        assert_eq!(
            telegram_release(&release, "Surreal.wav"),
            "🚀 *New Surreal.wav Release:* [night\\_drive \\*remix\\*](https://open.spotify.com/album/b1) 🎶"
        );
    }

    #[test]
    fn milestone_embed_links_playlist() {
        let message = discord_milestone("p1", "Night Drive", 5000, 5210);
        let embed = &message.embeds[0];
        assert_eq!(embed.color, 15844367);
        assert!(embed.description.contains("**5000 followers**"));
        assert!(embed.description.contains("https://open.spotify.com/playlist/p1"));
    }
}
