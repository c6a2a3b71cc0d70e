use std::fmt;

use interfaces_discord_webhook::{execute_webhook, WebhookMessage};
use interfaces_telegram_bot::{
    send_message, send_photo, BotApiError, ChatId, InlineKeyboardMarkup, SendMessage, SendPhoto,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::TelegramConfig;
use crate::context::AppContext;
use crate::notify::templates::{self, Announcement, LISTEN_BUTTON, LISTEN_PROMPT};
use crate::release::Release;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Discord,
    Telegram,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Discord => f.write_str("discord"),
            Channel::Telegram => f.write_str("telegram"),
        }
    }
}

/// Per-channel outcome of one announcement. Unconfigured channels are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub delivered: Vec<Channel>,
    pub failed: Vec<(Channel, String)>,
    /// Channels that took this announcement on an earlier attempt.
    pub skipped: Vec<Channel>,
}

impl DeliveryReport {
    /// At least one channel has it, now or earlier, and none refused.
    pub fn is_complete(&self) -> bool {
        (!self.delivered.is_empty() || !self.skipped.is_empty()) && self.failed.is_empty()
    }

    fn skip(&mut self, channel: Channel) {
        debug!(%channel, "Already delivered on an earlier attempt");
        self.skipped.push(channel);
    }

    fn record<E: fmt::Display>(&mut self, channel: Channel, result: Result<(), E>) {
        match result {
            Ok(()) => {
                info!(%channel, "Notification delivered");
                self.delivered.push(channel);
            }
            Err(err) => {
                warn!(%channel, error = %err, "Notification failed");
                self.failed.push((channel, err.to_string()));
            }
        }
    }
}

/// Sends to every configured channel not listed in `already_delivered`.
pub async fn announce_release(
    ctx: &AppContext,
    release: &Release,
    announcement: Announcement,
    already_delivered: &[Channel],
) -> DeliveryReport {
    let config = &ctx.config;
    let mut report = DeliveryReport::default();

    if let Some(webhook_url) = config.discord.release_webhook_url.as_deref() {
        if already_delivered.contains(&Channel::Discord) {
            report.skip(Channel::Discord);
        } else {
            let message = templates::discord_release(
                release,
                &config.spotify.artist_name,
                config.discord.role_id.as_deref(),
                announcement,
            );
            report.record(
                Channel::Discord,
                execute_webhook(&ctx.http, webhook_url, &message).await,
            );
        }
    }

    if let Some(telegram) = &config.telegram {
        if already_delivered.contains(&Channel::Telegram) {
            report.skip(Channel::Telegram);
        } else {
            report.record(
                Channel::Telegram,
                send_telegram_release(ctx, telegram, release).await,
            );
        }
    }

    report
}

async fn send_telegram_release(
    ctx: &AppContext,
    telegram: &TelegramConfig,
    release: &Release,
) -> Result<(), BotApiError> {
    let text = templates::telegram_release(release, &ctx.config.spotify.artist_name);
    let button = InlineKeyboardMarkup::url_button(LISTEN_BUTTON, &release.url);

    match (telegram.photo_announcements, release.cover_url.as_deref()) {
        (true, Some(cover_url)) => {
            let photo = SendPhoto::new(telegram.chat_id.clone(), cover_url).with_markdown_caption(text);
            send_photo(&ctx.http, &telegram.bot, &photo).await?;

            let follow_up = SendMessage::new(telegram.chat_id.clone(), LISTEN_PROMPT).with_markup(button);
            send_message(&ctx.http, &telegram.bot, &follow_up).await?;
        }
        _ => {
            let message = SendMessage::new(telegram.chat_id.clone(), text)
                .markdown()
                .with_markup(button);
            send_message(&ctx.http, &telegram.bot, &message).await?;
        }
    }

    Ok(())
}

pub async fn announce_playlist_added(
    ctx: &AppContext,
    playlist_id: &str,
    name: &str,
    followers: u64,
    cover_url: Option<&str>,
) -> DeliveryReport {
    let message = templates::discord_playlist_added(playlist_id, name, followers, cover_url);
    send_playlist_notice(ctx, &message).await
}

pub async fn announce_milestone(
    ctx: &AppContext,
    playlist_id: &str,
    name: &str,
    milestone: u64,
    followers: u64,
) -> DeliveryReport {
    let message = templates::discord_milestone(playlist_id, name, milestone, followers);
    send_playlist_notice(ctx, &message).await
}

async fn send_playlist_notice(ctx: &AppContext, message: &WebhookMessage) -> DeliveryReport {
    let mut report = DeliveryReport::default();
    match ctx.config.discord.playlist_webhook() {
        Some(webhook_url) => report.record(
            Channel::Discord,
            execute_webhook(&ctx.http, webhook_url, message).await,
        ),
        None => warn!("No Discord webhook configured for playlist notices"),
    }
    report
}

/// Plain text to the configured owner chat.
pub async fn send_owner_text(ctx: &AppContext, text: &str) -> Result<(), BotApiError> {
    let Some(telegram) = &ctx.config.telegram else {
        return Ok(());
    };
    let message = SendMessage::new(telegram.chat_id.clone(), text).markdown();
    send_message(&ctx.http, &telegram.bot, &message).await?;
    Ok(())
}

/// Best-effort answer to a command; failures are only logged.
pub async fn reply(ctx: &AppContext, chat_id: ChatId, text: &str) {
    let Some(telegram) = &ctx.config.telegram else {
        return;
    };
    let message = SendMessage::new(chat_id.clone(), text);
    if let Err(err) = send_message(&ctx.http, &telegram.bot, &message).await {
        warn!(%chat_id, error = %err, "Could not reply to command");
    }
}
