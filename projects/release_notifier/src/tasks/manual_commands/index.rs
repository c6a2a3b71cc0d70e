use interfaces_spotify_catalog::{
    fetch_album, fetch_playlist, fetch_track, AccessToken, CatalogRequestError,
    FetchAccessTokenError,
};
use interfaces_telegram_bot::{get_updates, BotApiError, ChatId};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::context::AppContext;
use crate::links::{parse_catalog_link, LinkKind};
use crate::notify::{announce_playlist_added, announce_release, reply, send_owner_text, Announcement};
use crate::release::Release;
use crate::state::{SeenState, TrackedPlaylist};
use crate::tasks::manual_commands::parse::{parse_command, Command, ParseOutcome};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandReport {
    pub updates: usize,
    /// Release ids promoted through `/release`.
    pub announced: Vec<String>,
    /// Playlist ids added through `/playlist`.
    pub playlists_added: Vec<String>,
    /// Commands ignored for a wrong code or wrong arity.
    pub rejected: usize,
    /// Commands dropped after a catalog error that retrying cannot fix.
    pub failed: usize,
}

#[derive(Debug, Error)]
pub enum ManualCommandsError {
    #[error("GetUpdates: {source}")]
    GetUpdates { source: BotApiError },

    #[error("FetchAccessToken: {source}")]
    FetchAccessToken {
        #[from]
        source: FetchAccessTokenError,
    },

    #[error("CatalogLookup: {source}")]
    CatalogLookup {
        #[from]
        source: CatalogRequestError,
    },
}

/// Consumes pending bot updates. The stored offset only moves past an update
/// once it has been handled or has failed for good; transient catalog or
/// token failures stop the batch so that update is retried next run.
#[instrument(skip_all)]
pub async fn process_manual_commands(
    ctx: &AppContext,
    state: &mut SeenState,
) -> Result<CommandReport, ManualCommandsError> {
    let (Some(telegram), Some(code)) = (&ctx.config.telegram, ctx.config.promo_code.as_deref())
    else {
        info!("Manual commands disabled (Telegram or PROMO_CODE not configured)");
        return Ok(CommandReport::default());
    };

    let updates = get_updates(&ctx.http, &telegram.bot, state.telegram.update_offset)
        .await
        .map_err(|source| ManualCommandsError::GetUpdates { source })?;

    let mut session = Session {
        ctx,
        code,
        token: None,
        report: CommandReport {
            updates: updates.len(),
            ..CommandReport::default()
        },
    };

    for update in &updates {
        let message = update.effective_message();
        if let Some((chat_id, text)) =
            message.and_then(|m| m.text.as_deref().map(|text| (ChatId::Id(m.chat.id), text)))
        {
            match session.handle(state, chat_id.clone(), text).await {
                Ok(()) => {}
                Err(ManualCommandsError::CatalogLookup { source }) if !source.is_transient() => {
                    warn!(update_id = update.update_id, error = %source, "Dropping command after catalog error");
                    session.report.failed += 1;
                    reply(ctx, chat_id, "❌ Error while adding!").await;
                }
                Err(err) => return Err(err),
            }
        }
        state.telegram.advance_past(update.update_id);
    }

    Ok(session.report)
}

struct Session<'a> {
    ctx: &'a AppContext,
    code: &'a str,
    token: Option<AccessToken>,
    report: CommandReport,
}

impl Session<'_> {
    async fn handle(
        &mut self,
        state: &mut SeenState,
        chat_id: ChatId,
        text: &str,
    ) -> Result<(), ManualCommandsError> {
        let command = match parse_command(text, self.code) {
            ParseOutcome::NotACommand => return Ok(()),
            ParseOutcome::Malformed { command } => {
                warn!(%chat_id, command, "Ignoring malformed command");
                self.report.rejected += 1;
                return Ok(());
            }
            ParseOutcome::WrongCode { command } => {
                warn!(%chat_id, command, "Ignoring command with wrong code");
                self.report.rejected += 1;
                return Ok(());
            }
            ParseOutcome::Accepted(command) => command,
        };

        let token = match &self.token {
            Some(token) => token.clone(),
            None => {
                let token = self.ctx.access_token().await?;
                self.token = Some(token.clone());
                token
            }
        };

        match command {
            Command::Release { link } => self.promote_release(state, &token, chat_id, &link).await?,
            Command::Playlist { link } => self.track_playlist(state, &token, chat_id, &link).await?,
        }
        Ok(())
    }

    async fn promote_release(
        &mut self,
        state: &mut SeenState,
        token: &AccessToken,
        chat_id: ChatId,
        link: &str,
    ) -> Result<(), CatalogRequestError> {
        let ctx = self.ctx;
        let endpoints = &ctx.config.spotify.endpoints;

        let Some(link) = parse_catalog_link(link) else {
            reply(ctx, chat_id, "❌ Invalid link!").await;
            return Ok(());
        };

        let release = match link.kind {
            Some(LinkKind::Track) => fetch_track(&ctx.http, endpoints, token, &link.id)
                .await?
                .map(Release::from),
            None | Some(LinkKind::Album) => fetch_album(&ctx.http, endpoints, token, &link.id)
                .await?
                .map(Release::from),
            Some(LinkKind::Playlist | LinkKind::Artist) => {
                reply(ctx, chat_id, "❌ Only album or track links can be announced!").await;
                return Ok(());
            }
        };

        let Some(release) = release else {
            reply(ctx, chat_id, "❌ Release not found!").await;
            return Ok(());
        };

        if state.releases.is_seen(&release) {
            reply(ctx, chat_id, "⚠️ Release was already announced!").await;
            return Ok(());
        }

        let already_delivered = state.releases.delivered_to(&release.id).to_vec();
        let delivery =
            announce_release(ctx, &release, Announcement::Promoted, &already_delivered).await;
        if delivery.is_complete() {
            info!(id = %release.id, name = %release.name, "Promoted release announced");
            state.releases.record_promoted(&release);
            self.report.announced.push(release.id);
            reply(ctx, chat_id, "✅ Release announced!").await;
        } else {
            if !delivery.delivered.is_empty() {
                state.releases.record_partial(&release.id, &delivery.delivered);
            }
            reply(ctx, chat_id, "❌ Announcement failed, try again later.").await;
        }
        Ok(())
    }

    async fn track_playlist(
        &mut self,
        state: &mut SeenState,
        token: &AccessToken,
        chat_id: ChatId,
        link: &str,
    ) -> Result<(), CatalogRequestError> {
        let ctx = self.ctx;

        let Some(link) = parse_catalog_link(link)
            .filter(|link| matches!(link.kind, None | Some(LinkKind::Playlist)))
        else {
            reply(ctx, chat_id, "❌ Invalid playlist!").await;
            return Ok(());
        };

        if state.playlists.contains_key(&link.id) {
            reply(ctx, chat_id, "⚠️ Playlist is already tracked!").await;
            return Ok(());
        }

        let Some(playlist) =
            fetch_playlist(&ctx.http, &ctx.config.spotify.endpoints, token, &link.id).await?
        else {
            reply(ctx, chat_id, "❌ Invalid playlist!").await;
            return Ok(());
        };

        let followers = playlist.followers.total;
        let mut tracked = TrackedPlaylist::new(&playlist.name, followers);
        let delivery = announce_playlist_added(
            ctx,
            &link.id,
            &playlist.name,
            followers,
            playlist.cover_url(),
        )
        .await;
        tracked.added_notification_sent = delivery.is_complete();

        info!(playlist_id = %link.id, name = %playlist.name, followers, "Playlist added to tracking");
        state.playlists.insert(link.id.clone(), tracked);
        self.report.playlists_added.push(link.id);

        if let Err(err) = send_owner_text(ctx, "✅ Playlist added to tracking!").await {
            warn!(error = %err, "Could not confirm playlist to owner chat");
        }
        Ok(())
    }
}
