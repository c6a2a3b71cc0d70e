use interfaces_spotify_catalog::{fetch_playlist, FetchAccessTokenError};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::context::AppContext;
use crate::notify::{announce_milestone, announce_playlist_added};
use crate::state::SeenState;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MilestoneReport {
    pub checked: usize,
    /// (playlist id, milestone) pairs announced this run.
    pub announced: Vec<(String, u64)>,
    /// Playlists whose "playlist added" notice went out late.
    pub added_announced: Vec<String>,
    /// Playlists the catalog no longer returns, or that failed to load.
    pub skipped: Vec<String>,
}

#[derive(Debug, Error)]
pub enum PlaylistMilestonesError {
    #[error("FetchAccessToken: {source}")]
    FetchAccessToken {
        #[from]
        source: FetchAccessTokenError,
    },
}

#[instrument(skip_all, fields(tracked = state.playlists.len()))]
pub async fn check_playlist_milestones(
    ctx: &AppContext,
    state: &mut SeenState,
) -> Result<MilestoneReport, PlaylistMilestonesError> {
    let mut report = MilestoneReport::default();
    if state.playlists.is_empty() {
        info!("No playlists tracked");
        return Ok(report);
    }

    let token = ctx.access_token().await?;
    let endpoints = &ctx.config.spotify.endpoints;

    for (playlist_id, tracked) in state.playlists.iter_mut() {
        let playlist = match fetch_playlist(&ctx.http, endpoints, &token, playlist_id).await {
            Ok(Some(playlist)) => playlist,
            Ok(None) => {
                warn!(%playlist_id, "Tracked playlist no longer available");
                report.skipped.push(playlist_id.clone());
                continue;
            }
            Err(err) => {
                warn!(%playlist_id, error = %err, "Could not fetch tracked playlist");
                report.skipped.push(playlist_id.clone());
                continue;
            }
        };

        report.checked += 1;
        let followers = playlist.followers.total;

        if !tracked.added_notification_sent {
            let delivery = announce_playlist_added(
                ctx,
                playlist_id,
                &playlist.name,
                followers,
                playlist.cover_url(),
            )
            .await;
            if delivery.is_complete() {
                info!(%playlist_id, "Late playlist-added notice sent");
                tracked.added_notification_sent = true;
                report.added_announced.push(playlist_id.clone());
            }
        }

        for milestone in tracked.pending_milestones(&ctx.config.milestones, followers) {
            let delivery =
                announce_milestone(ctx, playlist_id, &playlist.name, milestone, followers).await;
            if delivery.is_complete() {
                info!(%playlist_id, milestone, "Milestone announced");
                tracked.mark_reached(milestone);
                report.announced.push((playlist_id.clone(), milestone));
            }
        }

        tracked.name = playlist.name;
        tracked.current_followers = followers;
    }

    Ok(report)
}
