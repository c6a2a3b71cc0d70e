use interfaces_spotify_catalog::{fetch_latest_release, CatalogRequestError, FetchAccessTokenError};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::context::AppContext;
use crate::notify::{announce_release, Announcement, DeliveryReport};
use crate::release::Release;
use crate::state::SeenState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// The artist has no releases.
    NoRelease,
    AlreadyNotified { release: Release },
    Notified { release: Release, report: DeliveryReport },
    /// Marker left untouched, the next run retries the channels that refused.
    DeliveryFailed { release: Release, report: DeliveryReport },
}

#[derive(Debug, Error)]
pub enum ReleaseCheckError {
    #[error("FetchAccessToken: {source}")]
    FetchAccessToken {
        #[from]
        source: FetchAccessTokenError,
    },

    #[error("FetchLatestRelease: {source}")]
    FetchLatestRelease {
        #[from]
        source: CatalogRequestError,
    },
}

#[instrument(skip_all, fields(artist_id = %ctx.config.spotify.artist_id))]
pub async fn check_for_new_release(
    ctx: &AppContext,
    state: &mut SeenState,
) -> Result<ReleaseOutcome, ReleaseCheckError> {
    let spotify = &ctx.config.spotify;
    let token = ctx.access_token().await?;

    let Some(album) =
        fetch_latest_release(&ctx.http, &spotify.endpoints, &token, &spotify.artist_id).await?
    else {
        info!("No release found");
        return Ok(ReleaseOutcome::NoRelease);
    };

    let release = Release::from(album);
    if state.releases.is_seen(&release) {
        info!(name = %release.name, "Latest release already announced");
        return Ok(ReleaseOutcome::AlreadyNotified { release });
    }

    info!(id = %release.id, name = %release.name, "New release detected");
    let already_delivered = state.releases.delivered_to(&release.id).to_vec();
    let report = announce_release(ctx, &release, Announcement::Detected, &already_delivered).await;

    if report.is_complete() {
        state.releases.record_detected(&release);
        Ok(ReleaseOutcome::Notified { release, report })
    } else {
        warn!(name = %release.name, failed = report.failed.len(), "Release not recorded, delivery incomplete");
        if !report.delivered.is_empty() {
            state.releases.record_partial(&release.id, &report.delivered);
        }
        Ok(ReleaseOutcome::DeliveryFailed { release, report })
    }
}
