use std::future::Future;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use thiserror::Error;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::context::AppContext;
use crate::state::{SaveStateError, StateStore};
use crate::tasks::daily_checkin::{send_daily_check_in, CheckInOutcome, DailyCheckInError};
use crate::tasks::manual_commands::{process_manual_commands, CommandReport, ManualCommandsError};
use crate::tasks::playlist_milestones::{
    check_playlist_milestones, MilestoneReport, PlaylistMilestonesError,
};
use crate::tasks::release_check::{check_for_new_release, ReleaseCheckError, ReleaseOutcome};
use crate::tasks::Task;

/// What each executed task reported; `None` for tasks not run or failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub commands: Option<CommandReport>,
    pub release: Option<ReleaseOutcome>,
    pub playlists: Option<MilestoneReport>,
    pub check_in: Option<CheckInOutcome>,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("ManualCommands: {source}")]
    ManualCommands {
        #[from]
        source: ManualCommandsError,
    },

    #[error("ReleaseCheck: {source}")]
    ReleaseCheck {
        #[from]
        source: ReleaseCheckError,
    },

    #[error("PlaylistMilestones: {source}")]
    PlaylistMilestones {
        #[from]
        source: PlaylistMilestonesError,
    },

    #[error("DailyCheckIn: {source}")]
    DailyCheckIn {
        #[from]
        source: DailyCheckInError,
    },

    #[error("SaveState: {source}")]
    SaveState {
        #[from]
        source: SaveStateError,
    },
}

pub async fn run_once(
    ctx: &AppContext,
    store: &StateStore,
    tasks: &[Task],
) -> Result<RunSummary, RunError> {
    run_once_on(ctx, store, tasks, Utc::now().date_naive()).await
}

/// Loads state, runs `tasks` in order, and writes state back if it changed.
/// A failing task does not stop the later ones; the first error is returned
/// after the state has been saved.
pub async fn run_once_on(
    ctx: &AppContext,
    store: &StateStore,
    tasks: &[Task],
    today: NaiveDate,
) -> Result<RunSummary, RunError> {
    let loaded = store.load();
    let mut state = loaded.clone();
    let mut summary = RunSummary::default();
    let mut first_error: Option<RunError> = None;

    for task in Task::plan(tasks) {
        let result = match task {
            Task::Commands => process_manual_commands(ctx, &mut state)
                .await
                .map(|report| summary.commands = Some(report))
                .map_err(RunError::from),
            Task::Release => check_for_new_release(ctx, &mut state)
                .await
                .map(|outcome| summary.release = Some(outcome))
                .map_err(RunError::from),
            Task::Playlists => check_playlist_milestones(ctx, &mut state)
                .await
                .map(|report| summary.playlists = Some(report))
                .map_err(RunError::from),
            Task::Checkin => send_daily_check_in(ctx, &mut state, today)
                .await
                .map(|outcome| summary.check_in = Some(outcome))
                .map_err(RunError::from),
        };

        if let Err(err) = result {
            error!(?task, error = %err, "Task failed");
            first_error.get_or_insert(err);
        }
    }

    if state != loaded {
        store.save(&state)?;
    } else {
        debug!("State unchanged");
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(summary),
    }
}

/// In-process polling until Ctrl-C. Run errors are logged, not fatal.
pub async fn watch(ctx: &AppContext, store: &StateStore, tasks: &[Task], every: Duration) {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "Cannot listen for Ctrl-C");
        }
    };
    watch_until(ctx, store, tasks, every, ctrl_c).await;
}

/// Polls until `shutdown` resolves. The future is polled across iterations,
/// so a shutdown requested during a run ends the loop once that run is done.
pub async fn watch_until<F>(
    ctx: &AppContext,
    store: &StateStore,
    tasks: &[Task],
    every: Duration,
    shutdown: F,
) where
    F: Future<Output = ()>,
{
    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    info!(interval_secs = every.as_secs(), "Watching for changes");

    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => {
                info!("Shutting down");
                break;
            }
            _ = ticker.tick() => {
                match run_once(ctx, store, tasks).await {
                    Ok(summary) => info!(?summary, "Run complete"),
                    Err(err) => error!(error = %err, "Run failed"),
                }
            }
        }
    }
}
