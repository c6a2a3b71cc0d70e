use std::path::PathBuf;

use clap::Parser;
use projects_release_notifier::{
    config::{Config, ConfigError},
    context::{AppContext, BuildContextError},
    runner::{self, RunError},
    state::StateStore,
    tasks::Task,
};
use thiserror::Error;
use tracing::info;

/// Announces new Spotify releases and playlist milestones on Discord and Telegram.
#[derive(Debug, Parser)]
#[command(name = "release_notifier", version)]
struct Cli {
    /// Tasks to run; all of them when omitted
    #[arg(value_enum)]
    tasks: Vec<Task>,

    /// Keep polling instead of running once
    #[arg(long)]
    watch: bool,

    /// Polling interval for --watch, overrides POLL_INTERVAL_SECS
    #[arg(long)]
    interval_secs: Option<u64>,

    /// State file, overrides STATE_FILE
    #[arg(long)]
    state_file: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum MainError {
    #[error("LoadConfig: {source}")]
    LoadConfig {
        #[source]
        source: ConfigError,
    },
    #[error("TracingInit: {source}")]
    TracingInit {
        #[source]
        source: utils_trace::TracingInitError,
    },
    #[error("BuildContext: {source}")]
    BuildContext {
        #[source]
        source: BuildContextError,
    },
    #[error("Run: {source}")]
    Run {
        #[source]
        source: RunError,
    },
}

#[tokio::main]
async fn main() -> Result<(), MainError> {
    let cli = Cli::parse();

    let mut config = Config::from_env().map_err(|source| MainError::LoadConfig { source })?;
    utils_trace::init(&config.log_level, config.log_format)
        .map_err(|source| MainError::TracingInit { source })?;

    if let Some(secs) = cli.interval_secs {
        config.poll_interval = std::time::Duration::from_secs(secs.max(1));
    }
    if let Some(path) = cli.state_file {
        config.state_file = path;
    }
    info!(config = ?config.redacted(), "Loaded configuration");

    let store = StateStore::new(config.state_file.clone());
    let ctx = AppContext::new(config).map_err(|source| MainError::BuildContext { source })?;
    let tasks = Task::plan(&cli.tasks);

    if cli.watch {
        runner::watch(&ctx, &store, &tasks, ctx.config.poll_interval).await;
        return Ok(());
    }

    let summary = runner::run_once(&ctx, &store, &tasks)
        .await
        .map_err(|source| MainError::Run { source })?;
    info!(?summary, "Run complete");

    Ok(())
}
