//! Spotify release and playlist notifier
//!
//! - catalog, Discord and Telegram clients live in `interfaces/`
//! - `state/` persists what has already been announced
//! - `tasks/` holds the individual checks, `runner` sequences them
//! - Requires SPOTIFY_CLIENT_ID / SPOTIFY_CLIENT_SECRET and at least one notification channel

pub mod config;
pub mod context;
pub mod links;
pub mod notify;
pub mod release;
pub mod runner;
pub mod state;
pub mod tasks;
