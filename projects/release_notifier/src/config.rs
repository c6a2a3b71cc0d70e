use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use interfaces_spotify_catalog::endpoints::{DEFAULT_ACCOUNTS_URL, DEFAULT_API_URL};
use interfaces_spotify_catalog::CatalogEndpoints;
use interfaces_telegram_bot::{BotApi, ChatId};
use serde::Deserialize;
use thiserror::Error;
use utils_trace::{LogFormat, ParseLogFormatError};

/// Raw environment, one field per variable (`artist_id` <- `ARTIST_ID`).
#[derive(Debug, Deserialize)]
pub struct Settings {
    pub spotify_client_id: Option<String>,
    pub spotify_client_secret: Option<String>,
    #[serde(default = "default_artist_id")]
    pub artist_id: String,
    #[serde(default = "default_artist_name")]
    pub artist_name: String,

    pub discord_webhook_url: Option<String>,
    pub discord_playlist_webhook_url: Option<String>,
    pub discord_role_id: Option<String>,

    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,
    pub telegram_photo_announcements: Option<String>,

    pub promo_code: Option<String>,
    pub daily_message: Option<String>,
    pub milestones: Option<String>,

    pub state_file: Option<String>,
    pub poll_interval_secs: Option<String>,
    pub http_timeout_secs: Option<String>,

    pub log_level: Option<String>,
    pub log_format: Option<String>,

    #[serde(default = "default_spotify_accounts_url")]
    pub spotify_accounts_url: String,
    #[serde(default = "default_spotify_api_url")]
    pub spotify_api_url: String,
    #[serde(default = "default_telegram_api_url")]
    pub telegram_api_url: String,
}

fn default_artist_id() -> String {
    "4pqIwzgTlrlpRqHvWvNtVd".to_string()
}

fn default_artist_name() -> String {
    "Surreal.wav".to_string()
}

const DEFAULT_MILESTONES: [u64; 5] = [1000, 5000, 10000, 25000, 50000];
const DEFAULT_STATE_FILE: &str = "notifier-state.json";
const DEFAULT_POLL_INTERVAL_SECS: u64 = 300;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOG_LEVEL: &str = "info";

fn default_spotify_accounts_url() -> String {
    DEFAULT_ACCOUNTS_URL.to_string()
}

fn default_spotify_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_telegram_api_url() -> String {
    interfaces_telegram_bot::DEFAULT_API_URL.to_string()
}

#[derive(Clone)]
pub struct SpotifyConfig {
    pub client_id: String,
    pub client_secret: String,
    pub endpoints: CatalogEndpoints,
    pub artist_id: String,
    pub artist_name: String,
}

#[derive(Clone, Default)]
pub struct DiscordConfig {
    pub release_webhook_url: Option<String>,
    pub playlist_webhook_url: Option<String>,
    pub role_id: Option<String>,
}

impl DiscordConfig {
    /// Playlist notices fall back to the release webhook.
    pub fn playlist_webhook(&self) -> Option<&str> {
        self.playlist_webhook_url
            .as_deref()
            .or(self.release_webhook_url.as_deref())
    }
}

#[derive(Clone)]
pub struct TelegramConfig {
    pub bot: BotApi,
    pub chat_id: ChatId,
    pub photo_announcements: bool,
}

#[derive(Clone)]
pub struct Config {
    pub spotify: SpotifyConfig,
    pub discord: DiscordConfig,
    pub telegram: Option<TelegramConfig>,
    pub promo_code: Option<String>,
    pub daily_message: Option<String>,
    pub milestones: Vec<u64>,
    pub state_file: PathBuf,
    pub poll_interval: Duration,
    pub http_timeout: Duration,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Config {
    /// Reads `.env` (if any) and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let settings: Settings =
            envy::from_env().map_err(|source| ConfigError::ReadEnvironment { source })?;
        Self::from_settings(settings)
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let settings: Settings =
            envy::from_iter(vars).map_err(|source| ConfigError::ReadEnvironment { source })?;
        Self::from_settings(settings)
    }

    pub fn from_settings(settings: Settings) -> Result<Self, ConfigError> {
        let client_id = non_empty(settings.spotify_client_id).ok_or(ConfigError::MissingVariable {
            name: "SPOTIFY_CLIENT_ID",
        })?;
        let client_secret =
            non_empty(settings.spotify_client_secret).ok_or(ConfigError::MissingVariable {
                name: "SPOTIFY_CLIENT_SECRET",
            })?;

        let discord = DiscordConfig {
            release_webhook_url: non_empty(settings.discord_webhook_url),
            playlist_webhook_url: non_empty(settings.discord_playlist_webhook_url),
            role_id: non_empty(settings.discord_role_id),
        };

        let telegram = match (
            non_empty(settings.telegram_bot_token),
            non_empty(settings.telegram_chat_id),
        ) {
            (Some(token), Some(chat_id)) => Some(TelegramConfig {
                bot: BotApi::new(&settings.telegram_api_url, &token),
                chat_id: chat_id.parse().unwrap_or(ChatId::Username(chat_id)),
                photo_announcements: parse_flag(
                    "TELEGRAM_PHOTO_ANNOUNCEMENTS",
                    settings.telegram_photo_announcements,
                )?,
            }),
            (None, None) => None,
            _ => return Err(ConfigError::IncompleteTelegram),
        };

        if discord.release_webhook_url.is_none() && telegram.is_none() {
            return Err(ConfigError::NoNotificationChannel);
        }

        let log_format = match non_empty(settings.log_format) {
            Some(value) => value.parse()?,
            None => LogFormat::default(),
        };

        let mut milestones = match non_empty(settings.milestones) {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(|item| {
                    item.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                        name: "MILESTONES",
                        value: list.clone(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => DEFAULT_MILESTONES.to_vec(),
        };
        milestones.sort_unstable();
        milestones.dedup();

        let poll_interval_secs = parse_number(
            "POLL_INTERVAL_SECS",
            settings.poll_interval_secs,
            DEFAULT_POLL_INTERVAL_SECS,
        )?;
        let http_timeout_secs = parse_number(
            "HTTP_TIMEOUT_SECS",
            settings.http_timeout_secs,
            DEFAULT_HTTP_TIMEOUT_SECS,
        )?;

        Ok(Self {
            spotify: SpotifyConfig {
                client_id,
                client_secret,
                endpoints: CatalogEndpoints::new(
                    &settings.spotify_accounts_url,
                    &settings.spotify_api_url,
                ),
                artist_id: settings.artist_id,
                artist_name: settings.artist_name,
            },
            discord,
            telegram,
            promo_code: non_empty(settings.promo_code),
            daily_message: non_empty(settings.daily_message),
            milestones,
            state_file: non_empty(settings.state_file)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE)),
            poll_interval: Duration::from_secs(poll_interval_secs.max(1)),
            http_timeout: Duration::from_secs(http_timeout_secs),
            log_level: non_empty(settings.log_level)
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            log_format,
        })
    }

    pub fn redacted(&self) -> Redacted<'_> {
        Redacted(self)
    }
}

// Unset GitHub secrets arrive as empty strings.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_number(
    name: &'static str,
    value: Option<String>,
    default: u64,
) -> Result<u64, ConfigError> {
    match non_empty(value) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        None => Ok(default),
    }
}

fn parse_flag(name: &'static str, value: Option<String>) -> Result<bool, ConfigError> {
    let Some(value) = non_empty(value) else {
        return Ok(false);
    };
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue { name, value }),
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ReadEnvironment: {source}")]
    ReadEnvironment { source: envy::Error },

    #[error("MissingVariable: {name} must be set")]
    MissingVariable { name: &'static str },

    #[error("InvalidValue: {name}={value:?}")]
    InvalidValue { name: &'static str, value: String },

    #[error("IncompleteTelegram: TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID must be set together")]
    IncompleteTelegram,

    #[error("NoNotificationChannel: set DISCORD_WEBHOOK_URL or TELEGRAM_BOT_TOKEN/TELEGRAM_CHAT_ID")]
    NoNotificationChannel,

    #[error("InvalidLogFormat: {source}")]
    InvalidLogFormat {
        #[from]
        source: ParseLogFormatError,
    },
}

pub struct Redacted<'a>(&'a Config);

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.0;
        f.debug_struct("Config")
            .field("client_id", &mask(&c.spotify.client_id))
            .field("client_secret", &"***")
            .field("endpoints", &c.spotify.endpoints)
            .field("artist_id", &c.spotify.artist_id)
            .field("artist_name", &c.spotify.artist_name)
            .field("discord_webhook", &c.discord.release_webhook_url.is_some())
            .field("discord_playlist_webhook", &c.discord.playlist_webhook_url.is_some())
            .field("discord_role_id", &c.discord.role_id)
            .field("telegram", &c.telegram.as_ref().map(|t| t.chat_id.to_string()))
            .field("promo_code", &c.promo_code.as_ref().map(|_| "***"))
            .field("daily_message", &c.daily_message.is_some())
            .field("milestones", &c.milestones)
            .field("state_file", &c.state_file)
            .field("poll_interval_secs", &c.poll_interval.as_secs())
            .field("http_timeout_secs", &c.http_timeout.as_secs())
            .finish()
    }
}

fn mask(s: &str) -> String {
    if s.chars().count() <= 6 {
        "***".into()
    } else {
        format!("{}***", s.chars().take(3).collect::<String>())
    }
}
