use reqwest::{Client, StatusCode};
use serde::Serialize;
use thiserror::Error;

pub const COLOR_RED: u32 = 16711680;
pub const COLOR_GREEN: u32 = 5763719;
pub const COLOR_GOLD: u32 = 15844367;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookMessage {
    pub content: String,
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedThumbnail>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedThumbnail {
    pub url: String,
}

impl Embed {
    pub fn new(title: impl Into<String>, description: impl Into<String>, color: u32) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            color,
            thumbnail: None,
        }
    }

    pub fn with_thumbnail(mut self, url: Option<&str>) -> Self {
        self.thumbnail = url.map(|url| EmbedThumbnail {
            url: url.to_string(),
        });
        self
    }
}

/// Role mention understood by Discord, `<@&id>`.
pub fn role_mention(role_id: &str) -> String {
    format!("<@&{role_id}>")
}

pub async fn execute_webhook(
    client: &Client,
    webhook_url: &str,
    message: &WebhookMessage,
) -> Result<(), ExecuteWebhookError> {
    let response = client
        .post(webhook_url)
        .json(message)
        .send()
        .await
        .map_err(|source| ExecuteWebhookError::RequestSend { source })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ExecuteWebhookError::Rejected { status, body });
    }

    Ok(())
}

#[derive(Debug, Error)]
pub enum ExecuteWebhookError {
    #[error("RequestSend: {source}")]
    RequestSend { source: reqwest::Error },

    #[error("Rejected: webhook answered {status}: {body}")]
    Rejected { status: StatusCode, body: String },
}
