use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::api::BotApi;
use crate::models::{Message, SendMessage, SendPhoto, Update};

#[derive(Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Serialize)]
struct GetUpdates<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<i64>,
    timeout: u32,
    allowed_updates: &'a [&'a str],
}

/// Pending updates. Passing `offset` confirms everything below it.
pub async fn get_updates(
    client: &Client,
    bot: &BotApi,
    offset: Option<i64>,
) -> Result<Vec<Update>, BotApiError> {
    let body = GetUpdates {
        offset,
        timeout: 0,
        allowed_updates: &["message", "channel_post"],
    };
    let updates: Vec<Update> = call(client, bot, "getUpdates", &body).await?;
    debug!(count = updates.len(), ?offset, "Fetched bot updates");
    Ok(updates)
}

pub async fn send_message(
    client: &Client,
    bot: &BotApi,
    request: &SendMessage,
) -> Result<Message, BotApiError> {
    call(client, bot, "sendMessage", request).await
}

pub async fn send_photo(
    client: &Client,
    bot: &BotApi,
    request: &SendPhoto,
) -> Result<Message, BotApiError> {
    call(client, bot, "sendPhoto", request).await
}

async fn call<B, T>(
    client: &Client,
    bot: &BotApi,
    method: &'static str,
    body: &B,
) -> Result<T, BotApiError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    // reqwest errors carry the URL, which embeds the bot token
    let response = client
        .post(bot.method_url(method))
        .json(body)
        .send()
        .await
        .map_err(|source| BotApiError::RequestSend {
            method,
            source: source.without_url(),
        })?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|source| BotApiError::ResponseRead {
            method,
            source: source.without_url(),
        })?;

    let envelope: ApiResponse<T> = match serde_json::from_str(&text) {
        Ok(envelope) => envelope,
        Err(_) if !status.is_success() => {
            return Err(BotApiError::Rejected {
                method,
                status,
                body: text,
            })
        }
        Err(source) => return Err(BotApiError::DeserializeResponseBody { method, source }),
    };

    if !envelope.ok {
        return Err(BotApiError::Api {
            method,
            description: envelope.description.unwrap_or_default(),
        });
    }

    envelope
        .result
        .ok_or(BotApiError::MissingResult { method })
}

#[derive(Debug, Error)]
pub enum BotApiError {
    #[error("RequestSend ({method}): {source}")]
    RequestSend {
        method: &'static str,
        source: reqwest::Error,
    },

    #[error("ResponseRead ({method}): {source}")]
    ResponseRead {
        method: &'static str,
        source: reqwest::Error,
    },

    #[error("Rejected ({method}): {status}: {body}")]
    Rejected {
        method: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("DeserializeResponseBody ({method}): {source}")]
    DeserializeResponseBody {
        method: &'static str,
        source: serde_json::Error,
    },

    #[error("Api ({method}): {description}")]
    Api {
        method: &'static str,
        description: String,
    },

    #[error("MissingResult ({method})")]
    MissingResult { method: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_error_envelope() {
        let envelope: ApiResponse<Vec<Update>> = serde_json::from_str(
            r#"{"ok": false, "error_code": 401, "description": "Unauthorized"}"#,
        )
        .unwrap();
        assert!(!envelope.ok);
        assert!(envelope.result.is_none());
        assert_eq!(envelope.description.as_deref(), Some("Unauthorized"));
    }

    #[test]
    fn get_updates_body_skips_missing_offset() {
        let body = GetUpdates {
            offset: None,
            timeout: 0,
            allowed_updates: &["message"],
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"timeout":0,"allowed_updates":["message"]}"#
        );
    }
}
