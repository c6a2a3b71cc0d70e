use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Numeric chat id or `@channelusername`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatId {
    Id(i64),
    Username(String),
}

impl FromStr for ChatId {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        Ok(match value.parse::<i64>() {
            Ok(id) => ChatId::Id(id),
            Err(_) => ChatId::Username(value.to_string()),
        })
    }
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        ChatId::Id(id)
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatId::Id(id) => write!(f, "{id}"),
            ChatId::Username(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub channel_post: Option<Message>,
}

impl Update {
    pub fn effective_message(&self) -> Option<&Message> {
        self.message.as_ref().or(self.channel_post.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseMode {
    Markdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

impl InlineKeyboardMarkup {
    /// A single row holding one URL button.
    pub fn url_button(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            inline_keyboard: vec![vec![InlineKeyboardButton {
                text: text.into(),
                url: url.into(),
            }]],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendMessage {
    pub chat_id: ChatId,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl SendMessage {
    pub fn new(chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            parse_mode: None,
            reply_markup: None,
        }
    }

    pub fn markdown(mut self) -> Self {
        self.parse_mode = Some(ParseMode::Markdown);
        self
    }

    pub fn with_markup(mut self, markup: InlineKeyboardMarkup) -> Self {
        self.reply_markup = Some(markup);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendPhoto {
    pub chat_id: ChatId,
    pub photo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl SendPhoto {
    pub fn new(chat_id: ChatId, photo: impl Into<String>) -> Self {
        Self {
            chat_id,
            photo: photo.into(),
            caption: None,
            parse_mode: None,
            reply_markup: None,
        }
    }

    pub fn with_markdown_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self.parse_mode = Some(ParseMode::Markdown);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_chat_ids() {
        assert_eq!("-1001234".parse::<ChatId>().unwrap(), ChatId::Id(-1001234));
        assert_eq!(
            "@surrealwav".parse::<ChatId>().unwrap(),
            ChatId::Username("@surrealwav".into())
        );
    }

    #[test]
    fn serializes_send_message_with_button() {
        let request = SendMessage::new(ChatId::Id(42), "*hi*")
            .markdown()
            .with_markup(InlineKeyboardMarkup::url_button("Open", "https://example.com"));
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "chat_id": 42,
                "text": "*hi*",
                "parse_mode": "Markdown",
                "reply_markup": {"inline_keyboard": [[{"text": "Open", "url": "https://example.com"}]]}
            })
        );
    }

    #[test]
    fn serializes_username_chat_as_string() {
        let request = SendPhoto::new(ChatId::Username("@chan".into()), "https://i.scdn.co/x");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"chat_id": "@chan", "photo": "https://i.scdn.co/x"})
        );
    }

    #[test]
    fn falls_back_to_channel_posts() {
        let update: Update = serde_json::from_value(json!({
            "update_id": 7,
            "channel_post": {"message_id": 1, "chat": {"id": -100}, "text": "/p 1 x"}
        }))
        .unwrap();
        let message = update.effective_message().unwrap();
        assert_eq!(message.chat.id, -100);
        assert_eq!(message.text.as_deref(), Some("/p 1 x"));
    }
}
