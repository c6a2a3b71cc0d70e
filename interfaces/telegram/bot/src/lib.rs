//! Minimal Telegram Bot API client: polling updates and posting messages

pub mod api;
pub mod methods;
pub mod models;

pub use api::{BotApi, DEFAULT_API_URL};
pub use methods::{get_updates, send_message, send_photo, BotApiError};
pub use models::{
    Chat, ChatId, InlineKeyboardButton, InlineKeyboardMarkup, Message, ParseMode, SendMessage,
    SendPhoto, Update,
};
