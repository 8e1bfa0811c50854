//! Telegram Bot API wire types
//!
//! Only the fields this bot reads are modeled; everything else in the API
//! payloads is ignored during deserialization.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Telegram API error with classification
#[derive(Debug, Error)]
pub enum TelegramError {
    /// The API answered `ok: false`.
    #[error("telegram API error: {0}")]
    Api(String),

    /// Connection, timeout, or protocol failure.
    #[error("network error: {0}")]
    Network(String),

    /// The response envelope did not match expectations.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl TelegramError {
    pub fn api(message: impl Into<String>) -> Self {
        TelegramError::Api(message.into())
    }

    pub fn network(message: impl Into<String>) -> Self {
        TelegramError::Network(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        TelegramError::Decode(message.into())
    }
}

/// One long-polling update.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// An inline-keyboard tap.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub message: Option<Message>,
}

/// Standard Telegram response envelope.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
pub(super) struct ApiResponse<T> {
    pub ok: bool,
    #[serde(default)]
    pub result: Option<T>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

#[derive(Debug, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}
