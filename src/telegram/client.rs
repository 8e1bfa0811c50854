//! Telegram Bot API client

use super::types::{
    ApiResponse, InlineKeyboardButton, InlineKeyboardMarkup, Message, TelegramError, Update,
};
use crate::runtime::DeliveryAdapter;
use crate::state_machine::{ChatId, MenuChoice, MessageId};
use async_trait::async_trait;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;

/// Must exceed the long-poll timeout passed to `getUpdates`, and leave room
/// for attachment uploads.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

/// Thin client over the Telegram Bot API. Cloneable; clones share the
/// underlying connection pool.
#[derive(Clone)]
pub struct TelegramClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl TelegramClient {
    pub fn new(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{method}",
            self.base_url.trim_end_matches('/'),
            self.token
        )
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        payload: &serde_json::Value,
    ) -> Result<T, TelegramError> {
        let response = self
            .client
            .post(self.method_url(method))
            .json(payload)
            .send()
            .await
            .map_err(|e| TelegramError::network(format!("{method} failed: {e}")))?;
        Self::unwrap_envelope(method, response).await
    }

    async fn unwrap_envelope<T: DeserializeOwned>(
        method: &str,
        response: reqwest::Response,
    ) -> Result<T, TelegramError> {
        let envelope: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| TelegramError::decode(format!("{method}: {e}")))?;
        if !envelope.ok {
            let description = envelope
                .description
                .unwrap_or_else(|| "no description".to_string());
            return Err(TelegramError::api(format!("{method}: {description}")));
        }
        envelope
            .result
            .ok_or_else(|| TelegramError::decode(format!("{method}: envelope missing result")))
    }

    /// Long-poll for updates after `offset`.
    pub async fn get_updates(
        &self,
        offset: i64,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, TelegramError> {
        self.call(
            "getUpdates",
            &json!({
                "offset": offset,
                "timeout": timeout_secs,
                "allowed_updates": ["message", "callback_query"],
            }),
        )
        .await
    }

    pub async fn send_message(
        &self,
        chat: ChatId,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<Message, TelegramError> {
        let mut payload = json!({ "chat_id": chat, "text": text });
        if let Some(keyboard) = keyboard {
            payload["reply_markup"] = serde_json::to_value(keyboard)
                .map_err(|e| TelegramError::decode(format!("sendMessage markup: {e}")))?;
        }
        self.call("sendMessage", &payload).await
    }

    /// Remove a message's inline keyboard. The API returns either the edited
    /// message or `true`; neither is interesting here.
    pub async fn edit_reply_markup(
        &self,
        chat: ChatId,
        message_id: MessageId,
    ) -> Result<(), TelegramError> {
        self.call::<serde_json::Value>(
            "editMessageReplyMarkup",
            &json!({ "chat_id": chat, "message_id": message_id }),
        )
        .await
        .map(|_| ())
    }

    pub async fn delete_message(
        &self,
        chat: ChatId,
        message_id: MessageId,
    ) -> Result<(), TelegramError> {
        self.call::<bool>(
            "deleteMessage",
            &json!({ "chat_id": chat, "message_id": message_id }),
        )
        .await
        .map(|_| ())
    }

    /// Upload bytes as an attachment via multipart form data.
    async fn send_upload(
        &self,
        method: &str,
        field: &str,
        chat: ChatId,
        bytes: Bytes,
        filename: &str,
    ) -> Result<(), TelegramError> {
        let part = reqwest::multipart::Part::bytes(bytes.to_vec())
            .file_name(filename.to_string());
        let form = reqwest::multipart::Form::new()
            .text("chat_id", chat.to_string())
            .part(field.to_string(), part);

        let response = self
            .client
            .post(self.method_url(method))
            .multipart(form)
            .send()
            .await
            .map_err(|e| TelegramError::network(format!("{method} failed: {e}")))?;
        Self::unwrap_envelope::<serde_json::Value>(method, response)
            .await
            .map(|_| ())
    }

    fn keyboard(choices: &[MenuChoice]) -> InlineKeyboardMarkup {
        InlineKeyboardMarkup {
            inline_keyboard: choices
                .iter()
                .map(|choice| {
                    vec![InlineKeyboardButton {
                        text: choice.label.clone(),
                        callback_data: choice.token.clone(),
                    }]
                })
                .collect(),
        }
    }
}

#[async_trait]
impl DeliveryAdapter for TelegramClient {
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<(), String> {
        self.send_message(chat, text, None)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    async fn send_menu(
        &self,
        chat: ChatId,
        text: &str,
        choices: &[MenuChoice],
    ) -> Result<(), String> {
        self.send_message(chat, text, Some(Self::keyboard(choices)))
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    async fn clear_menu(&self, chat: ChatId, message_id: MessageId) -> Result<(), String> {
        self.edit_reply_markup(chat, message_id)
            .await
            .map_err(|e| e.to_string())?;
        self.delete_message(chat, message_id)
            .await
            .map_err(|e| e.to_string())
    }

    async fn send_photo(&self, chat: ChatId, bytes: Bytes, filename: &str) -> Result<(), String> {
        self.send_upload("sendPhoto", "photo", chat, bytes, filename)
            .await
            .map_err(|e| e.to_string())
    }

    async fn send_document(
        &self,
        chat: ChatId,
        bytes: Bytes,
        filename: &str,
    ) -> Result<(), String> {
        self.send_upload("sendDocument", "document", chat, bytes, filename)
            .await
            .map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_urls_embed_the_token() {
        let client = TelegramClient::new("123:abc", "https://api.telegram.example");
        assert_eq!(
            client.method_url("sendMessage"),
            "https://api.telegram.example/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn keyboards_keep_one_choice_per_row_in_order() {
        let choices = vec![
            MenuChoice::new("PNG", "format|png"),
            MenuChoice::new("SVG", "format|svg"),
        ];
        let keyboard = TelegramClient::keyboard(&choices);
        assert_eq!(keyboard.inline_keyboard.len(), 2);
        assert_eq!(keyboard.inline_keyboard[0][0].callback_data, "format|png");
        assert_eq!(keyboard.inline_keyboard[1][0].callback_data, "format|svg");
    }
}
