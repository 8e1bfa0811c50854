//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the engine with mock implementations.

use crate::state_machine::{ChatId, MenuChoice, MessageId};
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;

/// Outbound chat operations the engine depends on.
///
/// Calls are awaited one at a time; a failure is reported to the caller so
/// it can be logged before the engine moves to the next effect.
#[async_trait]
pub trait DeliveryAdapter: Send + Sync {
    /// Send a plain text prompt.
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<(), String>;

    /// Send a prompt with an inline choice menu, choices in the given order.
    async fn send_menu(
        &self,
        chat: ChatId,
        text: &str,
        choices: &[MenuChoice],
    ) -> Result<(), String>;

    /// Strip a prior prompt's inline menu, then delete the message.
    async fn clear_menu(&self, chat: ChatId, message_id: MessageId) -> Result<(), String>;

    /// Deliver bytes as a photo attachment.
    async fn send_photo(&self, chat: ChatId, bytes: Bytes, filename: &str) -> Result<(), String>;

    /// Deliver bytes as a generic file attachment.
    async fn send_document(&self, chat: ChatId, bytes: Bytes, filename: &str)
        -> Result<(), String>;
}

#[async_trait]
impl<T: DeliveryAdapter + ?Sized> DeliveryAdapter for Arc<T> {
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<(), String> {
        (**self).send_text(chat, text).await
    }

    async fn send_menu(
        &self,
        chat: ChatId,
        text: &str,
        choices: &[MenuChoice],
    ) -> Result<(), String> {
        (**self).send_menu(chat, text, choices).await
    }

    async fn clear_menu(&self, chat: ChatId, message_id: MessageId) -> Result<(), String> {
        (**self).clear_menu(chat, message_id).await
    }

    async fn send_photo(&self, chat: ChatId, bytes: Bytes, filename: &str) -> Result<(), String> {
        (**self).send_photo(chat, bytes, filename).await
    }

    async fn send_document(
        &self,
        chat: ChatId,
        bytes: Bytes,
        filename: &str,
    ) -> Result<(), String> {
        (**self).send_document(chat, bytes, filename).await
    }
}
