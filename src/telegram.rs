//! Telegram Bot API boundary
//!
//! A thin client over the HTTP API plus the single parse step that turns a
//! raw update into a structured engine event. The engine never sees
//! Telegram wire types.

mod client;
mod types;

pub use client::TelegramClient;
pub use types::{CallbackQuery, Chat, Message, TelegramError, Update};

use crate::state_machine::{ChatId, Event, Selection};

/// Classify one update into a chat id and engine event.
///
/// Callback queries become menu selections (carrying the id of the message
/// whose menu was tapped); text messages become text events. Updates with
/// neither, blank text, or an unparseable token are dropped here.
pub fn inbound_event(update: Update) -> Option<(ChatId, Event)> {
    if let Some(callback) = update.callback_query {
        let message = callback.message?;
        let token = callback.data?;
        let selection = Selection::parse(&token)?;
        return Some((
            message.chat.id,
            Event::Selection {
                selection,
                message_id: message.message_id,
            },
        ));
    }

    let message = update.message?;
    let text = message.text?;
    if text.trim().is_empty() {
        return None;
    }
    Some((message.chat.id, Event::Text { text }))
}
