//! Effects produced by wizard transitions
//!
//! The runtime executes these strictly in order; a transition's effect list
//! therefore encodes the required sequencing (menu cleanup before the next
//! prompt, delivery before the follow-up menu).

use super::event::MessageId;
use crate::avatar::AvatarRequest;
use crate::catalog::CommandCatalog;
use bytes::Bytes;

/// One selectable menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuChoice {
    pub label: String,
    pub token: String,
}

impl MenuChoice {
    pub fn new(label: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            token: token.into(),
        }
    }
}

/// Effects to be executed after a state transition
#[derive(Debug, Clone)]
pub enum Effect {
    /// Strip the inline menu from a prior prompt and delete the message.
    ClearMenu { message_id: MessageId },

    /// Send a plain text prompt.
    SendText { text: String },

    /// Send a prompt with an inline choice menu.
    SendMenu {
        text: String,
        choices: Vec<MenuChoice>,
    },

    /// Perform the terminal avatar fetch (the runtime feeds the outcome back
    /// as `Event::FetchResolved`).
    FetchAvatar { request: AvatarRequest },

    /// Deliver fetched bytes as a photo attachment.
    SendPhoto { bytes: Bytes, filename: String },

    /// Deliver fetched bytes as a generic file attachment.
    SendDocument { bytes: Bytes, filename: String },
}

impl Effect {
    pub fn send_text(text: impl Into<String>) -> Self {
        Effect::SendText { text: text.into() }
    }

    /// PNG/SVG choice menu shown after a style is picked.
    pub fn format_menu(style: &str) -> Self {
        Effect::SendMenu {
            text: format!("✅ {style}: choose a format:"),
            choices: vec![
                MenuChoice::new("🖼 PNG", "format|png"),
                MenuChoice::new("📄 SVG", "format|svg"),
            ],
        }
    }

    /// Transparent/solid choice menu shown after a format is picked.
    pub fn background_menu() -> Self {
        Effect::SendMenu {
            text: "What background would you like?".to_string(),
            choices: vec![
                MenuChoice::new("🔳 Transparent", "bg|transparent"),
                MenuChoice::new("🟥 Solid", "bg|solid"),
            ],
        }
    }

    /// The full command catalog as a selectable menu.
    pub fn catalog_menu(catalog: &CommandCatalog, text: impl Into<String>) -> Self {
        Effect::SendMenu {
            text: text.into(),
            choices: catalog
                .menu_pairs()
                .map(|(token, label)| MenuChoice::new(label, token))
                .collect(),
        }
    }
}
