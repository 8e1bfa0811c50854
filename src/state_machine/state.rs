//! Wizard state types
//!
//! Each stage is a distinct variant carrying exactly the fields that are
//! valid at that stage, so the terminal step never has to re-check which
//! selections were actually made.

use crate::avatar::{AvatarRequest, ImageFormat};
use crate::catalog::CommandCatalog;

/// Background choice accumulated by the wizard. A solid background keeps the
/// raw (already validated) color name; it is resolved to hex only when the
/// fetch request is assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Background {
    Transparent,
    Solid { color: String },
}

/// Wizard state for one chat.
///
/// A chat with no wizard in progress is `Idle`; the engine keeps no map
/// entry for idle chats.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum WizardState {
    /// No wizard in progress.
    #[default]
    Idle,

    /// Style chosen, waiting for a format selection.
    AwaitingFormat { style: String },

    /// Waiting for a background selection.
    AwaitingBackground { style: String, format: ImageFormat },

    /// Solid background chosen, waiting for a color name as free text.
    AwaitingColor { style: String, format: ImageFormat },

    /// Waiting for seed text; the next message triggers the fetch.
    AwaitingSeed {
        style: String,
        format: ImageFormat,
        background: Background,
    },

    /// Terminal fetch in flight; only the fetch outcome is meaningful here.
    Fetching { request: AvatarRequest },
}

impl WizardState {
    /// Whether the wizard expects free text rather than a menu selection.
    #[allow(dead_code)] // State query utility
    pub fn awaits_text(&self) -> bool {
        matches!(
            self,
            WizardState::AwaitingColor { .. } | WizardState::AwaitingSeed { .. }
        )
    }
}

/// Immutable configuration shared by every chat's transitions.
#[derive(Debug, Clone)]
pub struct WizardContext {
    pub catalog: CommandCatalog,
}

impl WizardContext {
    pub fn new(catalog: CommandCatalog) -> Self {
        Self { catalog }
    }
}
