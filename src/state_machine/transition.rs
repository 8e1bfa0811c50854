//! Pure wizard transition function
//!
//! Given the same state, context, and event this function always produces
//! the same result, with no I/O. All sequencing requirements live in the
//! order of the returned effects.

use super::event::{BackgroundChoice, Event, Selection};
use super::state::{Background, WizardContext, WizardState};
use super::Effect;
use crate::avatar::{AvatarRequest, ImageFormat};
use crate::colors;

pub(crate) const START_COMMAND: &str = "/start";
pub(crate) const HELP_COMMAND: &str = "/help";

pub(crate) const WELCOME: &str = "👋 Hello! Get started with /help.";
pub(crate) const HELP_HEADER: &str = "Choose a command:";
pub(crate) const FOLLOW_UP_HEADER: &str = "Pick another command:";
pub(crate) const SEED_PROMPT: &str = "Enter a seed:";
pub(crate) const COLOR_PROMPT: &str = "Enter a color (e.g. red, blue):";
pub(crate) const COLOR_RETRY: &str = "Unknown color, enter another:";
pub(crate) const INCOMPLETE: &str = "❌ Not enough data. Start over with /start.";
pub(crate) const FETCH_FAILED: &str = "❌ Something went wrong.";

/// Result of a wizard transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: WizardState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: WizardState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    /// Keep the current state and emit nothing.
    pub fn unchanged(state: &WizardState) -> Self {
        Self::new(state.clone())
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Pure transition function.
pub fn transition(state: &WizardState, ctx: &WizardContext, event: Event) -> TransitionResult {
    match (state, event) {
        // A style command restarts the wizard from any stage, discarding
        // prior selections. Commands missing from the catalog are ignored.
        (
            _,
            Event::Selection {
                selection: Selection::Style { command },
                message_id,
            },
        ) => match ctx.catalog.style_for(&command) {
            Some(style) => TransitionResult::new(WizardState::AwaitingFormat {
                style: style.to_string(),
            })
            .with_effect(Effect::ClearMenu { message_id })
            .with_effect(Effect::format_menu(style)),
            None => TransitionResult::unchanged(state),
        },

        (
            WizardState::AwaitingFormat { style },
            Event::Selection {
                selection: Selection::Format(format),
                message_id,
            },
        ) => TransitionResult::new(WizardState::AwaitingBackground {
            style: style.clone(),
            format,
        })
        .with_effect(Effect::ClearMenu { message_id })
        .with_effect(Effect::background_menu()),

        (
            WizardState::AwaitingBackground { style, format },
            Event::Selection {
                selection: Selection::Background(choice),
                message_id,
            },
        ) => match choice {
            BackgroundChoice::Transparent => TransitionResult::new(WizardState::AwaitingSeed {
                style: style.clone(),
                format: *format,
                background: Background::Transparent,
            })
            .with_effect(Effect::ClearMenu { message_id })
            .with_effect(Effect::send_text(SEED_PROMPT)),
            BackgroundChoice::Solid => TransitionResult::new(WizardState::AwaitingColor {
                style: style.clone(),
                format: *format,
            })
            .with_effect(Effect::ClearMenu { message_id })
            .with_effect(Effect::send_text(COLOR_PROMPT)),
        },

        // Color entry: misses re-prompt without advancing.
        (WizardState::AwaitingColor { style, format }, Event::Text { text }) => {
            let color = text.trim();
            if colors::is_known(color) {
                TransitionResult::new(WizardState::AwaitingSeed {
                    style: style.clone(),
                    format: *format,
                    background: Background::Solid {
                        color: color.to_string(),
                    },
                })
                .with_effect(Effect::send_text(SEED_PROMPT))
            } else {
                TransitionResult::unchanged(state).with_effect(Effect::send_text(COLOR_RETRY))
            }
        }

        // Seed entry: accepted unconditionally; triggers the terminal fetch.
        (
            WizardState::AwaitingSeed {
                style,
                format,
                background,
            },
            Event::Text { text },
        ) => match assemble_request(style, *format, background, &text) {
            Some(request) => TransitionResult::new(WizardState::Fetching {
                request: request.clone(),
            })
            .with_effect(Effect::FetchAvatar { request }),
            // Unreachable through the transitions above; kept in case a
            // stage-skip path ever appears.
            None => TransitionResult::new(WizardState::Idle)
                .with_effect(Effect::send_text(INCOMPLETE)),
        },

        (WizardState::Fetching { request }, Event::FetchResolved { result }) => match result {
            Ok(bytes) => {
                let filename = request.filename();
                let deliver = match request.format {
                    ImageFormat::Png => Effect::SendPhoto { bytes, filename },
                    ImageFormat::Svg => Effect::SendDocument { bytes, filename },
                };
                TransitionResult::new(WizardState::Idle)
                    .with_effect(deliver)
                    .with_effect(Effect::catalog_menu(&ctx.catalog, FOLLOW_UP_HEADER))
            }
            Err(_) => TransitionResult::new(WizardState::Idle)
                .with_effect(Effect::send_text(FETCH_FAILED)),
        },

        // Outside the two text stages, only the fixed commands get a reply.
        (_, Event::Text { text }) => {
            let command = text.trim();
            if command.eq_ignore_ascii_case(START_COMMAND) {
                TransitionResult::unchanged(state).with_effect(Effect::send_text(WELCOME))
            } else if command.eq_ignore_ascii_case(HELP_COMMAND) {
                TransitionResult::unchanged(state)
                    .with_effect(Effect::catalog_menu(&ctx.catalog, HELP_HEADER))
            } else {
                TransitionResult::unchanged(state)
            }
        }

        // Everything else (stale menu taps, stray fetch outcomes) is ignored
        // with no state change and no reply.
        (state, _) => TransitionResult::unchanged(state),
    }
}

/// Turn completed stage fields into a fetch request, resolving a solid
/// background's color name to its hex code. `None` marks the defensive
/// incomplete branch: blank style or seed, or a color that no longer
/// resolves.
fn assemble_request(
    style: &str,
    format: ImageFormat,
    background: &Background,
    seed: &str,
) -> Option<AvatarRequest> {
    if style.trim().is_empty() || seed.is_empty() {
        return None;
    }
    let background_color = match background {
        Background::Transparent => None,
        Background::Solid { color } => Some(colors::resolve(color)?.to_string()),
    };
    Some(AvatarRequest {
        style: style.to_string(),
        seed: seed.to_string(),
        format,
        background_color,
    })
}
