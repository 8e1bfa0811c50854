//! Events that drive wizard transitions
//!
//! Menu tokens are parsed into structured selections exactly once, at the
//! chat boundary; the transition function never sees raw token strings.

use crate::avatar::{FetchError, ImageFormat};
use bytes::Bytes;

/// Chat identifier as used by the transport.
pub type ChatId = i64;

/// Message identifier within a chat.
pub type MessageId = i64;

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    /// An inline-menu selection, with the message that carried the menu.
    Selection {
        selection: Selection,
        message_id: MessageId,
    },

    /// A free-text message.
    Text { text: String },

    /// Outcome of the terminal fetch, fed back by the runtime.
    FetchResolved {
        result: Result<Bytes, FetchError>,
    },
}

/// Choice between the two background modes offered by the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundChoice {
    Transparent,
    Solid,
}

/// A structured menu selection.
///
/// Tokens are namespaced by `|`: `format|<fmt>` and `bg|<choice>` are
/// recognized operations, and any bare token is treated as a style command
/// (validated against the catalog during the transition). Unknown
/// namespaces or operands parse to `None` and are dropped at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Style { command: String },
    Format(ImageFormat),
    Background(BackgroundChoice),
}

impl Selection {
    pub fn parse(token: &str) -> Option<Selection> {
        match token.split_once('|') {
            Some(("format", "png")) => Some(Selection::Format(ImageFormat::Png)),
            Some(("format", "svg")) => Some(Selection::Format(ImageFormat::Svg)),
            Some(("bg", "transparent")) => {
                Some(Selection::Background(BackgroundChoice::Transparent))
            }
            Some(("bg", "solid")) => Some(Selection::Background(BackgroundChoice::Solid)),
            Some(_) => None,
            None => Some(Selection::Style {
                command: token.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_tokens_parse_as_style_commands() {
        assert_eq!(
            Selection::parse("/bottts"),
            Some(Selection::Style {
                command: "/bottts".to_string()
            })
        );
    }

    #[test]
    fn namespaced_tokens_parse_to_structured_variants() {
        assert_eq!(
            Selection::parse("format|png"),
            Some(Selection::Format(ImageFormat::Png))
        );
        assert_eq!(
            Selection::parse("format|svg"),
            Some(Selection::Format(ImageFormat::Svg))
        );
        assert_eq!(
            Selection::parse("bg|transparent"),
            Some(Selection::Background(BackgroundChoice::Transparent))
        );
        assert_eq!(
            Selection::parse("bg|solid"),
            Some(Selection::Background(BackgroundChoice::Solid))
        );
    }

    #[test]
    fn unknown_namespaces_and_operands_are_dropped() {
        assert_eq!(Selection::parse("format|webp"), None);
        assert_eq!(Selection::parse("bg|striped"), None);
        assert_eq!(Selection::parse("size|128"), None);
    }
}
