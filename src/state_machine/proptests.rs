//! Property-based tests for the wizard transition function

use super::event::{Event, Selection};
use super::state::{WizardContext, WizardState};
use super::transition;
use crate::avatar::FetchError;
use crate::catalog::{CommandCatalog, StyleCommand};
use bytes::Bytes;
use proptest::prelude::*;

fn test_context() -> WizardContext {
    WizardContext::new(CommandCatalog::new(vec![
        StyleCommand::new("/avataaars", "avataaars"),
        StyleCommand::new("/bottts", "bottts"),
        StyleCommand::new("/pixel-art", "pixel-art"),
    ]))
}

/// Tokens a client might send: every real menu token plus garbage.
fn arb_token() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("/avataaars".to_string()),
        Just("/bottts".to_string()),
        Just("/pixel-art".to_string()),
        Just("/unknown".to_string()),
        Just("format|png".to_string()),
        Just("format|svg".to_string()),
        Just("format|webp".to_string()),
        Just("bg|transparent".to_string()),
        Just("bg|solid".to_string()),
        Just("bg|striped".to_string()),
        "[a-z|/]{0,12}",
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        (arb_token(), 0i64..100).prop_filter_map("unparseable tokens never reach the machine", |(token, message_id)| {
            Selection::parse(&token).map(|selection| Event::Selection {
                selection,
                message_id,
            })
        }),
        prop_oneof![
            Just("/start".to_string()),
            Just("/help".to_string()),
            Just("red".to_string()),
            Just("chartreuse".to_string()),
            "[a-zA-Z0-9 ]{0,16}",
        ]
        .prop_map(|text| Event::Text { text }),
        prop_oneof![
            Just(Ok(Bytes::from_static(b"avatar"))),
            Just(Err(FetchError::status(503))),
            Just(Err(FetchError::network("boom"))),
        ]
        .prop_map(|result| Event::FetchResolved { result }),
    ]
}

proptest! {
    /// Arbitrary event sequences never panic, and any fetch the machine
    /// emits was assembled from non-empty fields with a resolved color.
    #[test]
    fn event_sequences_keep_fetch_requests_well_formed(
        events in proptest::collection::vec(arb_event(), 0..24)
    ) {
        let ctx = test_context();
        let mut state = WizardState::Idle;
        for event in events {
            state = transition(&state, &ctx, event).new_state;
            if let WizardState::Fetching { request } = &state {
                prop_assert!(!request.style.is_empty());
                prop_assert!(!request.seed.is_empty());
                if let Some(color) = &request.background_color {
                    prop_assert_eq!(color.len(), 6);
                    prop_assert!(color.chars().all(|c| c.is_ascii_hexdigit()));
                }
            }
        }
    }

    /// A catalogued style command lands in AwaitingFormat from any
    /// reachable state.
    #[test]
    fn style_command_always_restarts_the_wizard(
        events in proptest::collection::vec(arb_event(), 0..16),
        message_id in 0i64..100,
    ) {
        let ctx = test_context();
        let mut state = WizardState::Idle;
        for event in events {
            state = transition(&state, &ctx, event).new_state;
        }
        // The per-chat runtime never routes new selections into a chat whose
        // fetch is still in flight.
        prop_assume!(!matches!(state, WizardState::Fetching { .. }));

        let event = Event::Selection {
            selection: Selection::Style { command: "/bottts".to_string() },
            message_id,
        };
        let after = transition(&state, &ctx, event).new_state;
        prop_assert_eq!(after, WizardState::AwaitingFormat { style: "bottts".to_string() });
    }

    /// Text that is not a known color never advances the color stage.
    #[test]
    fn color_stage_rejects_unknown_names(text in "[A-Za-z ]{0,16}") {
        prop_assume!(!crate::colors::is_known(text.trim()));
        let ctx = test_context();
        let before = WizardState::AwaitingColor {
            style: "bottts".to_string(),
            format: crate::avatar::ImageFormat::Png,
        };
        let result = transition(&before, &ctx, Event::Text { text });
        prop_assert_eq!(result.new_state, before);
    }
}
