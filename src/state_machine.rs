//! Per-chat wizard state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions: an
//! inbound event plus the current state produce a new state and an ordered
//! list of outbound effects.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::{Effect, MenuChoice};
pub use event::{ChatId, Event, MessageId, Selection};
pub use state::{WizardContext, WizardState};
pub use transition::{transition, TransitionResult};
