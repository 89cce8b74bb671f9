//! Errors surfaced by table construction and transition definition.

use crate::config::ConfigViolation;
use crate::core::{EventId, HandlerIndex, StateId};
use thiserror::Error;

/// Configuration errors reported synchronously to the caller.
///
/// Runtime dispatch problems never appear here; the engine recovers from
/// them through the internal-error event.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FsmError {
    #[error("Transition table capacity must be greater than zero")]
    ZeroCapacity,

    #[error("Transition table full ({capacity} slots), cannot add state {state} on event {event}")]
    TableFull {
        capacity: usize,
        state: StateId,
        event: EventId,
    },

    #[error("Transition for state {state} on event {event} already defined at slot {slot}")]
    DuplicateTransition {
        state: StateId,
        event: EventId,
        slot: usize,
    },

    #[error("Handler index {index} out of range for a registry of {handlers} handlers")]
    HandlerOutOfRange {
        index: HandlerIndex,
        handlers: usize,
    },

    #[error("Invalid machine configuration: {}", summarize(.0))]
    InvalidConfig(Vec<ConfigViolation>),
}

fn summarize(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
