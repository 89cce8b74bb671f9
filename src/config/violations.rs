//! Problems found while validating a machine configuration.

use crate::core::{EventId, HandlerIndex, StateId};
use thiserror::Error;

/// A single configuration problem.
///
/// Validation collects every violation in one pass rather than stopping at
/// the first.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigViolation {
    #[error("Capacity must be greater than zero")]
    ZeroCapacity,

    #[error("{defined} transitions defined but capacity is {capacity}")]
    CapacityExceeded { defined: usize, capacity: usize },

    #[error("Transition for state {state} on event {event} defined more than once")]
    DuplicateTransition { state: StateId, event: EventId },

    #[error(
        "Transition for state {state} on event {event} uses handler {index}, \
         registry has {handlers}"
    )]
    HandlerOutOfRange {
        state: StateId,
        event: EventId,
        index: HandlerIndex,
        handlers: usize,
    },
}
