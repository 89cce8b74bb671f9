//! Identifiers and the transition record stored in the table.

use serde::{Deserialize, Serialize};

/// Application-defined state identifier.
pub type StateId = u32;

/// Application-defined event identifier.
pub type EventId = u32;

/// Position of a handler inside a [`HandlerRegistry`](crate::engine::HandlerRegistry).
pub type HandlerIndex = usize;

/// Reserved event code signalling an unhandled or missing transition.
///
/// The engine synthesizes this event whenever the current `(state, event)`
/// pair has no usable transition. Domain events must not reuse this value.
pub const INTERNAL_ERROR: EventId = 0;

/// A `(source, event) -> (destination, handler)` mapping.
///
/// Transitions are immutable once inserted into a
/// [`TransitionTable`](crate::core::TransitionTable).
///
/// # Example
///
/// ```rust
/// use microfsm::core::Transition;
///
/// let reset = Transition::new(1, 3, 3, 1);
/// assert!(reset.is_assigned());
///
/// let pending = Transition::unassigned(1, 3, 4);
/// assert!(!pending.is_assigned());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// State the machine must be in for this transition to match
    pub source: StateId,
    /// State the machine moves to after the handler runs
    pub destination: StateId,
    /// Event that triggers the transition
    pub event: EventId,
    /// Handler to invoke; `None` means no handler has been assigned
    pub handler: Option<HandlerIndex>,
}

impl Transition {
    /// Create a transition bound to a handler.
    pub fn new(
        source: StateId,
        destination: StateId,
        event: EventId,
        handler: HandlerIndex,
    ) -> Self {
        Self {
            source,
            destination,
            event,
            handler: Some(handler),
        }
    }

    /// Create a transition that matches but carries no handler.
    ///
    /// Dispatching it is treated as a missing transition.
    pub fn unassigned(source: StateId, destination: StateId, event: EventId) -> Self {
        Self {
            source,
            destination,
            event,
            handler: None,
        }
    }

    /// Check if a handler is bound to this transition.
    pub fn is_assigned(&self) -> bool {
        self.handler.is_some()
    }

    /// Check if this transition fires for `event` while in `state`.
    pub fn matches(&self, state: StateId, event: EventId) -> bool {
        self.source == state && self.event == event
    }

    /// Check if the transition leaves the state unchanged.
    pub fn is_self_loop(&self) -> bool {
        self.source == self.destination
    }
}
