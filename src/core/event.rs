//! Events and the FIFO queue drained by the engine.

use super::transition::EventId;
use std::collections::VecDeque;
use std::fmt;

/// A queued event with borrowed parameters.
///
/// The engine never owns `parameters`; the caller keeps the payload alive
/// for the duration of the `control` call that carries it.
pub struct Event<'a, P: ?Sized> {
    pub id: EventId,
    pub parameters: Option<&'a P>,
}

impl<'a, P: ?Sized> Event<'a, P> {
    pub fn new(id: EventId, parameters: Option<&'a P>) -> Self {
        Self { id, parameters }
    }
}

impl<P: ?Sized> Clone for Event<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: ?Sized> Copy for Event<'_, P> {}

impl<P: ?Sized> fmt::Debug for Event<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("id", &self.id)
            .field("has_parameters", &self.parameters.is_some())
            .finish()
    }
}

/// Strict FIFO of pending events for a single `control` call.
///
/// Handlers receive a mutable reference to the queue being drained and use
/// [`generate_event`](EventQueue::generate_event) to schedule follow-ups.
/// Follow-ups run in the same drain pass, after everything already queued.
///
/// # Example
///
/// ```rust
/// use microfsm::core::EventQueue;
///
/// let payload = 42u32;
/// let mut queue = EventQueue::new();
/// queue.generate_event(3, Some(&payload));
/// queue.generate_event(4, None);
///
/// assert_eq!(queue.len(), 2);
/// assert_eq!(queue.pending().next().map(|e| e.id), Some(3));
/// ```
pub struct EventQueue<'a, P: ?Sized> {
    events: VecDeque<Event<'a, P>>,
}

impl<'a, P: ?Sized> EventQueue<'a, P> {
    pub fn new() -> Self {
        Self {
            events: VecDeque::new(),
        }
    }

    /// Append an event at the tail of the queue.
    pub fn generate_event(&mut self, id: EventId, parameters: Option<&'a P>) {
        tracing::trace!(event = id, queued = self.events.len(), "event queued");
        self.events.push_back(Event::new(id, parameters));
    }

    pub(crate) fn pop_front(&mut self) -> Option<Event<'a, P>> {
        self.events.pop_front()
    }

    /// Events still waiting, head first.
    pub fn pending(&self) -> impl Iterator<Item = &Event<'a, P>> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl<P: ?Sized> Default for EventQueue<'_, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ?Sized> fmt::Debug for EventQueue<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.events.iter()).finish()
    }
}
