//! Event-driven state machine over a fixed transition table.

use crate::config::MachineConfig;
use crate::core::{
    DispatchHistory, DispatchRecord, EventId, EventQueue, HandlerIndex, StateId, Transition,
    TransitionTable, INTERNAL_ERROR,
};
use crate::engine::handler::HandlerRegistry;
use crate::error::FsmError;
use chrono::Utc;
use std::marker::PhantomData;
use tracing::{debug, trace, warn};

/// Finite state machine driven by [`control`](FsmEngine::control).
///
/// The engine owns its transition table and current state. The handler
/// registry is borrowed for the engine's lifetime and handler parameters are
/// borrowed for the duration of each `control` call.
///
/// # Example
///
/// ```rust
/// use microfsm::core::INTERNAL_ERROR;
/// use microfsm::engine::{FsmEngine, HandlerTable};
///
/// const IDLE: u32 = 0x0001;
/// const WAIT_DEV: u32 = 0x0003;
/// const EV_RESET: u32 = 0x0003;
///
/// let mut handlers = HandlerTable::<()>::new();
/// let on_error = handlers.register(|_, _| false);
/// let on_reset = handlers.register(|_, _| true);
///
/// let mut fsm = FsmEngine::new(&mut handlers, 26, IDLE).unwrap();
/// fsm.define_transition(IDLE, IDLE, INTERNAL_ERROR, on_error).unwrap();
/// fsm.define_transition(IDLE, WAIT_DEV, EV_RESET, on_reset).unwrap();
///
/// assert!(!fsm.control(INTERNAL_ERROR, None));
/// assert_eq!(fsm.current_state(), IDLE);
///
/// assert!(fsm.control(EV_RESET, None));
/// assert_eq!(fsm.current_state(), WAIT_DEV);
/// ```
pub struct FsmEngine<'r, P: ?Sized, R: HandlerRegistry<P> + ?Sized> {
    registry: &'r mut R,
    table: TransitionTable,
    current_state: StateId,
    history: Option<DispatchHistory>,
    _parameters: PhantomData<fn(&P)>,
}

impl<'r, P: ?Sized, R: HandlerRegistry<P> + ?Sized> FsmEngine<'r, P, R> {
    /// Create an engine with an empty table of `capacity` slots.
    pub fn new(
        registry: &'r mut R,
        capacity: usize,
        initial_state: StateId,
    ) -> Result<Self, FsmError> {
        let table = TransitionTable::new(capacity)?;
        debug!(capacity, initial_state, "state machine created");

        Ok(Self {
            registry,
            table,
            current_state: initial_state,
            history: None,
            _parameters: PhantomData,
        })
    }

    /// Create an engine from a validated configuration.
    ///
    /// All configuration violations are reported together in
    /// [`FsmError::InvalidConfig`]. States that can be reached without an
    /// [`INTERNAL_ERROR`] transition are logged but accepted.
    pub fn from_config(registry: &'r mut R, config: &MachineConfig) -> Result<Self, FsmError> {
        config.check(registry.len())?;

        for state in config.coverage_gaps() {
            warn!(state, "no internal-error transition defined for reachable state");
        }

        let mut engine = Self::new(registry, config.capacity, config.initial_state)?;
        if let Some(limit) = config.history_limit {
            engine.enable_history(limit);
        }

        for spec in &config.transitions {
            match spec.handler {
                Some(handler) => {
                    engine.define_transition(spec.from, spec.to, spec.event, handler)?
                }
                None => engine.define_unassigned(spec.from, spec.to, spec.event)?,
            };
        }

        Ok(engine)
    }

    /// Add a transition bound to the handler at `handler`.
    ///
    /// Returns the table slot used. Fails if `handler` is outside the
    /// registry, if the `(source, event)` pair already exists, or if the
    /// table is full.
    pub fn define_transition(
        &mut self,
        source: StateId,
        destination: StateId,
        event: EventId,
        handler: HandlerIndex,
    ) -> Result<usize, FsmError> {
        let handlers = self.registry.len();
        if handler >= handlers {
            return Err(FsmError::HandlerOutOfRange {
                index: handler,
                handlers,
            });
        }

        self.insert(Transition::new(source, destination, event, handler))
    }

    /// Add a transition that matches but has no handler.
    ///
    /// Dispatching it raises [`INTERNAL_ERROR`] and leaves the state as is.
    pub fn define_unassigned(
        &mut self,
        source: StateId,
        destination: StateId,
        event: EventId,
    ) -> Result<usize, FsmError> {
        self.insert(Transition::unassigned(source, destination, event))
    }

    fn insert(&mut self, transition: Transition) -> Result<usize, FsmError> {
        let slot = self.table.insert(transition)?;
        trace!(
            source = transition.source,
            destination = transition.destination,
            event = transition.event,
            slot,
            "transition defined"
        );
        Ok(slot)
    }

    /// Feed an event to the machine and drain every event it produces.
    ///
    /// Each dequeued event is resolved against the current state. A matching
    /// transition with a handler runs the handler and then moves to the
    /// destination state, even when the handler reports failure. A missing or
    /// unassigned transition queues an [`INTERNAL_ERROR`] event instead; an
    /// internal error that itself cannot be resolved is dropped so the queue
    /// always drains.
    ///
    /// Returns the result of the last handler that ran, or `false` if none did.
    pub fn control<'a>(&mut self, event: EventId, parameters: Option<&'a P>) -> bool {
        let mut events = EventQueue::new();
        events.generate_event(event, parameters);

        let mut outcome = false;
        while let Some(current) = events.pop_front() {
            let matched = self.table.lookup(self.current_state, current.id).copied();

            match matched.and_then(|t| t.handler.map(|handler| (t, handler))) {
                Some((transition, handler)) if handler < self.registry.len() => {
                    outcome = self.registry.invoke(handler, current.parameters, &mut events);
                    self.advance(&transition, handler, outcome);
                }
                Some((transition, handler)) => {
                    warn!(
                        state = self.current_state,
                        event = current.id,
                        handler,
                        handlers = self.registry.len(),
                        destination = transition.destination,
                        "handler index out of range, treating as missing transition"
                    );
                    self.raise_internal_error(&mut events, current.id);
                }
                None => {
                    if matched.is_some() {
                        debug!(
                            state = self.current_state,
                            event = current.id,
                            "transition has no handler assigned"
                        );
                    } else {
                        debug!(
                            state = self.current_state,
                            event = current.id,
                            "no transition defined"
                        );
                    }
                    self.raise_internal_error(&mut events, current.id);
                }
            }
        }

        outcome
    }

    fn advance(&mut self, transition: &Transition, handler: HandlerIndex, outcome: bool) {
        debug!(
            from = self.current_state,
            to = transition.destination,
            event = transition.event,
            handler,
            outcome,
            self_loop = transition.is_self_loop(),
            "transition dispatched"
        );

        if let Some(history) = self.history.as_mut() {
            history.record(DispatchRecord {
                from: self.current_state,
                to: transition.destination,
                event: transition.event,
                handler,
                outcome,
                timestamp: Utc::now(),
            });
        }

        self.current_state = transition.destination;
    }

    fn raise_internal_error(&self, events: &mut EventQueue<'_, P>, failed: EventId) {
        if failed == INTERNAL_ERROR {
            warn!(
                state = self.current_state,
                "internal error not handled in this state, dropping it"
            );
        } else {
            events.generate_event(INTERNAL_ERROR, None);
        }
    }

    /// State reached by the last dispatched transition.
    pub fn current_state(&self) -> StateId {
        self.current_state
    }

    /// Transition that `event` would fire from the current state.
    pub fn transition_for(&self, event: EventId) -> Option<&Transition> {
        self.table.lookup(self.current_state, event)
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Start recording dispatched transitions, keeping at most `limit`.
    ///
    /// Replaces any history recorded so far.
    pub fn enable_history(&mut self, limit: usize) {
        self.history = Some(DispatchHistory::new(limit));
    }

    pub fn history(&self) -> Option<&DispatchHistory> {
        self.history.as_ref()
    }
}
