//! Microfsm: a small event-driven finite state machine engine
//!
//! Microfsm targets resource-constrained environments. Transitions live in a
//! fixed-capacity, open-addressed hash table and events are processed from
//! an in-process FIFO queue, so the engine never resizes its table and never
//! recurses while dispatching.
//!
//! # Core Concepts
//!
//! - **Transition table**: `(state, event) -> (state, handler)` with linear probing
//! - **Handler registry**: application callbacks addressed by index, returning success or failure
//! - **Control loop**: [`FsmEngine::control`] drains the queue, including follow-up
//!   events generated by handlers, before returning
//! - **Internal error**: the reserved [`INTERNAL_ERROR`] event raised when no
//!   transition matches
//!
//! # Example
//!
//! ```rust
//! use microfsm::{FsmEngine, HandlerTable, INTERNAL_ERROR};
//!
//! const IDLE: u32 = 1;
//! const WAIT_DEV: u32 = 3;
//! const EV_RESET: u32 = 3;
//! const EV_READY: u32 = 5;
//!
//! let mut handlers = HandlerTable::<()>::new();
//! let on_error = handlers.register(|_, _| false);
//! let on_reset = handlers.register(|_, events| {
//!     events.generate_event(EV_READY, None);
//!     true
//! });
//! let on_ready = handlers.register(|_, _| true);
//!
//! let mut fsm = FsmEngine::new(&mut handlers, 16, IDLE).unwrap();
//! fsm.define_transition(IDLE, IDLE, INTERNAL_ERROR, on_error).unwrap();
//! fsm.define_transition(IDLE, WAIT_DEV, EV_RESET, on_reset).unwrap();
//! fsm.define_transition(WAIT_DEV, IDLE, EV_READY, on_ready).unwrap();
//!
//! // The reset handler's follow-up runs in the same call.
//! assert!(fsm.control(EV_RESET, None));
//! assert_eq!(fsm.current_state(), IDLE);
//! ```

pub mod config;
pub mod core;
pub mod engine;
pub mod error;

// Re-export commonly used types
pub use crate::config::MachineConfig;
pub use crate::core::{EventId, EventQueue, HandlerIndex, StateId, Transition, INTERNAL_ERROR};
pub use crate::engine::{FsmEngine, HandlerRegistry, HandlerTable};
pub use crate::error::FsmError;
