//! Core data structures of the state machine.
//!
//! - Identifiers and the reserved [`INTERNAL_ERROR`] event
//! - The fixed-capacity, open-addressed [`TransitionTable`]
//! - Events with borrowed parameters and the [`EventQueue`] drained by the engine
//! - Opt-in [`DispatchHistory`]
//!
//! Nothing in this module invokes handlers; dispatch lives in
//! [`engine`](crate::engine).

mod event;
mod history;
mod table;
mod transition;

pub use event::{Event, EventQueue};
pub use history::{DispatchHistory, DispatchRecord};
pub use table::TransitionTable;
pub use transition::{EventId, HandlerIndex, StateId, Transition, INTERNAL_ERROR};
