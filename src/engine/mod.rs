//! Dispatch side of the state machine.
//!
//! The [`FsmEngine`] resolves queued events against its transition table and
//! calls into a [`HandlerRegistry`] it borrows from the application. The
//! registry is the only place application behavior enters the engine.

mod handler;
mod machine;

pub use handler::{Handler, HandlerRegistry, HandlerTable};
pub use machine::FsmEngine;
