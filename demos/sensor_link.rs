//! Sensor Link
//!
//! Drives a small device link through reset and transfer, with an
//! internal-error self loop in the idle state.
//!
//! Key concepts:
//! - Handlers as methods on one device object via `HandlerRegistry`
//! - Follow-up events generated from inside a handler
//! - Internal-error recovery for unexpected events
//!
//! Run with: MICROFSM_LOG=microfsm=debug cargo run --example sensor_link

use microfsm::{EventQueue, FsmEngine, HandlerIndex, HandlerRegistry, INTERNAL_ERROR};
use tracing_subscriber::EnvFilter;

const MAX_TRANSITIONS: usize = 26;

// States
const IDLE: u32 = 0x0001;
const WAIT_DEV: u32 = 0x0003;
const WAIT_END: u32 = 0x0005;

// Events
const EV_RESET: u32 = 0x0003;
const EV_TRANSFER: u32 = 0x0004;
const EV_DONE: u32 = 0x0006;

// Handler indexes
const IND_INTERNAL_ERROR: HandlerIndex = 0;
const IND_RESET: HandlerIndex = 1;
const IND_TRANSFER: HandlerIndex = 2;
const IND_DONE: HandlerIndex = 3;

struct SensorLink;

impl HandlerRegistry<str> for SensorLink {
    fn len(&self) -> usize {
        4
    }

    fn invoke<'a>(
        &mut self,
        index: HandlerIndex,
        parameters: Option<&'a str>,
        events: &mut EventQueue<'a, str>,
    ) -> bool {
        match index {
            IND_INTERNAL_ERROR => {
                println!("  handleInternalError");
                false
            }
            IND_RESET => {
                println!("  reset");
                true
            }
            IND_TRANSFER => {
                println!("  transfer {:?}", parameters.unwrap_or("<empty>"));
                events.generate_event(EV_DONE, None);
                true
            }
            IND_DONE => {
                println!("  done");
                true
            }
            _ => false,
        }
    }
}

fn main() {
    let filter =
        EnvFilter::try_from_env("MICROFSM_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .init();

    println!("=== Sensor Link Example ===\n");

    let mut link = SensorLink;
    let mut fsm = match FsmEngine::new(&mut link, MAX_TRANSITIONS, IDLE) {
        Ok(fsm) => fsm,
        Err(e) => {
            eprintln!("failed to create state machine: {e}");
            return;
        }
    };

    let definitions = [
        (IDLE, IDLE, INTERNAL_ERROR, IND_INTERNAL_ERROR),
        (IDLE, WAIT_DEV, EV_RESET, IND_RESET),
        (WAIT_DEV, WAIT_DEV, INTERNAL_ERROR, IND_INTERNAL_ERROR),
        (WAIT_DEV, WAIT_END, EV_TRANSFER, IND_TRANSFER),
        (WAIT_END, IDLE, EV_DONE, IND_DONE),
    ];
    for (from, to, event, handler) in definitions {
        if let Err(e) = fsm.define_transition(from, to, event, handler) {
            eprintln!("failed to define transition: {e}");
            return;
        }
    }

    println!("control(INTERNAL_ERROR)");
    let result = fsm.control(INTERNAL_ERROR, None);
    println!("  -> {result}, state {:#06x}\n", fsm.current_state());

    println!("control(EV_RESET)");
    let result = fsm.control(EV_RESET, None);
    println!("  -> {result}, state {:#06x}\n", fsm.current_state());

    println!("control(EV_RESET) again, no transition from WAIT_DEV");
    let result = fsm.control(EV_RESET, None);
    println!("  -> {result}, state {:#06x}\n", fsm.current_state());

    let frame = String::from("temp=21.5");
    println!("control(EV_TRANSFER)");
    let result = fsm.control(EV_TRANSFER, Some(frame.as_str()));
    println!("  -> {result}, state {:#06x}", fsm.current_state());

    println!("\n=== Example Complete ===");
}
