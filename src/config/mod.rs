//! Declarative machine configuration.
//!
//! A [`MachineConfig`] describes the table capacity, the initial state and
//! every transition, and can be loaded from JSON. Configurations are
//! validated with Stillwater's `Validation` so all problems are reported at
//! once before an engine is built from them.
//!
//! # Example
//!
//! ```rust
//! use microfsm::config::MachineConfig;
//! use microfsm::engine::{FsmEngine, HandlerTable};
//!
//! let config = MachineConfig::from_json(
//!     r#"{
//!         "capacity": 26,
//!         "initial_state": 1,
//!         "transitions": [
//!             { "from": 1, "to": 1, "event": 0, "handler": 0 },
//!             { "from": 1, "to": 3, "event": 3, "handler": 1 }
//!         ]
//!     }"#,
//! )
//! .unwrap();
//!
//! let mut handlers = HandlerTable::<()>::new()
//!     .with(|_, _| false)
//!     .with(|_, _| true);
//! let mut fsm = FsmEngine::from_config(&mut handlers, &config).unwrap();
//!
//! assert!(fsm.control(3, None));
//! assert_eq!(fsm.current_state(), 3);
//! ```

use crate::core::{EventId, HandlerIndex, StateId};
use serde::{Deserialize, Serialize};

pub mod error;
mod validation;
pub mod violations;

pub use error::ConfigError;
pub use violations::ConfigViolation;

/// One transition in a [`MachineConfig`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionSpec {
    pub from: StateId,
    pub to: StateId,
    pub event: EventId,
    /// Omitted or `null` declares an unassigned transition
    #[serde(default)]
    pub handler: Option<HandlerIndex>,
}

/// Everything needed to build an [`FsmEngine`](crate::engine::FsmEngine)
/// apart from its handlers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineConfig {
    /// Number of transition table slots
    pub capacity: usize,

    /// State the machine starts in
    pub initial_state: StateId,

    /// Keep this many dispatch records when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_limit: Option<usize>,

    /// Transitions, inserted in order
    #[serde(default)]
    pub transitions: Vec<TransitionSpec>,
}

impl MachineConfig {
    pub fn new(capacity: usize, initial_state: StateId) -> Self {
        Self {
            capacity,
            initial_state,
            history_limit: None,
            transitions: Vec::new(),
        }
    }

    /// Add a transition bound to a handler.
    pub fn with_transition(
        mut self,
        from: StateId,
        to: StateId,
        event: EventId,
        handler: HandlerIndex,
    ) -> Self {
        self.transitions.push(TransitionSpec {
            from,
            to,
            event,
            handler: Some(handler),
        });
        self
    }

    /// Add a transition with no handler.
    pub fn with_unassigned(mut self, from: StateId, to: StateId, event: EventId) -> Self {
        self.transitions.push(TransitionSpec {
            from,
            to,
            event,
            handler: None,
        });
        self
    }

    /// Record up to `limit` dispatched transitions.
    pub fn with_history(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_methods_collect_transitions() {
        let config = MachineConfig::new(8, 1)
            .with_transition(1, 3, 3, 1)
            .with_unassigned(1, 3, 4)
            .with_history(16);

        assert_eq!(config.transitions.len(), 2);
        assert_eq!(config.transitions[0].handler, Some(1));
        assert_eq!(config.transitions[1].handler, None);
        assert_eq!(config.history_limit, Some(16));
    }

    #[test]
    fn missing_optional_fields_use_defaults() {
        let config = MachineConfig::from_json(r#"{ "capacity": 4, "initial_state": 2 }"#).unwrap();

        assert_eq!(config, MachineConfig::new(4, 2));
    }

    #[test]
    fn omitted_handler_is_unassigned() {
        let config = MachineConfig::from_json(
            r#"{ "capacity": 4, "initial_state": 1,
                 "transitions": [{ "from": 1, "to": 3, "event": 4 }] }"#,
        )
        .unwrap();

        assert_eq!(config.transitions[0].handler, None);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let result = MachineConfig::from_json(r#"{ "capacity": "many" }"#);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn config_survives_json() {
        let config = MachineConfig::new(26, 1)
            .with_transition(1, 1, 0, 0)
            .with_unassigned(1, 3, 4)
            .with_history(8);

        let json = config.to_json().unwrap();
        assert_eq!(MachineConfig::from_json(&json).unwrap(), config);
    }
}
