//! Accumulating validation of machine configurations.

use super::violations::ConfigViolation;
use super::MachineConfig;
use crate::core::{StateId, INTERNAL_ERROR};
use crate::error::FsmError;
use std::collections::{BTreeSet, HashSet};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

impl MachineConfig {
    /// Check the configuration against a registry of `handlers` handlers.
    ///
    /// Every violation is collected; a failure carries all of them.
    ///
    /// # Example
    ///
    /// ```rust
    /// use microfsm::config::{ConfigViolation, MachineConfig};
    /// use stillwater::validation::Validation;
    ///
    /// let config = MachineConfig::new(1, 1)
    ///     .with_transition(1, 3, 3, 1)
    ///     .with_transition(1, 3, 4, 9);
    ///
    /// match config.validate(2) {
    ///     Validation::Failure(violations) => assert_eq!(violations.len(), 2),
    ///     Validation::Success(_) => panic!("expected violations"),
    /// }
    /// ```
    pub fn validate(&self, handlers: usize) -> Validation<(), NonEmptyVec<ConfigViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ConfigViolation>>> = Vec::new();

        if self.capacity == 0 {
            checks.push(Validation::fail(ConfigViolation::ZeroCapacity));
        } else if self.transitions.len() > self.capacity {
            checks.push(Validation::fail(ConfigViolation::CapacityExceeded {
                defined: self.transitions.len(),
                capacity: self.capacity,
            }));
        }

        let mut seen = HashSet::new();
        for spec in &self.transitions {
            if !seen.insert((spec.from, spec.event)) {
                checks.push(Validation::fail(ConfigViolation::DuplicateTransition {
                    state: spec.from,
                    event: spec.event,
                }));
            }

            if let Some(index) = spec.handler.filter(|&index| index >= handlers) {
                checks.push(Validation::fail(ConfigViolation::HandlerOutOfRange {
                    state: spec.from,
                    event: spec.event,
                    index,
                    handlers,
                }));
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// [`validate`](MachineConfig::validate) folded into an engine error.
    pub fn check(&self, handlers: usize) -> Result<(), FsmError> {
        match self.validate(handlers) {
            Validation::Success(_) => Ok(()),
            Validation::Failure(violations) => Err(FsmError::InvalidConfig(
                violations.iter().cloned().collect(),
            )),
        }
    }

    /// Reachable states with no handled [`INTERNAL_ERROR`] transition.
    ///
    /// A state is reachable if it is the initial state or the destination of
    /// any transition. Raising an internal error in one of these states drops
    /// the error instead of handling it.
    pub fn coverage_gaps(&self) -> Vec<StateId> {
        let covered: HashSet<StateId> = self
            .transitions
            .iter()
            .filter(|spec| spec.event == INTERNAL_ERROR && spec.handler.is_some())
            .map(|spec| spec.from)
            .collect();

        std::iter::once(self.initial_state)
            .chain(self.transitions.iter().map(|spec| spec.to))
            .filter(|state| !covered.contains(state))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
