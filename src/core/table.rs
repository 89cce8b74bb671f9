//! Fixed-capacity, open-addressed transition table.
//!
//! Transitions are keyed by `(source state, event)` and placed with linear
//! probing. Insertion and lookup start from the same base slot,
//! `((event << 8) + state) % capacity`, so every inserted transition is
//! reachable by walking the same probe sequence.
//!
//! The mixing function is weak for small id spaces: states and events that
//! differ only above bit 24 of the combined key, or keys that are congruent
//! modulo the capacity, share a base slot and fall back to probing. Changing
//! the formula would change slot placement for existing configurations, so it
//! is kept as is.

use super::transition::{EventId, StateId, Transition};
use crate::error::FsmError;

/// Open-addressed table of transitions with an explicit occupancy per slot.
///
/// The table never grows and never deletes: once full, further inserts fail
/// with [`FsmError::TableFull`] and leave the table untouched.
///
/// # Example
///
/// ```rust
/// use microfsm::core::{Transition, TransitionTable};
///
/// let mut table = TransitionTable::new(26).unwrap();
/// let slot = table.insert(Transition::new(1, 3, 3, 1)).unwrap();
///
/// assert_eq!(slot, 15); // ((3 << 8) + 1) % 26
/// assert_eq!(table.lookup(1, 3).map(|t| t.destination), Some(3));
/// assert!(table.lookup(3, 3).is_none());
/// ```
#[derive(Clone, Debug)]
pub struct TransitionTable {
    slots: Box<[Option<Transition>]>,
    len: usize,
}

impl TransitionTable {
    /// Create an empty table with `capacity` slots.
    pub fn new(capacity: usize) -> Result<Self, FsmError> {
        if capacity == 0 {
            return Err(FsmError::ZeroCapacity);
        }

        Ok(Self {
            slots: vec![None; capacity].into_boxed_slice(),
            len: 0,
        })
    }

    /// Number of slots, fixed at construction.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// Base slot shared by insertion and lookup.
    ///
    /// Computed in wrapping 32-bit arithmetic before the modulo.
    fn base_slot(&self, state: StateId, event: EventId) -> usize {
        let key = (event << 8).wrapping_add(state);
        key as usize % self.slots.len()
    }

    /// Slot indices in probe order, starting at the base slot.
    fn probe(&self, state: StateId, event: EventId) -> impl Iterator<Item = usize> {
        let capacity = self.slots.len();
        let base = self.base_slot(state, event);
        (0..capacity).map(move |i| (base + i) % capacity)
    }

    /// Insert a transition, returning the slot it landed in.
    ///
    /// Fails with [`FsmError::DuplicateTransition`] if the `(source, event)`
    /// pair is already present and with [`FsmError::TableFull`] if a whole
    /// probe cycle finds no free slot. Neither failure mutates the table.
    pub fn insert(&mut self, transition: Transition) -> Result<usize, FsmError> {
        let mut free = None;

        for index in self.probe(transition.source, transition.event) {
            match &self.slots[index] {
                None => {
                    free = Some(index);
                    break;
                }
                // No deletions, so an existing entry for this key always sits
                // before the first free slot of its probe sequence.
                Some(existing) if existing.matches(transition.source, transition.event) => {
                    return Err(FsmError::DuplicateTransition {
                        state: transition.source,
                        event: transition.event,
                        slot: index,
                    });
                }
                Some(_) => {}
            }
        }

        let index = free.ok_or(FsmError::TableFull {
            capacity: self.capacity(),
            state: transition.source,
            event: transition.event,
        })?;

        self.slots[index] = Some(transition);
        self.len += 1;
        Ok(index)
    }

    /// Find the transition for `event` while in `state`.
    ///
    /// Probes the full cycle and only stops on an occupied slot whose source
    /// state and event both match. A returned transition may still have no
    /// handler assigned; callers must tell that apart from `None`.
    pub fn lookup(&self, state: StateId, event: EventId) -> Option<&Transition> {
        self.probe(state, event)
            .filter_map(|index| self.slots[index].as_ref())
            .find(|transition| transition.matches(state, event))
    }

    /// Contents of a single slot.
    pub fn slot(&self, index: usize) -> Option<&Transition> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Occupied slots with their indices, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Transition)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|transition| (index, transition)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transition::INTERNAL_ERROR;

    const IDLE: StateId = 0x0001;
    const WAIT_DEV: StateId = 0x0003;
    const EV_RESET: EventId = 0x0003;
    const EV_TRANSFER: EventId = 0x0004;

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(matches!(
            TransitionTable::new(0),
            Err(FsmError::ZeroCapacity)
        ));
    }

    #[test]
    fn insert_uses_shifted_hash_as_base_slot() {
        let mut table = TransitionTable::new(26).unwrap();

        // (0 << 8) + 1 = 1
        assert_eq!(
            table
                .insert(Transition::new(IDLE, IDLE, INTERNAL_ERROR, 0))
                .unwrap(),
            1
        );
        // (3 << 8) + 1 = 769 = 29 * 26 + 15
        assert_eq!(
            table
                .insert(Transition::new(IDLE, WAIT_DEV, EV_RESET, 1))
                .unwrap(),
            15
        );
        // (4 << 8) + 1 = 1025 = 39 * 26 + 11
        assert_eq!(
            table
                .insert(Transition::new(IDLE, WAIT_DEV, EV_TRANSFER, 2))
                .unwrap(),
            11
        );
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn lookup_finds_inserted_transitions() {
        let mut table = TransitionTable::new(26).unwrap();
        table
            .insert(Transition::new(IDLE, WAIT_DEV, EV_RESET, 1))
            .unwrap();
        table
            .insert(Transition::new(IDLE, WAIT_DEV, EV_TRANSFER, 2))
            .unwrap();

        let reset = table.lookup(IDLE, EV_RESET).unwrap();
        assert_eq!(reset.destination, WAIT_DEV);
        assert_eq!(reset.handler, Some(1));

        let transfer = table.lookup(IDLE, EV_TRANSFER).unwrap();
        assert_eq!(transfer.handler, Some(2));
    }

    #[test]
    fn lookup_misses_unknown_pairs() {
        let mut table = TransitionTable::new(8).unwrap();
        table
            .insert(Transition::new(IDLE, WAIT_DEV, EV_RESET, 1))
            .unwrap();

        assert!(table.lookup(WAIT_DEV, EV_RESET).is_none());
        assert!(table.lookup(IDLE, EV_TRANSFER).is_none());
    }

    #[test]
    fn colliding_keys_probe_linearly_and_wrap() {
        let mut table = TransitionTable::new(4).unwrap();

        // Base slot 3 for all of these: state 3, 7, 11 with event 0.
        assert_eq!(table.insert(Transition::new(3, 0, 0, 0)).unwrap(), 3);
        assert_eq!(table.insert(Transition::new(7, 0, 0, 1)).unwrap(), 0);
        assert_eq!(table.insert(Transition::new(11, 0, 0, 2)).unwrap(), 1);

        assert_eq!(table.lookup(3, 0).unwrap().handler, Some(0));
        assert_eq!(table.lookup(7, 0).unwrap().handler, Some(1));
        assert_eq!(table.lookup(11, 0).unwrap().handler, Some(2));
        assert_eq!(table.slot(1).map(|t| t.source), Some(11));
    }

    #[test]
    fn full_table_rejects_insert_without_mutation() {
        let mut table = TransitionTable::new(2).unwrap();
        table.insert(Transition::new(1, 1, 1, 0)).unwrap();
        table.insert(Transition::new(2, 2, 1, 0)).unwrap();
        assert!(table.is_full());

        let before: Vec<_> = table.iter().map(|(i, t)| (i, *t)).collect();
        let result = table.insert(Transition::new(3, 3, 1, 0));

        assert!(matches!(
            result,
            Err(FsmError::TableFull {
                capacity: 2,
                state: 3,
                event: 1
            })
        ));
        let after: Vec<_> = table.iter().map(|(i, t)| (i, *t)).collect();
        assert_eq!(before, after);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn duplicate_pair_is_rejected() {
        let mut table = TransitionTable::new(8).unwrap();
        let slot = table.insert(Transition::new(IDLE, WAIT_DEV, EV_RESET, 1)).unwrap();

        let result = table.insert(Transition::new(IDLE, IDLE, EV_RESET, 2));

        assert!(matches!(
            result,
            Err(FsmError::DuplicateTransition { slot: s, .. }) if s == slot
        ));
        assert_eq!(table.lookup(IDLE, EV_RESET).unwrap().destination, WAIT_DEV);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn unassigned_transition_is_found_without_handler() {
        let mut table = TransitionTable::new(8).unwrap();
        table
            .insert(Transition::unassigned(IDLE, WAIT_DEV, EV_TRANSFER))
            .unwrap();

        let found = table.lookup(IDLE, EV_TRANSFER).unwrap();
        assert!(!found.is_assigned());
    }

    #[test]
    fn shift_overflow_wraps_instead_of_panicking() {
        let mut table = TransitionTable::new(5).unwrap();
        let event = u32::MAX;
        let state = u32::MAX;

        let slot = table.insert(Transition::new(state, 0, event, 0)).unwrap();
        let expected = ((event << 8).wrapping_add(state)) as usize % 5;

        assert_eq!(slot, expected);
        assert!(table.lookup(state, event).is_some());
    }

    #[test]
    fn slot_and_iter_expose_occupancy() {
        let mut table = TransitionTable::new(4).unwrap();
        assert!(table.is_empty());
        table.insert(Transition::new(1, 2, 0, 0)).unwrap();

        assert!(table.slot(1).is_some());
        assert!(table.slot(0).is_none());
        assert!(table.slot(99).is_none());
        assert_eq!(table.iter().count(), 1);
    }
}
