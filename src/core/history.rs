//! Bounded record of dispatched transitions.
//!
//! History is opt-in. When enabled on an engine, every handler invocation
//! appends one [`DispatchRecord`]; the oldest records are evicted once the
//! configured limit is reached so memory stays fixed.

use super::transition::{EventId, HandlerIndex, StateId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// A single dispatched transition.
///
/// # Example
///
/// ```rust
/// use microfsm::core::DispatchRecord;
/// use chrono::Utc;
///
/// let record = DispatchRecord {
///     from: 1,
///     to: 3,
///     event: 3,
///     handler: 1,
///     outcome: true,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(record.to, 3);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DispatchRecord {
    /// State before the transition
    pub from: StateId,
    /// State after the transition
    pub to: StateId,
    /// Event that triggered the transition
    pub event: EventId,
    /// Handler that ran
    pub handler: HandlerIndex,
    /// Value returned by the handler
    pub outcome: bool,
    /// When the handler returned
    pub timestamp: DateTime<Utc>,
}

/// Ring of the most recent dispatch records.
///
/// # Example
///
/// ```rust
/// use microfsm::core::{DispatchHistory, DispatchRecord};
/// use chrono::Utc;
///
/// let mut history = DispatchHistory::new(2);
/// for (from, to) in [(1, 2), (2, 3), (3, 4)] {
///     history.record(DispatchRecord {
///         from,
///         to,
///         event: 7,
///         handler: 0,
///         outcome: true,
///         timestamp: Utc::now(),
///     });
/// }
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.get_path(), vec![2, 3, 4]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "StoredHistory")]
pub struct DispatchHistory {
    records: VecDeque<DispatchRecord>,
    limit: usize,
}

/// Unchecked serialized form, bounded on conversion.
#[derive(Deserialize)]
struct StoredHistory {
    records: VecDeque<DispatchRecord>,
    limit: usize,
}

impl From<StoredHistory> for DispatchHistory {
    fn from(stored: StoredHistory) -> Self {
        let mut history = Self::new(stored.limit);
        for record in stored.records {
            history.record(record);
        }
        history
    }
}

impl DispatchHistory {
    /// Create an empty history keeping at most `limit` records.
    ///
    /// A limit of zero is raised to one.
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            records: VecDeque::with_capacity(limit),
            limit,
        }
    }

    /// Append a record, evicting the oldest one when full.
    pub fn record(&mut self, record: DispatchRecord) {
        while self.records.len() >= self.limit {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Records in dispatch order, oldest first.
    pub fn records(&self) -> impl Iterator<Item = &DispatchRecord> {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&DispatchRecord> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// States traversed by the retained records.
    ///
    /// Starts with the `from` state of the oldest record, followed by the
    /// `to` state of every record.
    pub fn get_path(&self) -> Vec<StateId> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(first.from);
        }
        path.extend(self.records.iter().map(|record| record.to));
        path
    }

    /// Time between the oldest and newest retained records.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
