use dashmap::DashSet;

use crate::value::{Value, ValueKey};

/// Every normalized value produced so far in a session
///
/// Membership test and insertion happen as one atomic step, so concurrent
/// crossings never store two nodes with the same value.
#[derive(Debug, Default)]
pub struct CandidateIndex {
    values: DashSet<ValueKey>,
}

impl CandidateIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value`. Returns `false` when it was already present.
    pub fn insert(&self, value: &Value) -> bool {
        self.values.insert(value.key())
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.values.contains(&value.key())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
