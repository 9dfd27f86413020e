//! Reducer that replays committed diffs into positions and domain state.

use std::collections::BTreeMap;

use multilog_core::{DomainState, Position};

use crate::log_diff::LogDiff;

/// Per-partition positions plus domain state of one replica.
///
/// Only [`ReplicaState::apply`] mutates it; undo means applying the
/// inverted diff.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplicaState<S> {
    positions: BTreeMap<String, Position>,
    domain: S,
}

impl<S> ReplicaState<S> {
    pub fn new(domain: S) -> Self {
        Self {
            positions: BTreeMap::new(),
            domain,
        }
    }

    /// Advance every touched partition to the diff's end position, then
    /// replay its ops. Diffs must be applied in commit order.
    pub fn apply<D>(&mut self, diff: &LogDiff<D>)
    where
        S: DomainState<D>,
    {
        for (partition, position_diff) in diff.positions() {
            self.positions
                .insert(partition.clone(), position_diff.to().clone());
        }
        for op in diff.ops() {
            self.domain.apply(op);
        }
    }

    pub fn positions(&self) -> &BTreeMap<String, Position> {
        &self.positions
    }

    /// Committed position of a partition, `Position::initial()` if it was
    /// never advanced.
    pub fn position(&self, partition: &str) -> Position {
        self.positions
            .get(partition)
            .cloned()
            .unwrap_or_else(Position::initial)
    }

    pub fn domain(&self) -> &S {
        &self.domain
    }

    pub fn into_parts(self) -> (BTreeMap<String, Position>, S) {
        (self.positions, self.domain)
    }
}
