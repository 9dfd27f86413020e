//! The unit of mergeable work: partition advances plus domain ops.

use std::collections::BTreeMap;

use multilog_core::Position;

use crate::position_diff::PositionDiff;

/// One commit candidate.
///
/// `positions` holds at most one advance per partition; `ops` are in
/// application order. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogDiff<D> {
    positions: BTreeMap<String, PositionDiff>,
    ops: Vec<D>,
}

impl<D> LogDiff<D> {
    pub fn new(positions: BTreeMap<String, PositionDiff>, ops: Vec<D>) -> Self {
        Self { positions, ops }
    }

    /// No advances, no ops.
    pub fn empty() -> Self {
        Self::new(BTreeMap::new(), Vec::new())
    }

    /// Ops that do not move any read cursor.
    pub fn for_current_position(ops: Vec<D>) -> Self {
        Self::new(BTreeMap::new(), ops)
    }

    /// Ops produced by advancing a single partition from `from` to `to`.
    pub fn for_single_position(
        partition: impl Into<String>,
        from: Position,
        to: Position,
        ops: Vec<D>,
    ) -> Self {
        let mut positions = BTreeMap::new();
        positions.insert(partition.into(), PositionDiff::new(from, to));
        Self::new(positions, ops)
    }

    /// Advances keyed by partition name, in name order.
    pub fn positions(&self) -> &BTreeMap<String, PositionDiff> {
        &self.positions
    }

    pub fn position(&self, partition: &str) -> Option<&PositionDiff> {
        self.positions.get(partition)
    }

    pub fn partitions(&self) -> impl Iterator<Item = &str> {
        self.positions.keys().map(String::as_str)
    }

    pub fn ops(&self) -> &[D] {
        &self.ops
    }

    pub fn into_parts(self) -> (BTreeMap<String, PositionDiff>, Vec<D>) {
        (self.positions, self.ops)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multilog_core::LogFile;

    #[test]
    fn constructors() {
        let empty: LogDiff<u8> = LogDiff::empty();
        assert!(empty.positions().is_empty() && empty.ops().is_empty());

        let ops_only = LogDiff::for_current_position(vec![1u8, 2]);
        assert!(ops_only.positions().is_empty());
        assert_eq!(ops_only.ops(), &[1, 2]);

        let to = Position::new(LogFile::new("f", 0), 10);
        let single = LogDiff::for_single_position("p", Position::initial(), to.clone(), vec![3u8]);
        assert_eq!(single.partitions().collect::<Vec<_>>(), ["p"]);
        assert_eq!(single.position("p").map(PositionDiff::to), Some(&to));
        assert_eq!(single.position("q"), None);
    }
}
