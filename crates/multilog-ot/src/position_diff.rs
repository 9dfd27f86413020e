//! One partition's read-cursor advance.

use std::cmp::Ordering;
use std::fmt;

use multilog_core::Position;

/// The half-open range `[from, to)` a round consumed from one partition.
///
/// Deliberately not `Ord`: two advances of the same partition are only
/// compared by how far they got, see [`PositionDiff::compare_progress`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PositionDiff {
    from: Position,
    to: Position,
}

impl PositionDiff {
    pub fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }

    pub fn from(&self) -> &Position {
        &self.from
    }

    pub fn to(&self) -> &Position {
        &self.to
    }

    pub fn inverse(&self) -> Self {
        Self {
            from: self.to.clone(),
            to: self.from.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }

    /// Orders by end position only. Tie-break signal for conflicting
    /// advances of the same partition.
    pub fn compare_progress(&self, other: &Self) -> Ordering {
        self.to.cmp(&other.to)
    }

    pub fn into_parts(self) -> (Position, Position) {
        (self.from, self.to)
    }
}

impl fmt::Display for PositionDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.from, self.to)
    }
}
