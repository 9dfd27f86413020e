//! The diff algebra a domain (an aggregation, a cube, a counter table)
//! supplies to the engine. The engine never looks inside `Diff`.

/// Which side wins a conflict that cannot be merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    Left,
    Right,
}

/// Outcome of reconciling two concurrent diffs.
///
/// `Transformed.left` is applied on top of the left branch and
/// `Transformed.right` on top of the right branch; both branches then reach
/// the same state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformResult<T> {
    Transformed { left: T, right: T },
    Conflict(Resolution),
}

impl<T> TransformResult<T> {
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> TransformResult<U> {
        match self {
            Self::Transformed { left, right } => TransformResult::Transformed {
                left: f(left),
                right: f(right),
            },
            Self::Conflict(resolution) => TransformResult::Conflict(resolution),
        }
    }
}

/// List-level OT algebra over one domain diff type.
///
/// Implementations must satisfy:
/// - convergence: for `Transformed { left: l, right: r } = transform(a, b)`,
///   applying `a ++ l` and `b ++ r` yields the same state;
/// - `squash` is associative and preserves the effect of the list;
/// - applying `ops ++ invert(ops)` is a no-op.
pub trait DomainAlgebra: Send + Sync {
    type Diff: Clone + Send + Sync + 'static;

    fn transform(
        &self,
        left: &[Self::Diff],
        right: &[Self::Diff],
    ) -> TransformResult<Vec<Self::Diff>>;

    fn squash(&self, ops: Vec<Self::Diff>) -> Vec<Self::Diff>;

    /// Inverse of the whole list, in the order the domain documents.
    fn invert(&self, ops: &[Self::Diff]) -> Vec<Self::Diff>;

    fn is_empty(&self, op: &Self::Diff) -> bool;
}

/// Domain state that committed diffs are replayed into.
pub trait DomainState<D> {
    fn apply(&mut self, op: &D);
}
