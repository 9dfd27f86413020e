//! Generic OT contract exposed to commit-graph reconcilers.

use super::domain::{Resolution, TransformResult};
use crate::errors::OtError;

/// A reconciled pair, possibly produced by resolving a conflict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Merge<T> {
    /// Applied on top of the left branch.
    pub left: T,
    /// Applied on top of the right branch.
    pub right: T,
    /// Set when `transform` reported a conflict and the loser was undone.
    pub resolution: Option<Resolution>,
}

pub trait OtSystem<T> {
    fn transform(&self, left: &T, right: &T) -> Result<TransformResult<T>, OtError>;

    /// Combine two sequential diffs (`first` then `second`) into one.
    fn squash(&self, first: &T, second: &T) -> Result<T, OtError>;

    fn invert(&self, diff: &T) -> T;

    fn is_empty(&self, diff: &T) -> bool;

    /// The diff that changes nothing.
    fn identity(&self) -> T;

    /// Fold a sequence of sequential diffs into one, oldest first.
    fn squash_all<'a, I>(&self, diffs: I) -> Result<T, OtError>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        diffs
            .into_iter()
            .try_fold(self.identity(), |acc, diff| self.squash(&acc, diff))
    }

    /// `transform`, with conflicts turned into a convergent pair: the losing
    /// branch applies its own inverse followed by the winner, the winning
    /// branch applies nothing.
    fn merge(&self, left: &T, right: &T) -> Result<Merge<T>, OtError> {
        match self.transform(left, right)? {
            TransformResult::Transformed { left, right } => Ok(Merge {
                left,
                right,
                resolution: None,
            }),
            TransformResult::Conflict(Resolution::Left) => Ok(Merge {
                left: self.identity(),
                right: self.squash(&self.invert(right), left)?,
                resolution: Some(Resolution::Left),
            }),
            TransformResult::Conflict(Resolution::Right) => Ok(Merge {
                left: self.squash(&self.invert(left), right)?,
                right: self.identity(),
                resolution: Some(Resolution::Right),
            }),
        }
    }
}
