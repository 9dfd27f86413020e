//! `OtSystem<LogDiff<D>>` derived from a domain algebra.
//!
//! Partition advances decide whether two concurrent diffs are independent:
//! diffs over disjoint partitions are transformed by the domain, diffs that
//! share a partition always conflict. Shared partitions must have branched
//! from the same position; anything else is a protocol error.

use std::cmp::Ordering;

use multilog_core::errors::OtError;
use multilog_core::{DomainAlgebra, OtSystem, Resolution, TransformResult};

use crate::log_diff::LogDiff;
use crate::position_diff::PositionDiff;

/// Log-level algebra over one domain, chosen at compile time.
#[derive(Debug, Clone, Default)]
pub struct LogAlgebra<A> {
    domain: A,
}

impl<A: DomainAlgebra> LogAlgebra<A> {
    pub fn new(domain: A) -> Self {
        Self { domain }
    }

    pub fn domain(&self) -> &A {
        &self.domain
    }

    /// Tie-break over shared partitions: the side that got further on more
    /// partitions wins, ties go right. A policy, not a correctness rule;
    /// any deterministic choice converges.
    fn resolve_shared(
        &self,
        left: &LogDiff<A::Diff>,
        right: &LogDiff<A::Diff>,
    ) -> Result<Option<Resolution>, OtError> {
        let mut shared = 0usize;
        let mut cmp = 0i64;
        for (partition, left_diff) in left.positions() {
            let Some(right_diff) = right.position(partition) else {
                continue;
            };
            if left_diff.from() != right_diff.from() {
                return Err(OtError::AnchorMismatch {
                    partition: partition.clone(),
                    left: left_diff.from().clone(),
                    right: right_diff.from().clone(),
                });
            }
            shared += 1;
            cmp += match left_diff.compare_progress(right_diff) {
                Ordering::Greater => 1,
                Ordering::Less => -1,
                Ordering::Equal => 0,
            };
        }

        if shared == 0 {
            return Ok(None);
        }
        let resolution = if cmp > 0 {
            Resolution::Left
        } else {
            Resolution::Right
        };
        tracing::debug!(shared, cmp, ?resolution, "concurrent diffs share partitions");
        Ok(Some(resolution))
    }
}

impl<A: DomainAlgebra> OtSystem<LogDiff<A::Diff>> for LogAlgebra<A> {
    fn transform(
        &self,
        left: &LogDiff<A::Diff>,
        right: &LogDiff<A::Diff>,
    ) -> Result<TransformResult<LogDiff<A::Diff>>, OtError> {
        if let Some(resolution) = self.resolve_shared(left, right)? {
            return Ok(TransformResult::Conflict(resolution));
        }

        Ok(match self.domain.transform(left.ops(), right.ops()) {
            TransformResult::Transformed {
                left: left_ops,
                right: right_ops,
            } => TransformResult::Transformed {
                left: LogDiff::new(right.positions().clone(), left_ops),
                right: LogDiff::new(left.positions().clone(), right_ops),
            },
            TransformResult::Conflict(resolution) => {
                tracing::debug!(?resolution, "domain ops conflict");
                TransformResult::Conflict(resolution)
            }
        })
    }

    fn squash(
        &self,
        first: &LogDiff<A::Diff>,
        second: &LogDiff<A::Diff>,
    ) -> Result<LogDiff<A::Diff>, OtError> {
        let mut positions = first.positions().clone();
        for (partition, second_diff) in second.positions() {
            match positions.remove(partition) {
                Some(first_diff) => {
                    if first_diff.to() != second_diff.from() {
                        return Err(OtError::ContinuityViolation {
                            partition: partition.clone(),
                            expected: first_diff.to().clone(),
                            found: second_diff.from().clone(),
                        });
                    }
                    let (from, _) = first_diff.into_parts();
                    let merged = PositionDiff::new(from, second_diff.to().clone());
                    if !merged.is_empty() {
                        positions.insert(partition.clone(), merged);
                    }
                }
                None => {
                    positions.insert(partition.clone(), second_diff.clone());
                }
            }
        }

        let ops = first
            .ops()
            .iter()
            .chain(second.ops())
            .cloned()
            .collect();
        Ok(LogDiff::new(positions, self.domain.squash(ops)))
    }

    fn invert(&self, diff: &LogDiff<A::Diff>) -> LogDiff<A::Diff> {
        let positions = diff
            .positions()
            .iter()
            .map(|(partition, position_diff)| (partition.clone(), position_diff.inverse()))
            .collect();
        LogDiff::new(positions, self.domain.invert(diff.ops()))
    }

    fn is_empty(&self, diff: &LogDiff<A::Diff>) -> bool {
        diff.positions().is_empty() && diff.ops().iter().all(|op| self.domain.is_empty(op))
    }

    fn identity(&self) -> LogDiff<A::Diff> {
        LogDiff::empty()
    }
}
