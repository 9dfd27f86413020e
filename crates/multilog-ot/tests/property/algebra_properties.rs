//! Property tests for `LogAlgebra`: convergence, invertibility, continuity,
//! conflict determinism, codec round trip.

use std::collections::BTreeMap;

use proptest::prelude::*;

use multilog_core::{LogFile, OtSystem, Position, TransformResult};
use multilog_ot::{JsonCodec, LogAlgebra, LogDiff, LogDiffCodec, PositionDiff};
use test_fixtures::{CounterAlgebra, CounterOp};

static PARTITIONS: [&str; 6] = ["a", "b", "c", "d", "e", "f"];

fn algebra() -> LogAlgebra<CounterAlgebra> {
    LogAlgebra::new(CounterAlgebra::new())
}

fn position_strategy() -> impl Strategy<Value = Position> {
    (prop::sample::select(vec!["x", "y"]), 0u32..3, 0i64..1_000)
        .prop_map(|(file, generation, offset)| Position::new(LogFile::new(file, generation), offset))
}

fn ops_strategy() -> impl Strategy<Value = Vec<CounterOp>> {
    prop::collection::vec(
        (prop::sample::select(vec!["k1", "k2", "k3"]), -50i64..50)
            .prop_map(|(key, delta)| CounterOp::new(key, delta)),
        0..6,
    )
}

/// A diff over a random subset of `names`. Every advance is non-empty, as
/// rounds never record a partition that did not move.
fn diff_over(
    names: &'static [&'static str],
) -> impl Strategy<Value = LogDiff<CounterOp>> {
    (
        prop::collection::vec((position_strategy(), position_strategy()), names.len()),
        prop::collection::vec(any::<bool>(), names.len()),
        ops_strategy(),
    )
        .prop_map(move |(ranges, mask, ops)| {
            let positions = names
                .iter()
                .zip(ranges)
                .zip(mask)
                .filter(|((_, (from, to)), keep)| *keep && from != to)
                .map(|((name, (from, to)), _)| (name.to_string(), PositionDiff::new(from, to)))
                .collect();
            LogDiff::new(positions, ops)
        })
}

/// Rebuild `diff` on top of `base`: every shared partition starts where
/// `base` ends.
fn chained_after(base: &LogDiff<CounterOp>, diff: LogDiff<CounterOp>) -> LogDiff<CounterOp> {
    let (positions, ops) = diff.into_parts();
    let positions: BTreeMap<String, PositionDiff> = positions
        .into_iter()
        .map(|(name, position_diff)| match base.position(&name) {
            Some(prior) => {
                let (_, to) = position_diff.into_parts();
                (name, PositionDiff::new(prior.to().clone(), to))
            }
            None => (name, position_diff),
        })
        .collect();
    LogDiff::new(positions, ops)
}

/// Rebuild `diff` so shared partitions start where `anchor` starts. Shared
/// partitions that would not move are dropped.
fn anchored_like(anchor: &LogDiff<CounterOp>, diff: LogDiff<CounterOp>) -> LogDiff<CounterOp> {
    let (positions, ops) = diff.into_parts();
    let positions: BTreeMap<String, PositionDiff> = positions
        .into_iter()
        .filter_map(|(name, position_diff)| match anchor.position(&name) {
            Some(other) => {
                let (_, to) = position_diff.into_parts();
                let anchored = PositionDiff::new(other.from().clone(), to);
                (!anchored.is_empty()).then_some((name, anchored))
            }
            None => Some((name, position_diff)),
        })
        .collect();
    LogDiff::new(positions, ops)
}

proptest! {
    #[test]
    fn position_diff_empty_iff_equal(from in position_strategy(), to in position_strategy()) {
        prop_assert_eq!(PositionDiff::new(from.clone(), to.clone()).is_empty(), from == to);
        prop_assert!(PositionDiff::new(from.clone(), from).is_empty());
    }
}

proptest! {
    #[test]
    fn disjoint_partitions_converge(
        left in diff_over(&PARTITIONS[..3]),
        right in diff_over(&PARTITIONS[3..]),
    ) {
        let algebra = algebra();
        let result = algebra.transform(&left, &right).unwrap();
        let TransformResult::Transformed { left: left_next, right: right_next } = result else {
            return Err(TestCaseError::fail("disjoint diffs conflicted"));
        };

        let left_branch = algebra.squash(&left, &left_next).unwrap();
        let right_branch = algebra.squash(&right, &right_next).unwrap();
        prop_assert_eq!(left_branch.positions(), right_branch.positions());
        prop_assert_eq!(
            left_branch.positions().len(),
            left.positions().len() + right.positions().len()
        );
        prop_assert_eq!(left_branch.ops(), right_branch.ops());
    }
}

proptest! {
    #[test]
    fn squash_with_inverse_is_empty(diff in diff_over(&PARTITIONS)) {
        let algebra = algebra();
        let undone = algebra.squash(&diff, &algebra.invert(&diff)).unwrap();
        prop_assert!(algebra.is_empty(&undone));
    }
}

proptest! {
    #[test]
    fn chained_diffs_squash_end_to_end(
        first in diff_over(&PARTITIONS),
        second in diff_over(&PARTITIONS),
    ) {
        let second = chained_after(&first, second);
        let squashed = algebra().squash(&first, &second).unwrap();
        for (name, second_diff) in second.positions() {
            if let Some(first_diff) = first.position(name) {
                let expected = PositionDiff::new(first_diff.from().clone(), second_diff.to().clone());
                if expected.is_empty() {
                    prop_assert!(squashed.position(name).is_none());
                } else {
                    prop_assert_eq!(squashed.position(name), Some(&expected));
                }
            }
        }
    }
}

proptest! {
    #[test]
    fn conflicts_are_deterministic(
        left in diff_over(&PARTITIONS),
        right in diff_over(&PARTITIONS),
    ) {
        let right = anchored_like(&left, right);
        let algebra = algebra();
        let first = algebra.transform(&left, &right).unwrap();
        let second = algebra.transform(&left, &right).unwrap();
        prop_assert_eq!(&first, &second);

        let shares = left.partitions().any(|name| right.position(name).is_some());
        prop_assert_eq!(first.is_conflict(), shares);
    }
}

proptest! {
    #[test]
    fn merge_converges(
        left in diff_over(&PARTITIONS),
        right in diff_over(&PARTITIONS),
    ) {
        let right = anchored_like(&left, right);
        let algebra = algebra();
        let merge = algebra.merge(&left, &right).unwrap();
        let left_branch = algebra.squash(&left, &merge.left).unwrap();
        let right_branch = algebra.squash(&right, &merge.right).unwrap();
        prop_assert_eq!(left_branch.positions(), right_branch.positions());
        prop_assert_eq!(left_branch.ops(), right_branch.ops());
    }
}

proptest! {
    #[test]
    fn codec_round_trip(diff in diff_over(&PARTITIONS)) {
        let codec: LogDiffCodec<JsonCodec<CounterOp>> = LogDiffCodec::json();
        let text = codec.encode_to_string(&diff).unwrap();
        prop_assert_eq!(codec.decode_str(&text).unwrap(), diff);
    }
}
