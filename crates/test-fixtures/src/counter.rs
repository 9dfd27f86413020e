//! A keyed counter domain: each op adds `delta` to one key.
//!
//! Counter ops commute, so the default algebra never conflicts. The
//! exclusive variant reports a conflict whenever both sides touch the same
//! key, which lets tests drive the domain-conflict path.

use std::collections::{BTreeMap, BTreeSet};

use multilog_core::{DomainAlgebra, DomainState, Resolution, TransformResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CounterOp {
    pub key: String,
    pub delta: i64,
}

impl CounterOp {
    pub fn new(key: impl Into<String>, delta: i64) -> Self {
        Self {
            key: key.into(),
            delta,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CounterAlgebra {
    exclusive_keys: bool,
}

impl CounterAlgebra {
    pub fn new() -> Self {
        Self::default()
    }

    /// Concurrent ops on the same key conflict; the side with the larger
    /// absolute change wins, ties go right.
    pub fn exclusive() -> Self {
        Self {
            exclusive_keys: true,
        }
    }
}

fn magnitude(ops: &[CounterOp]) -> i64 {
    ops.iter().map(|op| op.delta.abs()).sum()
}

impl DomainAlgebra for CounterAlgebra {
    type Diff = CounterOp;

    fn transform(
        &self,
        left: &[CounterOp],
        right: &[CounterOp],
    ) -> TransformResult<Vec<CounterOp>> {
        if self.exclusive_keys {
            let left_keys: BTreeSet<&str> = left.iter().map(|op| op.key.as_str()).collect();
            if right.iter().any(|op| left_keys.contains(op.key.as_str())) {
                let resolution = if magnitude(left) > magnitude(right) {
                    Resolution::Left
                } else {
                    Resolution::Right
                };
                return TransformResult::Conflict(resolution);
            }
        }
        TransformResult::Transformed {
            left: right.to_vec(),
            right: left.to_vec(),
        }
    }

    fn squash(&self, ops: Vec<CounterOp>) -> Vec<CounterOp> {
        let mut totals: BTreeMap<String, i64> = BTreeMap::new();
        for op in ops {
            *totals.entry(op.key).or_default() += op.delta;
        }
        totals
            .into_iter()
            .filter(|(_, delta)| *delta != 0)
            .map(|(key, delta)| CounterOp { key, delta })
            .collect()
    }

    fn invert(&self, ops: &[CounterOp]) -> Vec<CounterOp> {
        ops.iter()
            .rev()
            .map(|op| CounterOp::new(op.key.clone(), -op.delta))
            .collect()
    }

    fn is_empty(&self, op: &CounterOp) -> bool {
        op.delta == 0
    }
}

/// Current counter totals. Keys whose total returns to zero are removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounterState {
    totals: BTreeMap<String, i64>,
}

impl CounterState {
    pub fn get(&self, key: &str) -> i64 {
        self.totals.get(key).copied().unwrap_or(0)
    }

    pub fn totals(&self) -> &BTreeMap<String, i64> {
        &self.totals
    }
}

impl DomainState<CounterOp> for CounterState {
    fn apply(&mut self, op: &CounterOp) {
        let total = self.totals.entry(op.key.clone()).or_default();
        *total += op.delta;
        if *total == 0 {
            self.totals.remove(&op.key);
        }
    }
}
