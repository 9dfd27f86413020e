//! # multilog-ot
//!
//! Log diffs that track per-partition read progress next to domain ops,
//! and the OT algebra over them:
//! - `PositionDiff`: one partition's `[from, to)` advance
//! - `LogDiff`: partition advances plus an ordered list of domain ops
//! - `LogAlgebra`: `OtSystem<LogDiff<D>>` derived from a `DomainAlgebra`
//! - `ReplicaState`: replays committed diffs
//! - `LogDiffCodec`: strict JSON wire codec
//! - `CommitStore`: the commit-graph contract the replica driver talks to

pub mod algebra;
pub mod codec;
pub mod log_diff;
pub mod position_diff;
pub mod replica_state;
pub mod store;

pub use algebra::LogAlgebra;
pub use codec::{DomainCodec, JsonCodec, LogDiffCodec};
pub use log_diff::LogDiff;
pub use position_diff::PositionDiff;
pub use replica_state::ReplicaState;
pub use store::{Commit, CommitStore, PushOutcome};
