//! Commit-graph contract consumed by the replica driver.
//!
//! The store is external: this crate only fixes the shape of commits and
//! the optimistic push protocol. A push names the parent it was built on;
//! the store either appends it or reports the heads that moved past it.

use std::collections::BTreeSet;
use std::fmt::{Debug, Display};
use std::hash::Hash;

use async_trait::async_trait;
use multilog_core::MultilogResult;

use crate::log_diff::LogDiff;

/// One node of the commit graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit<K, D> {
    pub id: K,
    /// Empty for the root commit.
    pub parents: Vec<K>,
    pub diff: LogDiff<D>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome<K> {
    Pushed(K),
    /// The parent is no longer a head; these are.
    HeadMoved(BTreeSet<K>),
}

#[async_trait]
pub trait CommitStore<D: Send + Sync + 'static>: Send + Sync {
    type Id: Clone + Eq + Ord + Hash + Debug + Display + Send + Sync + 'static;

    /// Current heads; empty for an empty history.
    async fn load_heads(&self) -> MultilogResult<BTreeSet<Self::Id>>;

    async fn load_commit(&self, id: &Self::Id) -> MultilogResult<Commit<Self::Id, D>>;

    /// Append `diff` on top of `parent` (`None` for the first commit).
    async fn push(
        &self,
        parent: Option<&Self::Id>,
        diff: LogDiff<D>,
    ) -> MultilogResult<PushOutcome<Self::Id>>;
}
