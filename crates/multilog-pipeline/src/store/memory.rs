//! Linear in-memory commit history.
//!
//! Reference store for tests and single-process embedding; nothing is
//! persisted. Ids count from 1 in push order and every commit has the
//! previous head as its only parent.

use std::collections::BTreeSet;

use async_trait::async_trait;
use multilog_core::errors::StoreError;
use multilog_core::MultilogResult;
use multilog_ot::{Commit, CommitStore, LogDiff, PushOutcome};
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug)]
struct Inner<D> {
    commits: Vec<Commit<u64, D>>,
    rejected_pushes: usize,
}

#[derive(Debug)]
pub struct MemoryCommitStore<D> {
    inner: Mutex<Inner<D>>,
}

impl<D: Clone + Send + Sync + 'static> MemoryCommitStore<D> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                commits: Vec::new(),
                rejected_pushes: 0,
            }),
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.commits.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Every commit, oldest first.
    pub async fn history(&self) -> Vec<Commit<u64, D>> {
        self.inner.lock().await.commits.clone()
    }

    /// Pushes turned away because their parent was no longer the head.
    pub async fn rejected_pushes(&self) -> usize {
        self.inner.lock().await.rejected_pushes
    }
}

impl<D: Clone + Send + Sync + 'static> Default for MemoryCommitStore<D> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<D: Clone + Send + Sync + 'static> CommitStore<D> for MemoryCommitStore<D> {
    type Id = u64;

    async fn load_heads(&self) -> MultilogResult<BTreeSet<u64>> {
        let inner = self.inner.lock().await;
        Ok(inner.commits.last().map(|commit| commit.id).into_iter().collect())
    }

    async fn load_commit(&self, id: &u64) -> MultilogResult<Commit<u64, D>> {
        let inner = self.inner.lock().await;
        usize::try_from(*id)
            .ok()
            .and_then(|id| id.checked_sub(1))
            .and_then(|index| inner.commits.get(index))
            .cloned()
            .ok_or_else(|| StoreError::CommitNotFound(id.to_string()).into())
    }

    async fn push(
        &self,
        parent: Option<&u64>,
        diff: LogDiff<D>,
    ) -> MultilogResult<PushOutcome<u64>> {
        let mut inner = self.inner.lock().await;
        let head = inner.commits.last().map(|commit| commit.id);
        if let Some(&parent) = parent {
            if parent == 0 || parent > head.unwrap_or(0) {
                return Err(StoreError::CommitNotFound(parent.to_string()).into());
            }
        }
        if parent.copied() != head {
            inner.rejected_pushes += 1;
            debug!(?parent, ?head, "push rejected, head moved");
            return Ok(PushOutcome::HeadMoved(head.into_iter().collect()));
        }

        let id = head.unwrap_or(0) + 1;
        inner.commits.push(Commit {
            id,
            parents: parent.into_iter().copied().collect(),
            diff,
        });
        debug!(id, "commit appended");
        Ok(PushOutcome::Pushed(id))
    }
}
