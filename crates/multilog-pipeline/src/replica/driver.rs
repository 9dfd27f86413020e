//! Checkout, commit, rebase, retry.
//!
//! The replica's state always equals the replay of the store's history up
//! to `revision`. It changes only when a commit is pushed or when a
//! rejected push pulls in the commits that moved the head, so dropping a
//! `commit` or `run_round` future at any await leaves it consistent.

use std::collections::BTreeSet;
use std::sync::Arc;

use multilog_core::config::RetryConfig;
use multilog_core::errors::StoreError;
use multilog_core::{
    DomainAlgebra, DomainState, MultilogResult, OtSystem, RecordConsumer, StreamSource,
};
use multilog_ot::{CommitStore, LogAlgebra, LogDiff, PushOutcome, ReplicaState};
use tracing::{debug, info, instrument, warn};

use super::outcome::CommitOutcome;
use crate::round::RoundProcessor;

pub struct Replica<St, A, S>
where
    A: DomainAlgebra,
    St: CommitStore<A::Diff>,
{
    store: Arc<St>,
    algebra: LogAlgebra<A>,
    retry: RetryConfig,
    state: ReplicaState<S>,
    revision: Option<St::Id>,
}

impl<St, A, S> Replica<St, A, S>
where
    A: DomainAlgebra,
    St: CommitStore<A::Diff>,
    S: DomainState<A::Diff> + Default + Send,
{
    /// Rebuild state from the store's single head.
    #[instrument(skip_all)]
    pub async fn checkout(store: Arc<St>, domain: A, retry: RetryConfig) -> MultilogResult<Self> {
        let head = single_head(store.load_heads().await?)?;
        let mut replica = Self {
            store,
            algebra: LogAlgebra::new(domain),
            retry,
            state: ReplicaState::new(S::default()),
            revision: None,
        };

        if let Some(head) = head {
            let history = replica.commits_between(None, &head).await?;
            for diff in &history {
                replica.state.apply(diff);
            }
            info!(%head, commits = history.len(), "checked out");
            replica.revision = Some(head);
        } else {
            info!("checked out empty history");
        }
        Ok(replica)
    }

    pub fn state(&self) -> &ReplicaState<S> {
        &self.state
    }

    /// Last commit folded into the state; `None` before the first commit.
    pub fn revision(&self) -> Option<&St::Id> {
        self.revision.as_ref()
    }

    pub fn algebra(&self) -> &LogAlgebra<A> {
        &self.algebra
    }

    pub fn store(&self) -> &Arc<St> {
        &self.store
    }

    /// Read one round from the committed positions and commit it.
    pub async fn run_round<Src, C>(
        &mut self,
        processor: &RoundProcessor<Src>,
        partitions: &[String],
        consumer: &mut C,
    ) -> MultilogResult<CommitOutcome<St::Id>>
    where
        Src: StreamSource,
        C: RecordConsumer<Src::Record, Diff = A::Diff>,
    {
        let candidate = processor
            .process(partitions, self.state.positions(), consumer)
            .await?;
        self.commit(candidate).await
    }

    /// Push `candidate` on top of the current revision.
    ///
    /// On a moved head the intervening commits are fetched, applied, and
    /// the candidate is rebased over them (transformed, or resolved when
    /// the two conflict) before retrying under the backoff policy.
    #[instrument(skip_all, fields(revision = ?self.revision))]
    pub async fn commit(
        &mut self,
        candidate: LogDiff<A::Diff>,
    ) -> MultilogResult<CommitOutcome<St::Id>> {
        if self.algebra.is_empty(&candidate) {
            debug!("empty candidate, nothing to push");
            return Ok(CommitOutcome::Empty);
        }

        let mut candidate = candidate;
        for attempt in 0..self.retry.max_attempts {
            match self
                .store
                .push(self.revision.as_ref(), candidate.clone())
                .await?
            {
                PushOutcome::Pushed(id) => {
                    self.state.apply(&candidate);
                    info!(%id, attempt, "committed");
                    self.revision = Some(id.clone());
                    return Ok(CommitOutcome::Committed(id));
                }
                PushOutcome::HeadMoved(heads) => {
                    let head = single_head(heads)?.ok_or_else(|| {
                        StoreError::Backend("push rejected but store reports no head".to_string())
                    })?;
                    let intervening = self.commits_between(self.revision.as_ref(), &head).await?;
                    let committed = self.algebra.squash_all(&intervening)?;
                    let merge = self.algebra.merge(&candidate, &committed)?;

                    self.state.apply(&committed);
                    self.revision = Some(head);

                    if self.algebra.is_empty(&merge.right) {
                        warn!(
                            intervening = intervening.len(),
                            resolution = ?merge.resolution,
                            "candidate superseded by concurrent commits"
                        );
                        return Ok(CommitOutcome::Superseded);
                    }
                    candidate = merge.right;

                    if attempt + 1 == self.retry.max_attempts {
                        break;
                    }
                    let backoff = self.retry.backoff(attempt);
                    warn!(
                        attempt,
                        intervening = intervening.len(),
                        resolution = ?merge.resolution,
                        backoff_ms = backoff.as_millis() as u64,
                        "head moved, retrying rebased candidate"
                    );
                    tokio::time::sleep(backoff).await;
                }
            }
        }

        Err(StoreError::RetriesExhausted {
            attempts: self.retry.max_attempts,
        }
        .into())
    }

    /// Diffs of the commits after `base` up to and including `head`, oldest
    /// first. Merge commits are followed through their first parent.
    async fn commits_between(
        &self,
        base: Option<&St::Id>,
        head: &St::Id,
    ) -> MultilogResult<Vec<LogDiff<A::Diff>>> {
        let mut diffs = Vec::new();
        let mut cursor = Some(head.clone());
        while let Some(id) = cursor {
            if Some(&id) == base {
                break;
            }
            let commit = self.store.load_commit(&id).await?;
            cursor = commit.parents.first().cloned();
            if cursor.is_none() {
                if let Some(base) = base {
                    return Err(StoreError::UnknownRevision(base.to_string()).into());
                }
            }
            diffs.push(commit.diff);
        }
        diffs.reverse();
        Ok(diffs)
    }
}

fn single_head<K>(heads: BTreeSet<K>) -> Result<Option<K>, StoreError> {
    if heads.len() > 1 {
        return Err(StoreError::MultipleHeads(heads.len()));
    }
    Ok(heads.into_iter().next())
}
