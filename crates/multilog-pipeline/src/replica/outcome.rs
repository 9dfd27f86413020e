/// What became of a commit candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome<K> {
    /// Pushed as commit `K` (possibly after rebasing).
    Committed(K),
    /// Nothing to commit; the store was not contacted.
    Empty,
    /// Concurrent commits already cover everything the candidate did.
    Superseded,
}

impl<K> CommitOutcome<K> {
    pub fn commit_id(&self) -> Option<&K> {
        match self {
            Self::Committed(id) => Some(id),
            Self::Empty | Self::Superseded => None,
        }
    }
}
