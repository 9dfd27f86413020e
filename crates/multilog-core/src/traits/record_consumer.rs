//! Sink for the records read during one round.

use async_trait::async_trait;

use crate::errors::MultilogResult;

/// Accumulates records into domain diffs.
///
/// `accept` is awaited for every record before the next one is pulled, so a
/// slow consumer throttles its input. A consumer is used for one round only.
#[async_trait]
pub trait RecordConsumer<T: Send + 'static>: Send {
    type Diff: Send + 'static;

    async fn accept(&mut self, record: T) -> MultilogResult<()>;

    /// Called once after the last record; returns the accumulated diffs.
    async fn finish(&mut self) -> MultilogResult<Vec<Self::Diff>>;
}
