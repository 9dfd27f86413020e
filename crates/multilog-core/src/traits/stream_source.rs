//! Partition readers.

use std::pin::Pin;

use async_trait::async_trait;
use tokio_stream::Stream;

use crate::errors::MultilogResult;
use crate::position::Position;

/// One item of a partition stream. A well-formed stream yields any number of
/// records and then exactly one `Finished` carrying the position reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadEvent<T> {
    Record(T),
    Finished(Position),
}

pub type PartitionStream<T> = Pin<Box<dyn Stream<Item = MultilogResult<ReadEvent<T>>> + Send>>;

/// Opens finite record streams over named partitions, restartable from any
/// position.
#[async_trait]
pub trait StreamSource: Send + Sync {
    type Record: Send + 'static;

    async fn open(
        &self,
        partition: &str,
        from: &Position,
    ) -> MultilogResult<PartitionStream<Self::Record>>;
}
